pub mod accounts;
pub mod attendance;
pub mod config;
pub mod db;
pub mod error;
pub mod seed;
pub mod server;
pub mod views;

pub(crate) mod utils;

pub use error::JamboreeError;
