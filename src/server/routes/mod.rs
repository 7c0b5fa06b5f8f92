pub mod accounts;
pub mod artists;
pub mod gigs;
pub mod profile;

mod shared;
