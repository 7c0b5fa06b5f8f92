use serde::{Deserialize, Serialize};
use std::{
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
};

/// Basic (core) configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BasicConfig {
    /// HTTP server listen address (e.g., "0.0.0.0", "127.0.0.1").
    /// TOML: `basic.listen_addr`. Default: `0.0.0.0`.
    #[serde(default = "default_listen_ip")]
    pub listen_addr: IpAddr,

    /// HTTP server listen port.
    /// TOML: `basic.listen_port`. Default: `8188`.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Database URL for SQLite.
    /// TOML: `basic.database_url`. Default: `sqlite://jamboree.db`.
    #[serde(default)]
    pub database_url: String,

    /// Tracing log level, e.g. "info" or "debug".
    /// TOML: `basic.loglevel`. Default: `info`.
    #[serde(default)]
    pub loglevel: String,

    /// Account emails that get the `admin` role at sign-in.
    /// TOML: `basic.admin_emails`. Default: empty.
    #[serde(default)]
    pub admin_emails: Vec<String>,

    /// Lifetime of a sign-in session, in seconds.
    /// TOML: `basic.session_ttl_secs`. Default: `86400`.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Directory served under `/images` (placeholder images live here).
    /// TOML: `basic.static_dir`. Default: `./public/images`.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Optional JSON file of gigs inserted at startup.
    /// TOML: `basic.seed_file`. Default: unset (skip seeding).
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_ip(),
            listen_port: default_listen_port(),
            database_url: "sqlite://jamboree.db".to_string(),
            loglevel: "info".to_string(),
            admin_emails: Vec::new(),
            session_ttl_secs: default_session_ttl_secs(),
            static_dir: default_static_dir(),
            seed_file: None,
        }
    }
}

impl BasicConfig {
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails
            .iter()
            .any(|admin| admin.trim().eq_ignore_ascii_case(email.trim()))
    }
}

/// Default IP address for the HTTP server listen address.
fn default_listen_ip() -> IpAddr {
    Ipv4Addr::new(0, 0, 0, 0).into()
}

/// Default port for the HTTP server.
fn default_listen_port() -> u16 {
    8188
}

fn default_session_ttl_secs() -> u64 {
    24 * 60 * 60
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("./public/images")
}
