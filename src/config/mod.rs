mod basic;
mod cards;

pub use basic::BasicConfig;
pub use cards::CardsConfig;

use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::LazyLock};

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Card rendering and join-control settings (see `cards` table in config.toml).
    #[serde(default)]
    pub cards: CardsConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";

impl Config {
    /// Builds a Figment that merges defaults and a config TOML file.
    pub fn figment() -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment.merge(Toml::file(DEFAULT_CONFIG_FILE))
        } else {
            figment
        }
    }

    /// Loads configuration by merging defaults and `config.toml` if present.
    pub fn from_optional_toml() -> Self {
        Self::figment().extract().unwrap_or_else(|err| {
            panic!("failed to extract configuration (defaults + optional config.toml): {err}")
        })
    }
}

/// Global, lazily-initialized configuration instance.
pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::from_optional_toml);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_overrides_defaults_per_field() {
        let cfg: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::string(
                r#"
                [basic]
                listen_port = 9000
                admin_emails = ["boss@jam.example"]

                [cards]
                ack_window_ms = 250
                "#,
            ))
            .extract()
            .unwrap();

        assert_eq!(cfg.basic.listen_port, 9000);
        assert_eq!(cfg.basic.database_url, "sqlite://jamboree.db");
        assert!(cfg.basic.is_admin_email("Boss@Jam.example"));
        assert!(!cfg.basic.is_admin_email("fan@jam.example"));
        assert_eq!(cfg.cards.ack_window().as_millis(), 250);
        assert_eq!(cfg.cards.card_idle_secs, 900);
    }

    #[test]
    fn out_of_range_offset_falls_back_to_utc() {
        let cards = CardsConfig {
            display_utc_offset_secs: 90_000,
            ..CardsConfig::default()
        };
        assert_eq!(cards.display_offset().local_minus_utc(), 0);
    }
}
