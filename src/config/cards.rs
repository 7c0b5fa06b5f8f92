use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Card rendering and join-control settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CardsConfig {
    /// How long the "Joined" acknowledgment stays on a card, in milliseconds.
    /// TOML: `cards.ack_window_ms`. Default: `500`.
    #[serde(default = "default_ack_window_ms")]
    pub ack_window_ms: u64,

    /// Idle seconds after which a card's join control is dropped.
    /// TOML: `cards.card_idle_secs`. Default: `900`.
    #[serde(default = "default_card_idle_secs")]
    pub card_idle_secs: u64,

    /// Upper bound on live join controls across all sessions.
    /// TOML: `cards.max_live_cards`. Default: `10000`.
    #[serde(default = "default_max_live_cards")]
    pub max_live_cards: u64,

    /// Offset applied to gig dates before formatting, in seconds east of UTC.
    /// TOML: `cards.display_utc_offset_secs`. Default: `0`.
    #[serde(default)]
    pub display_utc_offset_secs: i32,

    /// Placeholder for gig images.
    /// TOML: `cards.gig_placeholder`.
    #[serde(default = "default_gig_placeholder")]
    pub gig_placeholder: String,

    /// Placeholder for artist images.
    /// TOML: `cards.profile_placeholder`.
    #[serde(default = "default_profile_placeholder")]
    pub profile_placeholder: String,
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            ack_window_ms: default_ack_window_ms(),
            card_idle_secs: default_card_idle_secs(),
            max_live_cards: default_max_live_cards(),
            display_utc_offset_secs: 0,
            gig_placeholder: default_gig_placeholder(),
            profile_placeholder: default_profile_placeholder(),
        }
    }
}

impl CardsConfig {
    pub fn ack_window(&self) -> Duration {
        Duration::from_millis(self.ack_window_ms)
    }

    pub fn card_idle(&self) -> Duration {
        Duration::from_secs(self.card_idle_secs.max(1))
    }

    /// Falls back to UTC when the configured offset is out of range.
    pub fn display_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.display_utc_offset_secs)
            .unwrap_or_else(|| Utc.fix())
    }
}

fn default_ack_window_ms() -> u64 {
    500
}

fn default_card_idle_secs() -> u64 {
    15 * 60
}

fn default_max_live_cards() -> u64 {
    10_000
}

fn default_gig_placeholder() -> String {
    "/images/default_jamsession_image.png".to_string()
}

fn default_profile_placeholder() -> String {
    "/images/profileImagePlaceholder.png".to_string()
}
