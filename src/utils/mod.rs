pub(crate) mod logging;

use base64::Engine as _;
use rand::RngCore;

/// 96 random bits as 16 chars of base64url (no padding).
pub(crate) fn random_id() -> String {
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}
