use base64::Engine;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

const SCHEME: &str = "pbkdf2-sha256";

/// PBKDF2-HMAC-SHA256 work factor for new hashes.
const ROUNDS: u32 = 600_000;

/// Stored hashes claiming more work than this are rejected unchecked.
const MAX_ROUNDS: u32 = 10_000_000;

/// Stored form: `pbkdf2-sha256$<rounds>$<salt base64url>$<hex key>`.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; 16];
    rand::rng().fill_bytes(&mut salt);
    let salt = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(salt);
    let key = derive(password, &salt, ROUNDS);
    format!("{SCHEME}${ROUNDS}${salt}${key}")
}

/// Constant-time check of `password` against a stored hash. Malformed hashes never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(4, '$');
    let (Some(SCHEME), Some(rounds), Some(salt), Some(expected)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let Some(rounds) = rounds
        .parse::<u32>()
        .ok()
        .filter(|r| (1..=MAX_ROUNDS).contains(r))
    else {
        return false;
    };
    let actual = derive(password, salt, rounds);
    actual.as_bytes().ct_eq(expected.as_bytes()).into()
}

fn derive(password: &str, salt: &str, rounds: u32) -> String {
    let mut key = [0u8; 32];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), rounds, &mut key);
    key.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let stored = hash_password("correct horse");
        assert!(stored.starts_with("pbkdf2-sha256$600000$"));
        assert!(verify_password("correct horse", &stored));
        assert!(!verify_password("correct horsE", &stored));
    }

    #[test]
    fn same_password_gets_different_salts() {
        assert_ne!(hash_password("pw"), hash_password("pw"));
    }

    #[test]
    fn rounds_are_read_from_the_stored_hash() {
        let stored = format!("{SCHEME}$1000$salt${}", derive("pw", "salt", 1000));
        assert!(verify_password("pw", &stored));
        assert!(!verify_password("pw", &stored.replace("$1000$", "$1001$")));
    }

    #[test]
    fn malformed_hash_never_matches() {
        assert!(!verify_password("pw", ""));
        assert!(!verify_password("pw", "md5$1$abc$def"));
        assert!(!verify_password("pw", "pbkdf2-sha256$1000$only-salt"));
        assert!(!verify_password("pw", "pbkdf2-sha256$0$salt$00"));
        assert!(!verify_password("pw", "pbkdf2-sha256$99999999999$salt$00"));
        assert!(!verify_password("pw", "pbkdf2-sha256$many$salt$00"));
    }
}
