use moka::sync::Cache;
use serde::Serialize;
use std::{fmt, sync::Arc, time::Duration};

use crate::utils::random_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::User
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The signed-in account behind a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub token: Arc<str>,
    pub account_id: i64,
    pub email: String,
    pub role: Role,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Bearer-token sessions with a fixed time-to-live.
#[derive(Clone)]
pub struct SessionStore {
    cache: Cache<Arc<str>, SessionUser>,
}

impl SessionStore {
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .time_to_live(ttl.max(Duration::from_secs(1)))
            .max_capacity(max_capacity.max(1))
            .build();
        Self { cache }
    }

    /// Opens a session and returns it, token included.
    pub fn open(&self, account_id: i64, email: &str, role: Role) -> SessionUser {
        let token: Arc<str> = Arc::from(random_id());
        let user = SessionUser {
            token: token.clone(),
            account_id,
            email: email.to_string(),
            role,
        };
        self.cache.insert(token, user.clone());
        user
    }

    pub fn get(&self, token: &str) -> Option<SessionUser> {
        self.cache.get(token)
    }

    pub fn close(&self, token: &str) {
        self.cache.invalidate(token);
    }

    /// Tokens of every open session signed in as `email`.
    pub fn tokens_for(&self, email: &str) -> Vec<Arc<str>> {
        self.cache
            .iter()
            .filter(|(_, user)| user.email.eq_ignore_ascii_case(email))
            .map(|(token, _)| (*token).clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_then_lookup_then_close() {
        let store = SessionStore::new(Duration::from_secs(60), 16);
        let user = store.open(4, "ada@example.com", Role::Admin);
        assert_eq!(user.token.len(), 16);

        let found = store.get(&user.token).unwrap();
        assert_eq!(found.account_id, 4);
        assert!(found.is_admin());

        store.close(&user.token);
        assert!(store.get(&user.token).is_none());
    }

    #[test]
    fn tokens_for_finds_every_session_of_an_email() {
        let store = SessionStore::new(Duration::from_secs(60), 16);
        let a = store.open(1, "ada@example.com", Role::User);
        let b = store.open(1, "ada@example.com", Role::User);
        store.open(2, "kai@example.com", Role::User);

        let mut tokens = store.tokens_for("ADA@example.com");
        tokens.sort();
        let mut expected = vec![a.token, b.token];
        expected.sort();
        assert_eq!(tokens, expected);
        assert!(store.tokens_for("ghost@example.com").is_empty());
    }

    #[test]
    fn unknown_token_is_anonymous() {
        let store = SessionStore::new(Duration::from_secs(60), 16);
        assert!(store.get("nope").is_none());
    }

    #[test]
    fn role_parse_defaults_to_user() {
        assert_eq!(Role::parse("ADMIN"), Role::Admin);
        assert_eq!(Role::parse("guest"), Role::User);
        assert_eq!(Role::User.to_string(), "user");
    }
}
