use jamboree_schema::{SignInRequest, SignUpRequest};
use tracing::{info, warn};

use super::password::{hash_password, verify_password};
use super::session::{Role, SessionStore, SessionUser};
use crate::config::BasicConfig;
use crate::db::{AccountCreate, DbActorHandle};
use crate::error::{JamboreeError, SignUpError};

/// Every rule the form breaks, in field order (`email`, `password`, `verifyPassword`).
pub fn sign_up_errors(form: &SignUpRequest) -> Vec<SignUpError> {
    let email = form.email.trim();
    let mut errors = Vec::new();

    if email.is_empty() {
        errors.push(SignUpError::FieldRequired("email"));
    }
    if form.password.is_empty() {
        errors.push(SignUpError::FieldRequired("password"));
    }
    if email.is_empty() || form.password.is_empty() {
        errors.push(SignUpError::MissingCredentials);
    } else if form.verify_password != form.password {
        errors.push(SignUpError::PasswordMismatch);
    }
    errors
}

/// First broken rule, if any.
pub fn validate_sign_up(form: &SignUpRequest) -> Result<(), SignUpError> {
    match sign_up_errors(form).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Registers an account, creates its empty artist profile and opens a session.
pub async fn register(
    db: &DbActorHandle,
    sessions: &SessionStore,
    basic: &BasicConfig,
    form: &SignUpRequest,
) -> Result<SessionUser, JamboreeError> {
    validate_sign_up(form)?;

    let email = form.email.trim();
    let role = role_for(basic, email, None);
    let account = db
        .create_account(AccountCreate {
            email: email.to_string(),
            password_hash: hash_password(&form.password),
            role: role.as_str().to_string(),
        })
        .await?;

    let artist_id = db.create_artist(account.email.as_str()).await.inspect_err(|e| {
        warn!(email = %account.email, error = %e, "artist creation after sign-up failed");
    })?;

    info!(account_id = account.id, artist_id, email = %account.email, %role, "account registered");
    Ok(sessions.open(account.id, &account.email, role))
}

pub async fn sign_in(
    db: &DbActorHandle,
    sessions: &SessionStore,
    basic: &BasicConfig,
    form: &SignInRequest,
) -> Result<SessionUser, JamboreeError> {
    let Some(account) = db.get_account_by_email(form.email.trim()).await? else {
        return Err(JamboreeError::InvalidCredentials);
    };
    if !verify_password(&form.password, &account.password_hash) {
        warn!(email = %account.email, "sign-in rejected");
        return Err(JamboreeError::InvalidCredentials);
    }

    // Registration may have stopped between the account and its artist; finish it here.
    let artist_id = db.create_artist(account.email.as_str()).await.inspect_err(|e| {
        warn!(email = %account.email, error = %e, "artist lookup on sign-in failed");
    })?;

    let role = role_for(basic, &account.email, Some(&account.role));
    info!(account_id = account.id, artist_id, %role, "signed in");
    Ok(sessions.open(account.id, &account.email, role))
}

/// Configured admin emails win over the stored role.
fn role_for(basic: &BasicConfig, email: &str, stored: Option<&str>) -> Role {
    if basic.is_admin_email(email) {
        Role::Admin
    } else {
        stored.map_or(Role::User, Role::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str, password: &str, verify: &str) -> SignUpRequest {
        SignUpRequest {
            email: email.to_string(),
            password: password.to_string(),
            verify_password: verify.to_string(),
        }
    }

    #[test]
    fn complete_matching_form_passes() {
        assert_eq!(validate_sign_up(&form("a@b.c", "pw", "pw")), Ok(()));
    }

    #[test]
    fn empty_email_reports_required_then_missing_credentials() {
        let errors = sign_up_errors(&form("  ", "pw", "pw"));
        assert_eq!(
            errors,
            vec![
                SignUpError::FieldRequired("email"),
                SignUpError::MissingCredentials
            ]
        );
        assert_eq!(errors[0].to_string(), "This field is required");
        assert_eq!(
            errors[1].to_string(),
            "Please provide username credentials for sign-up"
        );
    }

    #[test]
    fn empty_password_is_required() {
        assert_eq!(
            validate_sign_up(&form("a@b.c", "", "")),
            Err(SignUpError::FieldRequired("password"))
        );
    }

    #[test]
    fn mismatched_verification_is_rejected() {
        let err = validate_sign_up(&form("a@b.c", "pw", "pW")).unwrap_err();
        assert_eq!(err, SignUpError::PasswordMismatch);
        assert_eq!(err.to_string(), "Passwords do not match");
    }

    #[test]
    fn configured_admins_get_admin_role() {
        let basic = BasicConfig {
            admin_emails: vec!["Boss@Example.com".to_string()],
            ..BasicConfig::default()
        };
        assert_eq!(role_for(&basic, "boss@example.com", Some("user")), Role::Admin);
        assert_eq!(role_for(&basic, "x@example.com", None), Role::User);
        assert_eq!(role_for(&basic, "x@example.com", Some("admin")), Role::Admin);
    }
}
