use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::info;

use crate::config::DemoUserConfig;
use crate::error::AppError;
use crate::users::repo::User;

/// Seam for the demo identity so provisioning stays deterministic under test.
pub trait IdentityProvider: Send + Sync {
    fn demo_email(&self, domain: &str) -> String;
}

/// Suffixes the address with the boot time, giving each deployment its own
/// demo account.
pub struct UnixTimeIdentity;

impl IdentityProvider for UnixTimeIdentity {
    fn demo_email(&self, domain: &str) -> String {
        format!(
            "demo-{}@{}",
            OffsetDateTime::now_utc().unix_timestamp(),
            domain
        )
    }
}

/// Explicit app-initialization step replacing the old create-on-page-load
/// behavior. Two boots within the same second collide on the address; the
/// existing account is reused then.
pub async fn ensure_demo_user(
    db: &PgPool,
    provider: &dyn IdentityProvider,
    cfg: &DemoUserConfig,
) -> Result<User, AppError> {
    let email = provider.demo_email(&cfg.email_domain);

    match User::create(db, &email, &cfg.display_name).await {
        Ok(user) => {
            info!(user_id = %user.id, email = %user.email, "demo user provisioned");
            Ok(user)
        }
        Err(AppError::UniqueViolation(_)) => {
            let existing = User::find_by_email(db, &email).await?;
            existing.ok_or_else(|| AppError::NotFound(format!("Demo user {} not found", email)))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::is_valid_email;

    #[test]
    fn unix_time_identity_produces_a_valid_domain_suffixed_email() {
        let email = UnixTimeIdentity.demo_email("headshot.studio");
        assert!(email.starts_with("demo-"));
        assert!(email.ends_with("@headshot.studio"));
        assert!(is_valid_email(&email));
    }

    #[test]
    fn provider_is_injectable() {
        struct Fixed;
        impl IdentityProvider for Fixed {
            fn demo_email(&self, domain: &str) -> String {
                format!("demo-fixed@{}", domain)
            }
        }
        assert_eq!(
            Fixed.demo_email("example.org"),
            "demo-fixed@example.org"
        );
    }
}
