//! Single-user variant: any non-empty password opens the namespace derived
//! from its hash.

use async_trait::async_trait;
use tracing::info;

use homecare_core::repositories::CredentialProvider;
use homecare_core::{DomainError, Role, TenantContext};
use homecare_shared::utils::to_base36;

#[derive(Debug, Clone, Default)]
pub struct LegacyHashCredentials;

impl LegacyHashCredentials {
    pub fn new() -> Self {
        Self
    }

    /// `user_` followed by base-36 of the absolute 31-multiplier hash over
    /// the UTF-16 code units of `password`.
    pub fn tenant_for(password: &str) -> String {
        let hash = password
            .encode_utf16()
            .fold(0i32, |h, c| (h << 5).wrapping_sub(h).wrapping_add(c as i32));
        format!("user_{}", to_base36((hash as i64).unsigned_abs()))
    }
}

#[async_trait]
impl CredentialProvider for LegacyHashCredentials {
    async fn validate(&self, username: &str, password: &str) -> Result<TenantContext, DomainError> {
        if password.is_empty() {
            return Err(DomainError::InvalidCredentials);
        }
        let tenant = Self::tenant_for(password);
        info!("Legacy login for {} into {}", username, tenant);
        Ok(TenantContext::new(username, tenant, Role::Admin, username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_hashes() {
        assert_eq!(LegacyHashCredentials::tenant_for("a"), "user_2p");
        assert_eq!(LegacyHashCredentials::tenant_for("ab"), "user_2e9");
    }

    #[test]
    fn test_overflowing_hash_is_stable() {
        let long = "correct horse battery staple";
        let tenant = LegacyHashCredentials::tenant_for(long);
        assert!(tenant.starts_with("user_"));
        assert_eq!(tenant, LegacyHashCredentials::tenant_for(long));
        assert_ne!(tenant, LegacyHashCredentials::tenant_for("correct horse battery stapler"));
    }

    #[tokio::test]
    async fn test_validate() {
        let provider = LegacyHashCredentials::new();
        let ctx = provider.validate("User", "a").await.unwrap();
        assert_eq!(ctx.tenant_id, "user_2p");
        assert_eq!(ctx.display_name, "User");
        assert!(provider.validate("User", "").await.is_err());
    }
}
