//! Session commands.
//!
//! # Usage
//!
//! ```bash
//! phantom-cli auth login -e wanjiru@example.com -p secret
//! phantom-cli auth register -e wanjiru@example.com -p secret -n "Wanjiru K"
//! phantom-cli auth whoami
//! phantom-cli auth logout
//! ```

use phantom_spares_storefront::services::AuthStore;

use super::{CliError, Shop};

/// Sign in.
///
/// # Errors
///
/// Returns `CliError::Auth` for rejected credentials or a failed write.
pub async fn login(shop: &mut Shop, email: &str, password: &str) -> Result<String, CliError> {
    let user = shop.auth.login(email, password).await?;
    Ok(format!("Signed in as {} <{}>", user.name, user.email))
}

/// Create an account and sign in.
///
/// # Errors
///
/// Same as [`login`].
pub async fn register(
    shop: &mut Shop,
    email: &str,
    password: &str,
    name: Option<&str>,
) -> Result<String, CliError> {
    let user = shop.auth.register(email, password, name).await?;
    Ok(format!("Welcome, {}! Signed in as <{}>", user.name, user.email))
}

/// Sign out.
///
/// # Errors
///
/// Returns `CliError::Auth` if the session cannot be removed.
pub fn logout(shop: &mut Shop) -> Result<String, CliError> {
    shop.auth.logout()?;
    Ok("Signed out".to_string())
}

/// Describe the current session.
#[must_use]
pub fn whoami(auth: &AuthStore) -> String {
    auth.current_user().map_or_else(
        || "Not signed in".to_string(),
        |user| format!("{} <{}> (user {})", user.name, user.email, user.id),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use phantom_spares_storefront::config::StorefrontConfig;

    use super::*;

    fn shop_in(dir: &std::path::Path) -> Shop {
        let config = StorefrontConfig {
            data_dir: Some(dir.to_path_buf()),
            ..StorefrontConfig::default()
        };
        Shop::open(config).unwrap()
    }

    #[tokio::test]
    async fn test_session_round_trip() {
        let dir = tempfile::tempdir().unwrap();

        let mut shop = shop_in(dir.path());
        assert_eq!(whoami(&shop.auth), "Not signed in");
        let report = login(&mut shop, "kamau@example.com", "pw").await.unwrap();
        assert_eq!(report, "Signed in as kamau <kamau@example.com>");

        let mut shop = shop_in(dir.path());
        assert_eq!(whoami(&shop.auth), "kamau <kamau@example.com> (user 1)");

        logout(&mut shop).unwrap();
        assert_eq!(whoami(&shop_in(dir.path()).auth), "Not signed in");
    }

    #[tokio::test]
    async fn test_register_with_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut shop = shop_in(dir.path());
        let report = register(&mut shop, "kamau@example.com", "pw", Some("Kamau N"))
            .await
            .unwrap();
        assert!(report.starts_with("Welcome, Kamau N!"));
    }

    #[tokio::test]
    async fn test_login_without_domain() {
        let dir = tempfile::tempdir().unwrap();
        let mut shop = shop_in(dir.path());
        let report = login(&mut shop, "kamau", "pw").await.unwrap();
        assert_eq!(report, "Signed in as kamau <kamau>");
    }
}
