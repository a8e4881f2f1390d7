use db::store::CredentialStore;

/// Checks an email/password pair against the credential store.
///
/// Email lookup is exact. A store failure is logged and treated as a failed
/// login so an outage never lets anyone in.
pub async fn authenticate(store: &dyn CredentialStore, email: &str, password: &str) -> bool {
    match store.find_admin(email).await {
        Ok(Some(account)) => account.verify_password(password),
        Ok(None) => false,
        Err(e) => {
            tracing::warn!(error = %e, "Credential lookup failed");
            false
        }
    }
}
