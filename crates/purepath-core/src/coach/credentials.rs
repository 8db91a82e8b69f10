//! Coach API key storage in the OS keyring.

use tracing::warn;

use crate::error::Result;

const SERVICE: &str = "purepath";
pub const API_KEY_ENTRY: &str = "gemini_api_key";

fn get(key: &str) -> Result<Option<String>> {
    let entry = keyring::Entry::new(SERVICE, key)?;
    match entry.get_password() {
        Ok(pw) => Ok(Some(pw)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn set(key: &str, value: &str) -> Result<()> {
    let entry = keyring::Entry::new(SERVICE, key)?;
    entry.set_password(value)?;
    Ok(())
}

fn delete(key: &str) -> Result<()> {
    let entry = keyring::Entry::new(SERVICE, key)?;
    match entry.delete_credential() {
        Ok(()) => Ok(()),
        Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// # Errors
/// Returns an error if the keyring rejects the write.
pub fn store_api_key(api_key: &str) -> Result<()> {
    set(API_KEY_ENTRY, api_key.trim())
}

/// # Errors
/// Returns an error if the keyring is unavailable.
pub fn clear_api_key() -> Result<()> {
    delete(API_KEY_ENTRY)
}

/// Find the API key: the environment variable `env_var` wins over the keyring.
///
/// An unreachable keyring counts as "no key".
pub fn resolve_api_key(env_var: &str) -> Option<String> {
    let from_env = std::env::var(env_var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    if from_env.is_some() {
        return from_env;
    }
    match get(API_KEY_ENTRY) {
        Ok(key) => key.filter(|k| !k.trim().is_empty()),
        Err(e) => {
            warn!(error = %e, "keyring lookup failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_var_takes_precedence() {
        let var = "PUREPATH_TEST_KEY_PRECEDENCE";
        std::env::set_var(var, "  from-env  ");
        assert_eq!(resolve_api_key(var).as_deref(), Some("from-env"));
        std::env::remove_var(var);
    }
}
