//! Bearer-token storage for the backend API.
//!
//! The token lives in the OS keyring, never in the config file. A missing
//! token is not an error: the client simply sends unauthenticated requests.

const SERVICE: &str = "focaplus";
const TOKEN_KEY: &str = "backend-token";

/// Fetch the stored token, `None` when the keyring has no entry.
pub fn token() -> Result<Option<String>, Box<dyn std::error::Error>> {
    let entry = keyring::Entry::new(SERVICE, TOKEN_KEY)?;
    match entry.get_password() {
        Ok(pw) => Ok(Some(pw)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn set_token(value: &str) -> Result<(), Box<dyn std::error::Error>> {
    let entry = keyring::Entry::new(SERVICE, TOKEN_KEY)?;
    entry.set_password(value)?;
    Ok(())
}

/// Remove the stored token. Missing entries are fine.
pub fn clear_token() -> Result<(), Box<dyn std::error::Error>> {
    let entry = keyring::Entry::new(SERVICE, TOKEN_KEY)?;
    match entry.delete_credential() {
        Ok(()) => Ok(()),
        Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
