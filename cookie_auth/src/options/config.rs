use super::errors::OptionsError;
use super::types::CookieAuthOptions;

/// Configured cookie-name; normalized to carry the `__Host-` prefix
pub const AUTH_COOKIE_NAME_KEY: &str = "AUTH_COOKIE_NAME";

/// Lifetime of the authentication cookie in seconds; a session cookie when unset
pub const AUTH_COOKIE_MAX_AGE_KEY: &str = "AUTH_COOKIE_MAX_AGE";

impl CookieAuthOptions {
    /// Binds the options from environment variables.
    ///
    /// # Env vars
    /// - `AUTH_COOKIE_NAME`: desired cookie-name (default `__Host-Id`)
    /// - `AUTH_COOKIE_MAX_AGE`: cookie lifetime in seconds
    ///
    /// # Errors
    ///
    /// Any error of [`CookieAuthOptions::from_lookup`]. Callers are expected to
    /// treat it as fatal: the application must not start with a misconfigured
    /// cookie.
    pub fn from_env() -> Result<Self, OptionsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Binds the options from an arbitrary key/value source, then validates them.
    ///
    /// # Errors
    ///
    /// - [`OptionsError::CookieName`] if the configured name has characters
    ///   outside the cookie-name grammar
    /// - [`OptionsError::Config`] if the max age is not a number of seconds
    /// - [`OptionsError::InvalidOptions`] if validation fails
    pub fn from_lookup<F>(lookup: F) -> Result<Self, OptionsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let configured_name = lookup(AUTH_COOKIE_NAME_KEY);

        let max_age = match lookup(AUTH_COOKIE_MAX_AGE_KEY) {
            Some(value) if !value.trim().is_empty() => {
                Some(value.trim().parse::<u64>().map_err(|e| {
                    OptionsError::Config(format!("{AUTH_COOKIE_MAX_AGE_KEY}: {e}"))
                })?)
            }
            _ => None,
        };

        let options = Self::host_only(configured_name.as_deref(), max_age)?;
        options.validate()?;

        tracing::info!(
            cookie_name = %options.cookie.name,
            max_age = ?options.cookie.max_age,
            "Configured cookie authentication scheme {}",
            options.scheme
        );

        Ok(options)
    }
}
