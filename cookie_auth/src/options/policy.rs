use crate::cookie::{HOST_PREFIX, is_cookie_name_char, normalize_cookie_name};

use super::errors::OptionsError;
use super::types::{
    COOKIE_AUTHENTICATION_SCHEME, CookieAuthOptions, CookieSecurePolicy, CookieSettings, ROOT_PATH,
    SameSite, SchemeForwarding,
};

impl CookieAuthOptions {
    /// Options for a host-only authentication cookie.
    ///
    /// The configured name goes through [`normalize_cookie_name`]; every other
    /// attribute is pinned: no `Domain`, `Path=/`, `HttpOnly`, essential,
    /// `SameSite=Strict` and always `Secure`. All actions are forwarded to the
    /// cookie scheme and the login/logout endpoints are disabled.
    pub fn host_only(
        configured_name: Option<&str>,
        max_age: Option<u64>,
    ) -> Result<Self, OptionsError> {
        let name = normalize_cookie_name(configured_name)?;

        Ok(Self {
            scheme: COOKIE_AUTHENTICATION_SCHEME.to_string(),
            cookie: CookieSettings {
                name,
                domain: None,
                path: ROOT_PATH.to_string(),
                http_only: true,
                is_essential: true,
                same_site: SameSite::Strict,
                secure_policy: CookieSecurePolicy::Always,
                max_age,
            },
            forward: SchemeForwarding::all_to(COOKIE_AUTHENTICATION_SCHEME),
            login_path: None,
            logout_path: None,
        })
    }

    /// Checks the options before they are handed to the HTTP layer.
    ///
    /// # Errors
    ///
    /// [`OptionsError::InvalidOptions`] when the cookie would be rejected by a
    /// user agent under the `__Host-` prefix rules, when a forward target names
    /// a scheme other than [`CookieAuthOptions::scheme`], or when a login or
    /// logout path is not an absolute path.
    pub fn validate(&self) -> Result<(), OptionsError> {
        let cookie = &self.cookie;
        let name = cookie.name.as_str();

        if !name.starts_with(HOST_PREFIX) || !name.chars().all(is_cookie_name_char) {
            return Err(OptionsError::InvalidOptions(format!(
                "cookie name {name:?} is not a valid {HOST_PREFIX} cookie-name"
            )));
        }
        if let Some(domain) = &cookie.domain {
            return Err(OptionsError::InvalidOptions(format!(
                "{HOST_PREFIX} cookies must not set a Domain, got {domain:?}"
            )));
        }
        if cookie.path != ROOT_PATH {
            return Err(OptionsError::InvalidOptions(format!(
                "{HOST_PREFIX} cookies require Path={ROOT_PATH}, got {:?}",
                cookie.path
            )));
        }
        if cookie.secure_policy != CookieSecurePolicy::Always {
            return Err(OptionsError::InvalidOptions(format!(
                "{HOST_PREFIX} cookies must always be Secure, got {:?}",
                cookie.secure_policy
            )));
        }

        if self.scheme.trim().is_empty() {
            return Err(OptionsError::InvalidOptions(
                "scheme name must not be empty".to_string(),
            ));
        }
        for (action, target) in self.forward.targets() {
            if let Some(target) = target.filter(|t| *t != self.scheme) {
                return Err(OptionsError::InvalidOptions(format!(
                    "{action} is forwarded to unknown scheme {target:?}"
                )));
            }
        }

        for (label, path) in [
            ("login_path", &self.login_path),
            ("logout_path", &self.logout_path),
        ] {
            if let Some(path) = path.as_ref().filter(|p| !p.starts_with('/')) {
                return Err(OptionsError::InvalidOptions(format!(
                    "{label} must start with '/', got {path:?}"
                )));
            }
        }

        Ok(())
    }
}
