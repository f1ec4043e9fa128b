use serde::Serialize;

use crate::cookie::CookieName;

/// Name of the cookie authentication scheme
pub const COOKIE_AUTHENTICATION_SCHEME: &str = "Cookies";

/// The only `Path` a `__Host-` cookie may carry
pub const ROOT_PATH: &str = "/";

/// Value of the `SameSite` cookie attribute
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum SameSite {
    #[default]
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// When the `Secure` attribute is emitted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum CookieSecurePolicy {
    #[default]
    Always,
    SameAsRequest,
    Never,
}

impl CookieSecurePolicy {
    /// Whether a cookie issued on a request with the given scheme is `Secure`
    pub fn is_secure(&self, request_is_https: bool) -> bool {
        match self {
            CookieSecurePolicy::Always => true,
            CookieSecurePolicy::SameAsRequest => request_is_https,
            CookieSecurePolicy::Never => false,
        }
    }
}

/// Attributes of the authentication cookie
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CookieSettings {
    pub name: CookieName,
    pub domain: Option<String>,
    pub path: String,
    pub http_only: bool,
    /// Exempt from consent checks
    pub is_essential: bool,
    pub same_site: SameSite,
    pub secure_policy: CookieSecurePolicy,
    /// `Max-Age` in seconds; a session cookie when `None`
    pub max_age: Option<u64>,
}

/// Scheme each authentication action is forwarded to.
///
/// `None` means the action is handled by the scheme itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SchemeForwarding {
    pub authenticate: Option<String>,
    pub challenge: Option<String>,
    pub forbid: Option<String>,
    pub sign_in: Option<String>,
    pub sign_out: Option<String>,
}

impl SchemeForwarding {
    /// Forward every action to `scheme`
    pub fn all_to(scheme: &str) -> Self {
        Self {
            authenticate: Some(scheme.to_string()),
            challenge: Some(scheme.to_string()),
            forbid: Some(scheme.to_string()),
            sign_in: Some(scheme.to_string()),
            sign_out: Some(scheme.to_string()),
        }
    }

    pub(crate) fn targets(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("authenticate", self.authenticate.as_deref()),
            ("challenge", self.challenge.as_deref()),
            ("forbid", self.forbid.as_deref()),
            ("sign_in", self.sign_in.as_deref()),
            ("sign_out", self.sign_out.as_deref()),
        ]
    }
}

/// Options of the cookie authentication scheme.
///
/// Plain data handed to the HTTP layer at startup. Build it with
/// [`CookieAuthOptions::host_only`] or [`CookieAuthOptions::from_env`] so the
/// cookie satisfies the `__Host-` prefix contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CookieAuthOptions {
    pub scheme: String,
    pub cookie: CookieSettings,
    pub forward: SchemeForwarding,
    /// Redirect target for challenges; disabled when `None`
    pub login_path: Option<String>,
    /// Sign-out endpoint; disabled when `None`
    pub logout_path: Option<String>,
}
