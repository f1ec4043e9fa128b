use std::fmt;

use serde::Serialize;

use super::errors::CookieNameError;

/// Cookie-name prefix defined by the HTTP state management specification.
///
/// A compliant user agent only accepts a cookie with this prefix when the
/// `Set-Cookie` header carries the `Secure` attribute and `Path=/`, and does
/// not carry a `Domain` attribute.
pub const HOST_PREFIX: &str = "__Host-";

/// Cookie-name used when no usable name is configured
pub const DEFAULT_COOKIE_NAME: &str = "__Host-Id";

// US-ASCII characters allowed in a cookie-name besides letters and digits
const SPECIAL_NON_SEPARATOR_CHARACTERS: &str = "!#$%&'*+-.^_`|~";

/// Name of the authentication cookie.
///
/// Always non-empty, always starts with [`HOST_PREFIX`] and only contains
/// characters of the cookie-name grammar. The only way to get one is
/// [`normalize_cookie_name`] (or [`CookieName::default`]).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CookieName(String);

impl CookieName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for CookieName {
    fn default() -> Self {
        Self(DEFAULT_COOKIE_NAME.to_string())
    }
}

impl AsRef<str> for CookieName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CookieName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for CookieName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CookieName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

pub(crate) fn is_cookie_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || SPECIAL_NON_SEPARATOR_CHARACTERS.contains(c)
}

/// Returns the name of the authentication cookie for a configured starting value.
///
/// * `None`, `""` or a value made only of whitespace gives [`DEFAULT_COOKIE_NAME`].
/// * A value that already starts with [`HOST_PREFIX`] is kept as is.
/// * Any other value gets [`HOST_PREFIX`] prepended.
///
/// Whitespace covers the whole Unicode `White_Space` property, so exotic spaces
/// coming from configuration files fall back to the default instead of failing.
///
/// # Errors
///
/// [`CookieNameError::InvalidArgument`] when the value contains a character
/// outside `[A-Za-z0-9!#$%&'*+-.^_`|~]`. Offending characters are never
/// stripped or replaced.
///
/// # Examples
///
/// ```
/// use cookie_auth::normalize_cookie_name;
///
/// assert_eq!(normalize_cookie_name(None).unwrap(), "__Host-Id");
/// assert_eq!(normalize_cookie_name(Some(" ")).unwrap(), "__Host-Id");
/// assert_eq!(normalize_cookie_name(Some("MyCookie")).unwrap(), "__Host-MyCookie");
/// assert_eq!(normalize_cookie_name(Some("__Host-MyCookie")).unwrap(), "__Host-MyCookie");
/// assert!(normalize_cookie_name(Some("a,b")).is_err());
/// ```
pub fn normalize_cookie_name(starting_value: Option<&str>) -> Result<CookieName, CookieNameError> {
    let Some(starting_value) = starting_value else {
        return Ok(CookieName::default());
    };

    if starting_value.chars().all(char::is_whitespace) {
        return Ok(CookieName::default());
    }

    if !starting_value.chars().all(is_cookie_name_char) {
        return Err(CookieNameError::InvalidArgument(starting_value.to_string()));
    }

    let cookie_name = if starting_value.starts_with(HOST_PREFIX) {
        starting_value.to_string()
    } else {
        format!("{HOST_PREFIX}{starting_value}")
    };

    Ok(CookieName(cookie_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use regex::Regex;
    use std::sync::LazyLock;

    const ASCII_ALPHABET_CHARACTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
    const ASCII_DIGITS: &str = "1234567890";

    // Unicode White_Space: space separators, line/paragraph separators and control whitespace
    const WHITESPACE: &[char] = &[
        '\u{0009}', '\u{000A}', '\u{000B}', '\u{000C}', '\u{000D}', '\u{0020}', '\u{0085}',
        '\u{00A0}', '\u{1680}', '\u{2000}', '\u{2001}', '\u{2002}', '\u{2003}', '\u{2004}',
        '\u{2005}', '\u{2006}', '\u{2007}', '\u{2008}', '\u{2009}', '\u{200A}', '\u{2028}',
        '\u{2029}', '\u{202F}', '\u{205F}', '\u{3000}',
    ];

    const SEPARATORS: &[char] = &[
        '(', ')', '<', '>', '@', ',', ';', ':', '\\', '"', '/', '[', ']', '?', '=', '{', '}',
    ];

    const VALID_NAME: &str = r"[A-Za-z0-9!#$%&'*+.^_`|~\-]{1,32}";

    static COOKIE_NAME_PATTERN: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[A-Za-z\d!#\$%&'\*\+\-\.\^_`\|~]+$").unwrap());

    fn assert_valid_result(name: &CookieName) {
        assert!(name.as_str().starts_with(HOST_PREFIX), "{name} lacks prefix");
        assert!(
            COOKIE_NAME_PATTERN.is_match(name.as_str()),
            "{name} is outside the grammar"
        );
    }

    #[test]
    fn test_none_returns_default() {
        assert_eq!(normalize_cookie_name(None).unwrap(), DEFAULT_COOKIE_NAME);
    }

    #[test]
    fn test_empty_returns_default() {
        assert_eq!(normalize_cookie_name(Some("")).unwrap(), DEFAULT_COOKIE_NAME);
    }

    #[test]
    fn test_spaces_return_default() {
        assert_eq!(
            normalize_cookie_name(Some("   ")).unwrap(),
            DEFAULT_COOKIE_NAME
        );
        assert_eq!(
            normalize_cookie_name(Some("\r\n")).unwrap(),
            DEFAULT_COOKIE_NAME
        );
    }

    #[test]
    fn test_each_whitespace_character_returns_default() {
        for c in WHITESPACE {
            let value = c.to_string();
            assert_eq!(
                normalize_cookie_name(Some(&value)).unwrap(),
                DEFAULT_COOKIE_NAME,
                "U+{:04X} should fall back to the default",
                *c as u32
            );
        }
    }

    #[test]
    fn test_prefix_is_prepended() {
        assert_eq!(
            normalize_cookie_name(Some("MyCookie")).unwrap(),
            "__Host-MyCookie"
        );
    }

    #[test]
    fn test_prefixed_name_is_unchanged() {
        assert_eq!(
            normalize_cookie_name(Some("__Host-MyCookie")).unwrap(),
            "__Host-MyCookie"
        );
    }

    #[test]
    fn test_bare_prefix_is_unchanged() {
        assert_eq!(normalize_cookie_name(Some(HOST_PREFIX)).unwrap(), HOST_PREFIX);
    }

    #[test]
    fn test_prefix_match_is_case_sensitive() {
        assert_eq!(
            normalize_cookie_name(Some("__host-MyCookie")).unwrap(),
            "__Host-__host-MyCookie"
        );
    }

    #[test]
    fn test_grammar_character_classes_are_accepted() {
        for value in [
            ASCII_ALPHABET_CHARACTERS,
            ASCII_DIGITS,
            SPECIAL_NON_SEPARATOR_CHARACTERS,
        ] {
            let name = normalize_cookie_name(Some(value)).unwrap();
            assert_eq!(name.as_str(), format!("{HOST_PREFIX}{value}"));
            assert_valid_result(&name);
        }
    }

    #[test]
    fn test_separator_characters_are_rejected() {
        for c in SEPARATORS {
            let value = c.to_string();
            assert_eq!(
                normalize_cookie_name(Some(&value)),
                Err(CookieNameError::InvalidArgument(value.clone()))
            );
        }
    }

    #[test]
    fn test_comma_is_rejected() {
        assert!(matches!(
            normalize_cookie_name(Some("a,b")),
            Err(CookieNameError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_embedded_or_surrounding_whitespace_is_rejected() {
        for value in ["My Cookie", " MyCookie", "MyCookie\n", "My\tCookie"] {
            assert!(
                normalize_cookie_name(Some(value)).is_err(),
                "{value:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_non_ascii_is_rejected() {
        for value in ["Kéks", "クッキー", "Id\u{0000}", "Id\u{007F}"] {
            assert!(
                normalize_cookie_name(Some(value)).is_err(),
                "{value:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_error_message_names_the_value() {
        let err = normalize_cookie_name(Some("a;b")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid cookie-name detected: \"a;b\"");
    }

    #[test]
    fn test_cookie_name_display_and_serialize() {
        let name = normalize_cookie_name(Some("Session")).unwrap();
        assert_eq!(name.to_string(), "__Host-Session");
        assert_eq!(
            serde_json::to_string(&name).unwrap(),
            "\"__Host-Session\""
        );
    }

    #[test]
    fn test_normalize_is_usable_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|i| std::thread::spawn(move || normalize_cookie_name(Some(&format!("C{i}")))))
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let name = handle.join().unwrap().unwrap();
            assert_eq!(name.as_str(), format!("__Host-C{i}"));
        }
    }

    proptest! {
        #[test]
        fn test_whitespace_only_returns_default(
            chars in proptest::collection::vec(proptest::sample::select(WHITESPACE), 0..16)
        ) {
            let value: String = chars.into_iter().collect();
            prop_assert_eq!(normalize_cookie_name(Some(&value)).unwrap(), DEFAULT_COOKIE_NAME);
        }

        #[test]
        fn test_valid_name_gets_prefix(value in VALID_NAME) {
            prop_assume!(!value.starts_with(HOST_PREFIX));
            let name = normalize_cookie_name(Some(&value)).unwrap();
            prop_assert_eq!(name.as_str(), format!("{HOST_PREFIX}{value}"));
            assert_valid_result(&name);
        }

        #[test]
        fn test_prefixed_valid_name_is_unchanged(suffix in VALID_NAME) {
            let value = format!("{HOST_PREFIX}{suffix}");
            let name = normalize_cookie_name(Some(&value)).unwrap();
            prop_assert_eq!(name.as_str(), value.as_str());
        }

        #[test]
        fn test_normalize_is_idempotent(value in VALID_NAME) {
            let once = normalize_cookie_name(Some(&value)).unwrap();
            let twice = normalize_cookie_name(Some(once.as_str())).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_value_with_separator_is_rejected(
            head in "[A-Za-z0-9]{0,8}",
            bad in proptest::sample::select(SEPARATORS),
            tail in "[A-Za-z0-9]{0,8}",
        ) {
            let value = format!("{head}{bad}{tail}");
            prop_assert_eq!(
                normalize_cookie_name(Some(&value)),
                Err(CookieNameError::InvalidArgument(value.clone()))
            );
        }

        #[test]
        fn test_result_always_satisfies_grammar(value in "\\PC{0,24}") {
            if let Ok(name) = normalize_cookie_name(Some(&value)) {
                assert_valid_result(&name);
            }
        }

        #[test]
        fn test_normalize_is_deterministic(value in "\\PC{0,24}") {
            prop_assert_eq!(
                normalize_cookie_name(Some(&value)),
                normalize_cookie_name(Some(&value))
            );
        }
    }
}
