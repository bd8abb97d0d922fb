//! Session cookie codec.
//!
//! The cookie value is the raw session id. Everything else about the cookie
//! comes from [`SessionConfig`].

use chrono::Duration;
use cookie::time::Duration as CookieDuration;
use cookie::{Cookie, SameSite as CookieSameSite};

use super::config::{SameSite, SessionConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieAttributes {
    pub path: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    /// `None` makes a browser-session cookie.
    pub max_age: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub attributes: CookieAttributes,
}

/// The cookie side effect a request should have.
///
/// Produced by the session manager, applied only by transport code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieDirective {
    /// Set a live cookie for a newly issued or renewed session.
    Issue(SessionCookie),
    /// Tell the client to delete its cookie.
    Blank(SessionCookie),
    Unchanged,
}

impl CookieDirective {
    pub fn cookie(&self) -> Option<&SessionCookie> {
        match self {
            Self::Issue(cookie) | Self::Blank(cookie) => Some(cookie),
            Self::Unchanged => None,
        }
    }
}

impl SessionCookie {
    pub(crate) fn live(session_id: &str, config: &SessionConfig) -> Self {
        let max_age = config.persistent_cookie.then_some(config.session_lifetime);
        Self {
            name: config.cookie_name.clone(),
            value: session_id.to_owned(),
            attributes: attributes(config, max_age),
        }
    }

    pub(crate) fn blank(config: &SessionConfig) -> Self {
        Self {
            name: config.cookie_name.clone(),
            value: String::new(),
            attributes: attributes(config, Some(Duration::zero())),
        }
    }

    /// Empty value and zero max-age: the client drops the cookie immediately.
    pub fn is_blank(&self) -> bool {
        self.value.is_empty() && self.attributes.max_age == Some(Duration::zero())
    }

    /// Renders the value of a `Set-Cookie` header.
    pub fn to_header_value(&self) -> String {
        let same_site = match self.attributes.same_site {
            SameSite::None => CookieSameSite::None,
            SameSite::Lax => CookieSameSite::Lax,
            SameSite::Strict => CookieSameSite::Strict,
        };

        let mut builder = Cookie::build((self.name.clone(), self.value.clone()))
            .path(self.attributes.path.clone())
            .secure(self.attributes.secure)
            .http_only(self.attributes.http_only)
            .same_site(same_site);

        if let Some(max_age) = self.attributes.max_age {
            builder = builder.max_age(CookieDuration::seconds(max_age.num_seconds()));
        }

        builder.build().to_string()
    }
}

fn attributes(config: &SessionConfig, max_age: Option<Duration>) -> CookieAttributes {
    CookieAttributes {
        path: config.cookie_path.clone(),
        secure: config.cookie_secure,
        http_only: true,
        same_site: config.cookie_same_site,
        max_age,
    }
}

/// Pulls the named cookie's value out of a `Cookie` request header.
///
/// Unparseable pairs are skipped rather than failing the whole header.
pub fn read_cookie(header: &str, name: &str) -> Option<String> {
    Cookie::split_parse(header)
        .filter_map(Result::ok)
        .find(|c| c.name() == name)
        .map(|c| c.value().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_cookie_is_browser_session_by_default() {
        let cookie = SessionCookie::live("abc123", &SessionConfig::default());
        let header = cookie.to_header_value();

        assert_eq!(cookie.name, "session");
        assert_eq!(cookie.value, "abc123");
        assert!(header.starts_with("session=abc123"));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("SameSite=Lax"));
        assert!(header.contains("Secure"));
        assert!(header.contains("Path=/"));
        assert!(!header.contains("Max-Age"));
    }

    #[test]
    fn test_persistent_cookie_carries_max_age() {
        let config = SessionConfig {
            persistent_cookie: true,
            ..SessionConfig::default()
        };
        let header = SessionCookie::live("abc123", &config).to_header_value();
        assert!(header.contains(&format!("Max-Age={}", Duration::days(30).num_seconds())));
    }

    #[test]
    fn test_development_cookie_is_not_secure() {
        let header = SessionCookie::live("abc123", &SessionConfig::development()).to_header_value();
        assert!(!header.contains("Secure"));
    }

    #[test]
    fn test_blank_cookie() {
        let cookie = SessionCookie::blank(&SessionConfig::default());
        assert!(cookie.is_blank());

        let header = cookie.to_header_value();
        assert!(header.starts_with("session=;"));
        assert!(header.contains("Max-Age=0"));
    }

    #[test]
    fn test_read_cookie() {
        let header = "theme=dark; session=abc123; other=1";
        assert_eq!(read_cookie(header, "session"), Some("abc123".to_owned()));
        assert_eq!(read_cookie(header, "missing"), None);
        assert_eq!(read_cookie("", "session"), None);
    }

    #[test]
    fn test_directive_cookie() {
        let cookie = SessionCookie::blank(&SessionConfig::default());
        assert_eq!(CookieDirective::Blank(cookie.clone()).cookie(), Some(&cookie));
        assert_eq!(CookieDirective::Unchanged.cookie(), None);
    }
}
