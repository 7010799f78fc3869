//! One-shot notices passed through the `message` / `error` query parameters.
//!
//! A page that receives a notice renders it as a toast and hands the browser a
//! clean URL, so a reload does not show the same notice again.

use std::convert::Infallible;

use axum::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum::http::Uri;

const NOTICE_KEYS: [&str; 2] = ["message", "error"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub content: String,
}

impl Flash {
    /// An `error` takes precedence over a `message`.
    pub fn from_notices(message: Option<&str>, error: Option<&str>) -> Option<Self> {
        fn non_empty(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|v| !v.is_empty())
        }

        if let Some(error) = non_empty(error) {
            return Some(Self {
                kind: FlashKind::Error,
                content: error.to_string(),
            });
        }
        non_empty(message).map(|message| Self {
            kind: FlashKind::Success,
            content: message.to_string(),
        })
    }
}

/// `path?query` with every notice parameter removed. Other parameters keep their order.
pub fn without_notices(path: &str, query: Option<&str>) -> String {
    let kept: Vec<&str> = query
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            let key = pair.split('=').next().unwrap_or_default();
            !NOTICE_KEYS.contains(&key)
        })
        .collect();

    if kept.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, kept.join("&"))
    }
}

/// The notice carried by the current request, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub flash: Option<Flash>,
    pub clean_url: String,
}

impl Notice {
    pub fn from_uri(uri: &Uri) -> Self {
        let pairs: Vec<(String, String)> = Query::try_from_uri(uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        Self {
            flash: Flash::from_notices(get("message"), get("error")),
            clean_url: without_notices(uri.path(), uri.query()),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Notice
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Notice::from_uri(&parts.uri))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_success() {
        let flash = Flash::from_notices(Some("Event created successfully."), None).unwrap();
        assert_eq!(flash.kind, FlashKind::Success);
        assert_eq!(flash.content, "Event created successfully.");
    }

    #[test]
    fn test_error_wins_over_message() {
        let flash = Flash::from_notices(Some("ok"), Some("Event not found")).unwrap();
        assert_eq!(flash.kind, FlashKind::Error);
        assert_eq!(flash.content, "Event not found");
    }

    #[test]
    fn test_blank_notices_ignored() {
        assert!(Flash::from_notices(Some("  "), Some("")).is_none());
        assert!(Flash::from_notices(None, None).is_none());
    }

    #[test]
    fn test_clean_url_keeps_other_params() {
        assert_eq!(
            without_notices("/dashboard/events", Some("q=bbq&message=Saved&past_page=2")),
            "/dashboard/events?q=bbq&past_page=2"
        );
        assert_eq!(
            without_notices("/login", Some("error=Nope")),
            "/login"
        );
        assert_eq!(without_notices("/login", None), "/login");
    }

    #[test]
    fn test_notice_from_uri_decodes() {
        let uri: Uri = "/dashboard/events?error=Event%20not%20found&q=x".parse().unwrap();
        let notice = Notice::from_uri(&uri);

        assert_eq!(
            notice.flash,
            Some(Flash {
                kind: FlashKind::Error,
                content: "Event not found".to_string()
            })
        );
        assert_eq!(notice.clean_url, "/dashboard/events?q=x");
    }
}
