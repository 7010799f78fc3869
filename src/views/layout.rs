use axum::http::StatusCode;
use chrono::{Datelike, Utc};

use super::escape;
use crate::utils::flash::{FlashKind, Notice};

/// How long a toast stays up before dismissing itself.
pub const TOAST_DISMISS_MS: u32 = 5000;

const NAV_ITEMS: [(&str, &str); 4] = [
    ("Events", "/dashboard/events"),
    ("Finances", "/dashboard/finance"),
    ("Operations", "/dashboard/operations"),
    ("Contact", "/dashboard/contact"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chrome {
    /// Navbar, sign-out and footer.
    Dashboard,
    /// Content only, for the login and error pages.
    Bare,
}

pub fn page(title: &str, chrome: Chrome, notice: Option<&Notice>, body: &str) -> String {
    let navbar = match chrome {
        Chrome::Dashboard => navbar(),
        Chrome::Bare => String::new(),
    };
    let toast = notice.map(toast).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} | USSTM Portal</title>
  <link rel="stylesheet" href="/assets/portal.css">
  <script src="/assets/portal.js" defer></script>
</head>
<body>
{navbar}{toast}<main>
{body}
</main>
{footer}
</body>
</html>"#,
        title = escape(title),
        navbar = navbar,
        toast = toast,
        body = body,
        footer = footer(),
    )
}

fn navbar() -> String {
    let links: String = NAV_ITEMS
        .iter()
        .map(|(label, href)| format!(r#"<a class="nav-link" href="{}">{}</a>"#, href, label))
        .collect();

    format!(
        r#"<nav class="navbar">
  <a class="brand" href="/dashboard">USSTM Portal</a>
  <div class="nav-links">{links}</div>
  <div class="nav-actions">
    <form method="post" action="/logout"><button type="submit" class="sign-out">Sign Out</button></form>
    <a class="nav-account" href="/dashboard/account" aria-label="Account">Account</a>
  </div>
  <details class="nav-mobile">
    <summary aria-label="Menu">Menu</summary>
    {links}
    <a class="nav-link" href="/dashboard/account">Account</a>
    <form method="post" action="/logout"><button type="submit" class="sign-out">Sign Out</button></form>
  </details>
</nav>
"#,
        links = links
    )
}

fn footer() -> String {
    format!(
        r#"<footer class="footer"><span>&copy; {} Created by PACS. All rights reserved.</span></footer>"#,
        Utc::now().year()
    )
}

/// Toast for a one-shot notice. The script strips the notice from the URL
/// using `data-clean-url` and dismisses the toast after a delay.
pub fn toast(notice: &Notice) -> String {
    let Some(flash) = &notice.flash else {
        return String::new();
    };
    let (class, live) = match flash.kind {
        FlashKind::Success => ("toast-success", "polite"),
        FlashKind::Error => ("toast-error", "assertive"),
    };

    format!(
        r#"<div class="toast {class}" role="status" aria-live="{live}" data-toast data-dismiss-ms="{ms}" data-clean-url="{url}">
  <span class="toast-text">{content}</span>
  <button type="button" class="toast-close" aria-label="Dismiss" data-toast-close>&times;</button>
  <div class="toast-progress" aria-hidden="true"></div>
</div>
"#,
        class = class,
        live = live,
        ms = TOAST_DISMISS_MS,
        url = escape(&notice.clean_url),
        content = escape(&flash.content),
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let heading = match status {
        StatusCode::NOT_FOUND => "Page not found",
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => "Access denied",
        _ => "Something went wrong",
    };
    let body = format!(
        r#"<section class="card narrow center">
  <h1>{heading}</h1>
  <p>{message}</p>
  <a class="button" href="/dashboard">Back to the dashboard</a>
</section>"#,
        heading = heading,
        message = escape(message),
    );
    page(heading, Chrome::Bare, None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::flash::Flash;

    fn notice(kind: FlashKind, content: &str) -> Notice {
        Notice {
            flash: Some(Flash {
                kind,
                content: content.to_string(),
            }),
            clean_url: "/dashboard/events?q=a&amp".to_string(),
        }
    }

    #[test]
    fn test_toast_marks_kind_and_clean_url() {
        let html = toast(&notice(FlashKind::Error, "Event not found"));
        assert!(html.contains("toast-error"));
        assert!(html.contains(r#"aria-live="assertive""#));
        assert!(html.contains(r#"data-clean-url="/dashboard/events?q=a&amp;amp""#));
        assert!(html.contains("Event not found"));
    }

    #[test]
    fn test_no_toast_without_flash() {
        let empty = Notice {
            flash: None,
            clean_url: "/login".to_string(),
        };
        assert!(toast(&empty).is_empty());
        assert!(!page("Login", Chrome::Bare, Some(&empty), "").contains("data-toast"));
    }

    #[test]
    fn test_dashboard_chrome_has_navigation() {
        let html = page("Events", Chrome::Dashboard, None, "<p>hi</p>");
        assert!(html.contains(r#"href="/dashboard/finance""#));
        assert!(html.contains(r#"action="/logout""#));
        assert!(html.contains("Created by PACS"));

        let bare = page("Login", Chrome::Bare, None, "");
        assert!(!bare.contains("navbar"));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let html = error_page(StatusCode::NOT_FOUND, "<script>");
        assert!(html.contains("Page not found"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
