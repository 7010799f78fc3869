//! Server-rendered HTML for the portal pages.

pub mod account;
pub mod assets;
pub mod events;
pub mod layout;
pub mod login;
pub mod resources;

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// A button that copies `text` to the clipboard.
pub fn copy_button(text: &str, label: &str) -> String {
    format!(
        r#"<span class="copy">
  <button type="button" class="copy-button" data-copy="{text}" aria-label="Copy {label}">{text}</button>
  <span class="copy-done" hidden>Copied to clipboard</span>
</span>"#,
        text = escape(text),
        label = escape(label),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_copy_button_escapes_text() {
        let html = copy_button("vp.operations@usstm.ca", "email address");
        assert!(html.contains(r#"data-copy="vp.operations@usstm.ca""#));
        assert!(html.contains("Copy email address"));
    }
}
