use std::fmt::Display;

use maud::{Render, html};

/// Text shown for absent values.
pub const MISSING: &str = "-";

/// Display string of `value` with `& < > " '` replaced by entities. `None` renders as `-`.
pub fn escape_html<T: Display>(value: Option<T>) -> String {
    match value {
        Some(v) => escape_str(&v.to_string()),
        None => MISSING.to_string(),
    }
}

/// Escape a string that is known to be present.
pub fn escape_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Text spliced into a template. Renders through [`escape_str`] instead of maud's own escaper,
/// which leaves `'` alone.
#[derive(Debug, Clone, Copy)]
pub struct Text<'a>(pub &'a str);

impl Render for Text<'_> {
    fn render_to(&self, buffer: &mut String) {
        buffer.push_str(&escape_str(self.0));
    }
}

/// A table cell value, rendered through [`escape_html`].
#[derive(Debug, Clone, Copy)]
pub struct Cell<T>(pub Option<T>);

impl<T: Display> Render for Cell<T> {
    fn render_to(&self, buffer: &mut String) {
        buffer.push_str(&escape_html(self.0.as_ref()));
    }
}

/// `<option value="..">..</option>` with both parts escaped.
pub fn option(value: &str, label: &str) -> String {
    html! {
        option value=(Text(value)) { (Text(label)) }
    }
    .into_string()
}

/// Inline style for a region that is shown or hidden.
pub fn display_style(visible: bool) -> &'static str {
    if visible { "display: block;" } else { "display: none;" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_every_special_character() {
        assert_eq!(escape_str(r#"<a href="x">Tom & 'Jerry'</a>"#), "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;");
    }

    #[test]
    fn already_escaped_text_is_escaped_again() {
        assert_eq!(escape_str("&amp;"), "&amp;amp;");
    }

    #[test]
    fn templates_use_the_same_entities() {
        let markup = html! { p title=(Text("it's")) { (Text("O'Brien & <Co>")) } }.into_string();
        assert_eq!(markup, "<p title=\"it&#039;s\">O&#039;Brien &amp; &lt;Co&gt;</p>");
        let cell = html! { td { (Cell(None::<&str>)) } (Cell(Some("'"))) }.into_string();
        assert_eq!(cell, "<td>-</td>&#039;");
    }
}
