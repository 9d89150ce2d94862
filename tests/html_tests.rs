use schedule_viewer::html::{escape_html, escape_str, option};
use schedule_viewer::model::schedule::FieldValue;

#[test]
fn escaped_output_has_no_markup_characters() {
    let inputs = [
        "<script>alert('x')</script>",
        "Tom & Jerry",
        "\"quoted\" & 'single'",
        "a<b>c",
        "&lt; already",
        "plain text",
        "",
        "Zażółć gęślą jaźń",
    ];
    for s in inputs {
        let out = escape_str(s);
        assert!(!out.contains('<'), "output was: {}", out);
        assert!(!out.contains('>'), "output was: {}", out);
        assert!(!out.contains('"'), "output was: {}", out);
        assert!(!out.contains('\''), "output was: {}", out);
        // Every remaining ampersand opens one of our entities
        for (idx, _) in out.match_indices('&') {
            let rest = &out[idx..];
            assert!(
                ["&amp;", "&lt;", "&gt;", "&quot;", "&#039;"].iter().any(|e| rest.starts_with(e)),
                "stray ampersand in: {}",
                out
            );
        }
    }
}

#[test]
fn absent_values_render_as_dash() {
    assert_eq!(escape_html(None::<&str>), "-");
    assert_eq!(escape_html(None::<FieldValue>), "-");
}

#[test]
fn non_string_values_use_their_display_form() {
    assert_eq!(escape_html(Some(FieldValue::Integer(3))), "3");
    assert_eq!(escape_html(Some(&FieldValue::Text("Mata <1>".into()))), "Mata &lt;1&gt;");
    assert_eq!(escape_html(Some(42)), "42");
}

#[test]
fn option_escapes_value_and_label() {
    assert_eq!(
        option("91-tom-&-jerry", "Tom & Jerry <Open>"),
        "<option value=\"91-tom-&amp;-jerry\">Tom &amp; Jerry &lt;Open&gt;</option>"
    );
}
