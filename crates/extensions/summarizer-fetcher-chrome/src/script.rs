//! Content extraction script.

use serde_json::Value;

use summarizer_protocols::FetchResult;

/// Build the expression that captures the element matched by `selector`,
/// falling back to the document body when nothing matches or the selector is
/// invalid.
pub(crate) fn extraction_script(selector: &str) -> String {
    // A JSON string is a valid JavaScript string literal
    let literal = serde_json::to_string(selector).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"(() => {{
  let el = null;
  try {{ el = document.querySelector({literal}); }} catch (e) {{}}
  el = el || document.body;
  if (!el) return {{ text: "", html: "" }};
  return {{ text: el.innerText || "", html: el.outerHTML || "" }};
}})()"#
    )
}

/// Read `{text, html}` from an evaluation value. Any other shape yields an
/// empty result.
pub(crate) fn parse_extracted(value: &Value) -> FetchResult {
    let field = |name: &str| {
        value
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    match value {
        Value::Object(_) => FetchResult::new(field("text"), field("html")),
        _ => FetchResult::default(),
    }
}
