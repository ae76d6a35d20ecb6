//! Prompt composition.

/// Appended when the composed prompt was cut to the character budget.
pub const TRUNCATION_MARKER: &str = "\n\n[Content truncated due to length limit]";

/// Join the template and the article text, then cut the result to `limit`
/// characters if it is longer. The marker is only added when a cut happened.
pub fn compose_prompt(template: &str, content: &str, limit: usize) -> String {
    let prompt = format!("{}\n\n{}", template, content);

    match prompt.char_indices().nth(limit) {
        Some((cut, _)) => {
            let mut truncated = prompt[..cut].to_string();
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
        None => prompt,
    }
}
