//! Prompt templates for answer generation

pub const ANSWER: &str = include_str!("../assets/prompts/answer.txt");

/// Substitute `{key}` placeholders in a single pass
///
/// Substituted values are never rescanned, so a query or context that itself
/// contains `{context}` or `{query}` is embedded as-is. Unknown placeholders
/// are kept.
pub fn format_prompt(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        result.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let matched = vars.iter().find(|(key, _)| {
            tail.strip_prefix(key)
                .is_some_and(|after| after.starts_with('}'))
        });
        match matched {
            Some((key, value)) => {
                result.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                result.push('{');
                rest = tail;
            }
        }
    }
    result.push_str(rest);
    result
}

/// Prompt asking the model to answer `query` from `context`
pub fn answer_prompt(query: &str, context: &str) -> String {
    format_prompt(ANSWER, &[("context", context), ("query", query)])
}
