//! Literal phrase corrections applied to generated answers

use rageval_core::config::CorrectionRule;
use tracing::debug;

/// Apply each correction in order as a literal, case-sensitive replace-all
///
/// Later rules see the output of earlier ones. A rule with an empty `wrong`
/// phrase matches nothing and is skipped.
pub fn post_process(answer: &str, corrections: &[CorrectionRule]) -> String {
    let mut processed = answer.to_string();
    for rule in corrections {
        if rule.wrong.is_empty() || !processed.contains(rule.wrong.as_str()) {
            continue;
        }
        processed = processed.replace(rule.wrong.as_str(), &rule.correct);
        debug!("Applied correction '{}' -> '{}'", rule.wrong, rule.correct);
    }
    processed
}
