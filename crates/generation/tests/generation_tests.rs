//! Integration tests for answer generation and correction

use pretty_assertions::assert_eq;
use rageval_core::config::{Config, CorrectionRule, Credentials};
use rageval_generation::{create_generation_client, generate_answer, post_process};

#[test]
fn test_default_corrections_fix_boston_answer() {
    let config = Config::default();
    let processed = post_process(
        "A historical tour in Boston can be done through the Liberty Bell.",
        &config.corrections,
    );
    assert_eq!(
        processed,
        "A historical tour in Boston can be done through the Freedom Trail walking tour."
    );
}

#[test]
fn test_no_corrections_leave_answer_untouched() {
    let answer = "A historical tour in Boston can be done through the Liberty Bell.";
    assert_eq!(post_process(answer, &[]), answer);
}

#[test]
fn test_overlapping_rules_follow_declared_order() {
    let rules = vec![
        CorrectionRule::new("Liberty Bell", "Freedom Trail"),
        CorrectionRule::new("Freedom Trail", "Freedom Trail walking tour"),
    ];
    assert_eq!(
        post_process("the Liberty Bell", &rules),
        "the Freedom Trail walking tour"
    );
}

#[tokio::test]
async fn test_mock_provider_answers_from_context() {
    let mut config = Config::default();
    config.generation.provider = "mock".to_string();

    let client = create_generation_client(&config.generation, &Credentials::default())
        .expect("mock client");
    let answer = generate_answer(
        "Suggest a nature hike in the US.",
        "Hike in the Rocky Mountains and enjoy the stunning natural scenery",
        client.as_ref(),
        config.generation.max_output_tokens,
    )
    .await
    .expect("generate");

    assert_eq!(
        answer,
        "Hike in the Rocky Mountains and enjoy the stunning natural scenery"
    );
}
