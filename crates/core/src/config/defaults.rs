//! Default values and functions for configuration

// Default constants
pub(crate) const DEFAULT_GENERATION_PROVIDER: &str = "gemini";
pub(crate) const DEFAULT_GENERATION_MODEL: &str = "gemini-1.5-flash";
pub(crate) const DEFAULT_EVALUATION_PROVIDER: &str = "ragas";
pub(crate) const DEFAULT_EVALUATION_API_BASE_URL: &str = "http://localhost:8010";
pub(crate) const DEFAULT_JUDGE_PROVIDER: &str = "groq";
pub(crate) const DEFAULT_JUDGE_MODEL: &str = "llama3-8b-8192";
pub(crate) const DEFAULT_EMBEDDING_MODEL: &str = "models/embedding-001";

pub(crate) const DEFAULT_METRICS: [&str; 8] = [
    "faithfulness",
    "answer_relevancy",
    "context_precision",
    "context_recall",
    "context_entity_recall",
    "answer_similarity",
    "answer_correctness",
    "harmfulness",
];

pub(crate) fn default_generation_provider() -> String {
    DEFAULT_GENERATION_PROVIDER.to_string()
}

pub(crate) fn default_generation_model() -> String {
    DEFAULT_GENERATION_MODEL.to_string()
}

pub(crate) fn default_max_output_tokens() -> u32 {
    50
}

pub(crate) fn default_generation_timeout_secs() -> u64 {
    30
}

pub(crate) fn default_top_n() -> usize {
    3
}

pub(crate) fn default_evaluation_provider() -> String {
    DEFAULT_EVALUATION_PROVIDER.to_string()
}

pub(crate) fn default_evaluation_api_base_url() -> String {
    DEFAULT_EVALUATION_API_BASE_URL.to_string()
}

pub(crate) fn default_metrics() -> Vec<String> {
    DEFAULT_METRICS.iter().map(|m| m.to_string()).collect()
}

pub(crate) fn default_judge_provider() -> String {
    DEFAULT_JUDGE_PROVIDER.to_string()
}

pub(crate) fn default_judge_model() -> String {
    DEFAULT_JUDGE_MODEL.to_string()
}

pub(crate) fn default_embedding_model() -> String {
    DEFAULT_EMBEDDING_MODEL.to_string()
}

pub(crate) fn default_evaluation_timeout_secs() -> u64 {
    300
}

pub(crate) fn default_corrections() -> Vec<super::CorrectionRule> {
    vec![super::CorrectionRule::new(
        "Liberty Bell",
        "Freedom Trail walking tour",
    )]
}
