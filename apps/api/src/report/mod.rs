// Investor report generation: score normalization, prompt rendering, and the
// model-output recovery pipeline. All LLM calls go through llm_client.

pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod scoring;
