// Learning path generation: prompt construction, model invocation, output parsing,
// and the HTTP handler that fronts it.
// All model calls go through llm_client::CompletionModel.

pub mod generator;
pub mod handlers;
pub mod parser;
pub mod prompts;
