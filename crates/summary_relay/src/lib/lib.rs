pub mod chunker;
mod error;
pub mod formatter;
mod llm;
mod processor;
pub mod server;
pub mod tracing;
pub mod types;

pub use error::Error;
pub use llm::huggingface;
pub use llm::summarizer::{Summarizer, SummaryResponse};
pub use processor::{builder::SummaryPipelineBuilder, SummaryPipeline};
