pub mod huggingface;
pub mod summarizer;
