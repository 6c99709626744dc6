#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing transcript")]
    MissingTranscript,
    #[error("Invalid chunking: max_length must be greater than zero")]
    ZeroChunkLength,
    #[error("Invalid chunking: overlap ({overlap}) must be less than max_length ({max_length})")]
    OverlapTooLarge { max_length: usize, overlap: usize },
    #[error("Invalid concurrency: max_concurrency must be greater than zero")]
    ZeroConcurrency,
    #[error("{message}")]
    Summarizer { chunk_index: usize, message: String },
}
