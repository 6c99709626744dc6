pub mod builder;

use std::num::NonZeroUsize;

use futures::{stream, StreamExt, TryStreamExt};

use crate::{
    chunker::{Chunk, ChunkingConfig},
    error::Error,
    formatter, Summarizer,
};

/// Chunk, summarize and reassemble a transcript into a bullet summary
#[derive(Debug)]
pub struct SummaryPipeline<S>
where
    S: Summarizer + Send + Sync + 'static,
{
    summarizer: S,
    chunking: ChunkingConfig,
    max_concurrency: NonZeroUsize,
}

impl<S> SummaryPipeline<S>
where
    S: Summarizer + Send + Sync + 'static,
{
    pub fn chunking(&self) -> ChunkingConfig {
        self.chunking
    }

    pub fn max_concurrency(&self) -> NonZeroUsize {
        self.max_concurrency
    }

    /// Submits a single chunk. Summarizer failures are tagged with the chunk index.
    #[tracing::instrument(skip_all, fields(chunk_index = chunk.index, chunk_start = chunk.start, chunk_len = chunk.len))]
    async fn summarize_chunk(&self, chunk: &Chunk<'_>) -> Result<String, Error> {
        let response = self
            .summarizer
            .summarize(chunk.text)
            .await
            .map_err(|e| Error::Summarizer {
                chunk_index: chunk.index,
                message: e.to_string(),
            })
            .inspect_err(|e| tracing::error!(error = %e, "Failed to summarize chunk"))?;

        tracing::debug!(summary_len = response.summary.len(), "Chunk summarized");

        Ok(response.summary)
    }

    /// Summarizes every chunk, at most `max_concurrency` at a time, returning
    /// the partial summaries in chunk order.
    ///
    /// The first failure aborts the remaining chunks; nothing is retried.
    #[tracing::instrument(skip_all, fields(chunks = chunks.len()))]
    pub async fn submit_all(&self, chunks: &[Chunk<'_>]) -> Result<Vec<String>, Error> {
        // buffered yields in submission order regardless of completion order
        stream::iter(chunks.iter().map(|chunk| self.summarize_chunk(chunk)))
            .buffered(self.max_concurrency.get())
            .boxed()
            .try_collect()
            .await
    }

    #[tracing::instrument(skip_all, fields(transcript_len = transcript.len()))]
    pub async fn run(&self, transcript: &str) -> Result<String, Error> {
        if transcript.is_empty() {
            return Err(Error::MissingTranscript);
        }

        let chunks = self.chunking.split(transcript);
        tracing::info!(
            count = chunks.len(),
            model = S::SUMMARIZER_MODEL,
            max_concurrency = self.max_concurrency.get(),
            "Summarizing transcript chunks"
        );

        let partials = self.submit_all(&chunks).await?;

        let summary = formatter::reassemble(&partials);
        if summary.is_empty() {
            tracing::warn!("No sentence survived bullet formatting");
        }

        Ok(summary)
    }
}
