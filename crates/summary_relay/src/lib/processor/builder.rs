use std::num::NonZeroUsize;

use crate::{chunker::ChunkingConfig, error::Error, Summarizer, SummaryPipeline};

pub struct SummaryPipelineBuilder<S = ()> {
    summarizer: S,
    chunking: ChunkingConfig,
    max_concurrency: NonZeroUsize,
}

impl Default for SummaryPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryPipelineBuilder {
    pub fn new() -> Self {
        Self {
            summarizer: (),
            chunking: ChunkingConfig::default(),
            max_concurrency: NonZeroUsize::MIN,
        }
    }
}

impl<S> SummaryPipelineBuilder<S> {
    pub fn summarizer<S2: Summarizer + Send + Sync + 'static>(
        self,
        summarizer: S2,
    ) -> SummaryPipelineBuilder<S2> {
        SummaryPipelineBuilder {
            summarizer,
            chunking: self.chunking,
            max_concurrency: self.max_concurrency,
        }
    }

    pub fn chunking(mut self, chunking: ChunkingConfig) -> Self {
        self.chunking = chunking;
        self
    }

    /// Validates and sets the window size and overlap
    pub fn with_chunking(self, max_length: usize, overlap: usize) -> Result<Self, Error> {
        Ok(self.chunking(ChunkingConfig::new(max_length, overlap)?))
    }

    pub fn max_concurrency(mut self, max_concurrency: NonZeroUsize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// Same as [`Self::max_concurrency`] for callers holding a plain count
    pub fn with_max_concurrency(self, max_concurrency: usize) -> Result<Self, Error> {
        let max_concurrency = NonZeroUsize::new(max_concurrency).ok_or(Error::ZeroConcurrency)?;
        Ok(self.max_concurrency(max_concurrency))
    }
}

impl<S> SummaryPipelineBuilder<S>
where
    S: Summarizer + Send + Sync + 'static,
{
    pub fn build(self) -> SummaryPipeline<S> {
        SummaryPipeline {
            summarizer: self.summarizer,
            chunking: self.chunking,
            max_concurrency: self.max_concurrency,
        }
    }
}
