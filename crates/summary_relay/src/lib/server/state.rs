//! Application state shared across all request handlers.

use std::sync::Arc;

use summary_mailer::Mailer;

use crate::{Summarizer, SummaryPipeline};

/// Long-lived collaborators built once at process start.
pub struct AppState<S, M>
where
    S: Summarizer + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    pub pipeline: SummaryPipeline<S>,
    pub mailer: M,
}

impl<S, M> AppState<S, M>
where
    S: Summarizer + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    pub fn new(pipeline: SummaryPipeline<S>, mailer: M) -> Arc<Self> {
        Arc::new(Self { pipeline, mailer })
    }
}
