use std::{fmt::Display, future::Future};

use serde::Deserialize;

pub trait Summarizer {
    const SUMMARIZER_MODEL: &str;

    type Error: Display + Send;

    /// Summarizes a single chunk of text. An empty summary is a valid answer.
    fn summarize(
        &self,
        content: &str,
    ) -> impl Future<Output = Result<SummaryResponse, Self::Error>> + Send;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}
