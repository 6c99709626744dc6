use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use summary_relay::{Summarizer, SummaryResponse};

#[derive(Clone)]
pub struct MockSummarizer {
    pub summary: String,
    pub calls: Arc<Mutex<Vec<String>>>,
    /// Per-call replies by call number; calls past the end get `summary`
    pub script: Vec<Result<String, String>>,
    /// Number each reply with its call number instead of using `summary`
    pub numbered: bool,
    /// Per-call latency by call number
    pub delays_ms: Vec<u64>,
    pub in_flight: Arc<AtomicUsize>,
    pub peak_in_flight: Arc<AtomicUsize>,
    /// Calls already in flight when each call started, by call number
    pub in_flight_at_start: Arc<Mutex<Vec<usize>>>,
}

impl MockSummarizer {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            script: Vec::new(),
            numbered: false,
            delays_ms: Vec::new(),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak_in_flight: Arc::new(AtomicUsize::new(0)),
            in_flight_at_start: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Replies "Point N was discussed." for the Nth call (1-based)
    pub fn numbered() -> Self {
        Self {
            numbered: true,
            ..Self::new("")
        }
    }

    pub fn scripted(script: Vec<Result<&str, &str>>) -> Self {
        Self {
            script: script
                .into_iter()
                .map(|r| r.map(str::to_string).map_err(str::to_string))
                .collect(),
            ..Self::new("")
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self::scripted(vec![Err(msg)])
    }

    pub fn with_delays(mut self, delays_ms: Vec<u64>) -> Self {
        self.delays_ms = delays_ms;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Summarizer for MockSummarizer {
    const SUMMARIZER_MODEL: &'static str = "mock-bart";
    type Error = anyhow::Error;

    async fn summarize(&self, content: &str) -> Result<SummaryResponse, Self::Error> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(content.to_string());
            calls.len() - 1
        };

        let already = self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.peak_in_flight.fetch_max(already + 1, Ordering::SeqCst);
        self.in_flight_at_start.lock().unwrap().push(already);

        if let Some(delay) = self.delays_ms.get(call) {
            tokio::time::sleep(Duration::from_millis(*delay)).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some(reply) = self.script.get(call) {
            return match reply {
                Ok(summary) => Ok(SummaryResponse {
                    summary: summary.clone(),
                }),
                Err(msg) => Err(anyhow::anyhow!("{}", msg)),
            };
        }

        let summary = if self.numbered {
            format!("Point {} was discussed.", call + 1)
        } else {
            self.summary.clone()
        };

        Ok(SummaryResponse { summary })
    }
}
