use std::sync::{Arc, Mutex};
use summary_mailer::Mailer;

#[derive(Clone, Default)]
pub struct MockMailer {
    /// (text, recipient) per successful send
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    pub fail_with: Option<String>,
}

impl MockMailer {
    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

impl Mailer for MockMailer {
    async fn send_summary(&self, text: &str, recipient: &str) -> anyhow::Result<()> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        self.sent
            .lock()
            .unwrap()
            .push((text.to_string(), recipient.to_string()));
        Ok(())
    }
}
