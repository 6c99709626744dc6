use std::future::Future;

pub mod smtp;

/// Subject line of every summary email
pub const SUMMARY_SUBJECT: &str = "📄 Condensify AI Summary";

pub trait Mailer {
    fn send_summary(
        &self,
        text: &str,
        recipient: &str,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

impl<T: Mailer + Send + Sync> Mailer for &T {
    async fn send_summary(&self, text: &str, recipient: &str) -> anyhow::Result<()> {
        (**self).send_summary(text, recipient).await
    }
}

/// Wraps the summary in a styled `<pre>` block so bullet lines survive
/// HTML mail clients untouched.
pub fn render_html_body(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    format!(
        r#"<pre style="font-family: Helvetica, Arial, sans-serif; font-size: 15px; line-height: 1.6;">{escaped}</pre>"#
    )
}
