//! # Mailer Module
//!
//! This module provides functionality for delivering finished transcript
//! summaries to a recipient over SMTP.
//!
//! The module uses lettre's async SMTP transport and provides an abstraction
//! layer so request handlers can be exercised without a live mail server.

mod mailer;

pub use mailer::smtp::{SmtpConfig, SmtpMailer};
pub use mailer::{render_html_body, Mailer, SUMMARY_SUBJECT};
