//! # Notifier Module
//!
//! Delivers a batch of recommended postings. `Mailer` renders the batch with
//! a handlebars template and sends it as an HTML mail through any lettre
//! async transport; `Mailer::smtp` wires it to an authenticated SMTP relay.

use std::future::Future;
use std::path::Path;

use handlebars::Handlebars;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde_json::json;
use thiserror::Error;
use tracing::{info, instrument};

use crate::config::{Config, MailConfig};
use crate::error::Error as CrateError;
use crate::posting::Posting;

const TEMPLATE_NAME: &str = "email";

/// Errors raised while preparing or delivering a notification
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Failed to read template: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid template: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    #[error("Failed to render template: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP setup failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Delivery failed: {0}")]
    Transport(String),
}

impl From<NotifyError> for CrateError {
    fn from(err: NotifyError) -> Self {
        CrateError::Notify(err.to_string())
    }
}

/// Delivers batches of recommended postings
pub trait Notifier {
    /// Deliver one batch; callers never pass an empty batch
    fn notify(&self, batch: &[Posting]) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// SMTP host and whether it expects implicit TLS, for a service name
pub fn smtp_host(service: &str) -> (String, bool) {
    match service.trim().to_ascii_lowercase().as_str() {
        "gmail" => ("smtp.gmail.com".to_string(), true),
        "outlook" | "hotmail" | "outlook365" => ("smtp-mail.outlook.com".to_string(), false),
        "yahoo" => ("smtp.mail.yahoo.com".to_string(), true),
        "icloud" => ("smtp.mail.me.com".to_string(), false),
        _ => (service.trim().to_string(), true),
    }
}

/// Mail notifier over a lettre transport
pub struct Mailer<T> {
    transport: T,
    templates: Handlebars<'static>,
    from: Mailbox,
    to: Mailbox,
    subject: String,
}

impl<T> std::fmt::Debug for Mailer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mailer")
            .field("from", &self.from.to_string())
            .field("to", &self.to.to_string())
            .field("subject", &self.subject)
            .finish()
    }
}

impl<T> Mailer<T> {
    /// Create a mailer using the template file named in `mail`
    pub fn new(transport: T, mail: &MailConfig) -> Result<Self, NotifyError> {
        let template = std::fs::read_to_string(Path::new(&mail.template_path))?;
        Self::with_template(transport, mail, &template)
    }

    /// Create a mailer from template source
    pub fn with_template(transport: T, mail: &MailConfig, template: &str) -> Result<Self, NotifyError> {
        let mut templates = Handlebars::new();
        templates
            .register_template_string(TEMPLATE_NAME, template)
            .map_err(Box::new)?;

        Ok(Self {
            transport,
            templates,
            from: Mailbox::new(Some(mail.from_name.clone()), mail.user.parse()?),
            to: mail.to.parse()?,
            subject: mail.subject.clone(),
        })
    }

    /// Render the HTML body for a batch
    pub fn render(&self, batch: &[Posting]) -> Result<String, NotifyError> {
        Ok(self.templates.render(TEMPLATE_NAME, &json!({ "posts": batch }))?)
    }

    /// Build the message for a batch
    pub fn compose(&self, batch: &[Posting]) -> Result<Message, NotifyError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(self.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(self.render(batch)?)?;

        Ok(message)
    }
}

impl Mailer<AsyncSmtpTransport<Tokio1Executor>> {
    /// Create a mailer delivering through the configured SMTP service
    pub fn smtp(config: &Config) -> Result<Self, NotifyError> {
        let mail = &config.mail;
        let (host, implicit_tls) = smtp_host(&mail.service);
        let builder = if implicit_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host)?
        };
        let transport = builder
            .credentials(Credentials::new(mail.user.clone(), mail.pass.clone()))
            .build();

        info!("Mail will be delivered through {}", host);
        Self::new(transport, mail)
    }
}

impl<T> Notifier for Mailer<T>
where
    T: AsyncTransport + Send + Sync,
    T::Error: std::fmt::Display,
{
    #[instrument(skip(self, batch), fields(count = batch.len()))]
    async fn notify(&self, batch: &[Posting]) -> Result<(), NotifyError> {
        let message = self.compose(batch)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        info!("Sent {} recommendations to {}", batch.len(), self.to);
        Ok(())
    }
}
