//! EmailJS relay client
//!
//! Forwards stored contact messages to the EmailJS REST API so the site
//! owner gets an email for every submission.
//!
//! Request shape (`POST /api/v1.0/email/send`):
//! `{service_id, template_id, user_id, accessToken?, template_params}`

use folio_common::config::EmailSettings;
use folio_common::db::Contact;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Relay errors
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("EmailJS error {0}: {1}")]
    Api(u16, String),

    #[error("Relay not configured: {0}")]
    NotConfigured(&'static str),
}

/// Template variables; names match the EmailJS template fields
#[derive(Debug, Serialize, PartialEq)]
pub struct TemplateParams<'a> {
    pub name: &'a str,
    #[serde(rename = "Email")]
    pub email: &'a str,
    pub from_name: &'a str,
    pub from_email: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: TemplateParams<'a>,
}

/// EmailJS API client
#[derive(Debug)]
pub struct EmailRelay {
    http_client: reqwest::Client,
    endpoint: String,
    service_id: String,
    template_id: String,
    public_key: String,
    private_key: Option<String>,
}

impl EmailRelay {
    /// Build a relay from settings; fails if any required id is missing
    pub fn new(settings: &EmailSettings) -> Result<Self, RelayError> {
        let required = |value: &Option<String>, name: &'static str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or(RelayError::NotConfigured(name))
        };

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RelayError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: settings.endpoint().to_string(),
            service_id: required(&settings.service_id, "service_id")?,
            template_id: required(&settings.template_id, "template_id")?,
            public_key: required(&settings.public_key, "public_key")?,
            private_key: settings.private_key.clone().filter(|k| !k.is_empty()),
        })
    }

    /// `Some(relay)` when every required setting is present
    pub fn from_settings(settings: &EmailSettings) -> Result<Option<Self>, RelayError> {
        if !settings.is_enabled() {
            return Ok(None);
        }
        Self::new(settings).map(Some)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body<'a>(&'a self, contact: &'a Contact) -> SendRequest<'a> {
        SendRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            access_token: self.private_key.as_deref(),
            template_params: template_params(contact),
        }
    }

    /// Send one contact message through EmailJS
    pub async fn relay(&self, contact: &Contact) -> Result<(), RelayError> {
        tracing::debug!(contact_id = %contact.id, endpoint = %self.endpoint, "Relaying contact message");

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&self.request_body(contact))
            .send()
            .await
            .map_err(|e| RelayError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // EmailJS answers errors with a plain-text reason
            let text = response.text().await.unwrap_or_default();
            return Err(RelayError::Api(status.as_u16(), text));
        }

        Ok(())
    }
}

/// Map a contact onto the template fields
pub fn template_params(contact: &Contact) -> TemplateParams<'_> {
    TemplateParams {
        name: &contact.name,
        email: &contact.email,
        from_name: &contact.name,
        from_email: &contact.email,
        subject: &contact.subject,
        message: &contact.message,
    }
}
