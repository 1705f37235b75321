use crate::domain::{Attachment, Design, FormValues};
use std::time::Duration;
use tracing::info;

/// Everything a quote request carries: form values, the full design list
/// and the attached files.
#[derive(Debug, Clone)]
pub struct QuotePayload {
    pub form: FormValues,
    pub designs: Vec<Design>,
    pub attachments: Vec<Attachment>,
}

impl QuotePayload {
    pub fn designs_json(&self) -> String {
        serde_json::to_string(&self.designs).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Outbound submission seam. Success or failure is the only observable
/// contract; there is no response schema.
pub trait QuoteGateway: std::fmt::Debug {
    fn submit(&self, payload: &QuotePayload) -> Result<(), String>;
}

/// Stand-in for the real endpoint: waits a moment, then succeeds. Used
/// whenever no endpoint is configured.
#[derive(Debug)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    pub fn instant() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(400),
        }
    }
}

impl QuoteGateway for SimulatedGateway {
    fn submit(&self, payload: &QuotePayload) -> Result<(), String> {
        info!(
            designs = payload.designs.len(),
            files = payload.attachments.len(),
            "simulated quote submission"
        );
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        Ok(())
    }
}

/// Posts the quote request as multipart form data to a configured
/// endpoint. Field layout: the form fields as text parts, the design list
/// as a JSON text part named `designs`, and the raw files as `file-N`
/// parts.
#[derive(Debug)]
pub struct HttpGateway {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpGateway {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Reads the endpoint from `DEVIS_ENDPOINT`, if set.
    pub fn from_env() -> Option<Self> {
        std::env::var("DEVIS_ENDPOINT").ok().map(Self::new)
    }
}

impl QuoteGateway for HttpGateway {
    fn submit(&self, payload: &QuotePayload) -> Result<(), String> {
        let values = &payload.form;
        let mut form = reqwest::blocking::multipart::Form::new()
            .text("name", values.name.clone())
            .text("email", values.email.clone())
            .text("phone", values.phone.clone())
            .text("company", values.company.clone())
            .text("productName", values.product_name.clone())
            .text("quantity", values.quantity.clone())
            .text("size", values.size.clone())
            .text("description", values.description.clone())
            .text("deadline", values.deadline.clone())
            .text("additionalNotes", values.additional_notes.clone())
            .text("designs", payload.designs_json());

        for (index, attachment) in payload.attachments.iter().enumerate() {
            form = form
                .file(format!("file-{}", index), &attachment.path)
                .map_err(|e| format!("{}: {}", attachment.name, e))?;
        }

        info!(endpoint = %self.endpoint, "posting quote request");
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .map_err(|e| e.to_string())?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(format!("server returned {}", response.status()))
        }
    }
}
