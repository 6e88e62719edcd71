//! Lead submission client.
//!
//! Quote and contact requests post form-encoded to the dealership
//! backend. A failed submission never surfaces to the page beyond a log
//! line; the form simply stays as the visitor left it.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Lead submission errors
#[derive(Error, Debug)]
pub enum LeadError {
    #[error("invalid leads endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("lead submission failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("backend rejected the lead")]
    Rejected,
}

pub type LeadResult<T> = Result<T, LeadError>;

/// Form fields the backend expects for a new lead.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LeadPayload {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub truck_id: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct LeadResponse {
    success: bool,
}

/// Client for the leads endpoint
pub struct LeadService {
    client: reqwest::Client,
    endpoint: Url,
}

impl LeadService {
    pub fn new(base_url: &str, path: &str) -> LeadResult<Self> {
        let endpoint = Url::parse(base_url)?.join(path)?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Submit a validated lead payload.
    pub async fn submit(&self, payload: &LeadPayload) -> LeadResult<()> {
        let response: LeadResponse = self
            .client
            .post(self.endpoint.clone())
            .form(payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.success {
            return Err(LeadError::Rejected);
        }
        tracing::info!("lead submitted for {}", payload.customer_name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_field_set_matches_backend_form() {
        let payload = LeadPayload {
            customer_name: "Dana Alvarez".to_string(),
            email: "dana@example.com".to_string(),
            phone: "5551234567".to_string(),
            truck_id: "bbq-18ft".to_string(),
            message: "Interested in financing".to_string(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        let object = value.as_object().unwrap();
        for field in ["customer_name", "email", "phone", "truck_id", "message"] {
            assert!(object.contains_key(field), "missing form field {field}");
        }
        assert_eq!(object.len(), 5);
    }

    #[test]
    fn test_response_decoding() {
        let ok: LeadResponse = serde_json::from_str(r#"{"success": true, "lead": {}}"#).unwrap();
        assert!(ok.success);
        let rejected: LeadResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!rejected.success);
    }
}
