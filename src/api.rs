//! Remote pricing-analysis API: the create-record and fetch-record
//! capabilities behind the submission and report flows.
//!
//! `RecordApi` is the seam the rest of the crate depends on; `HttpApi` is the
//! ureq implementation. Neither retries: retry policy, if any, belongs to
//! whoever owns the transport.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::FormState;

/// A persisted submission: the full nested form shape plus the
/// server-assigned identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub project_id: String,
    #[serde(flatten)]
    pub state: FormState,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    project_id: String,
}

/// Network or server failure on create or fetch.
#[derive(Debug, Error)]
#[error("transport failure: {message}")]
pub struct TransportError {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("record `{0}` not found")]
    NotFound(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub trait RecordApi {
    /// Persist a full form state, returning the server-assigned project id.
    fn create(&self, state: &FormState) -> Result<String, TransportError>;

    /// Fetch a persisted record by project id.
    fn fetch(&self, project_id: &str) -> Result<Record, FetchError>;
}

pub struct HttpApi {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpApi {
    pub fn new(base_url: &str) -> HttpApi {
        HttpApi {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::Agent::new_with_defaults(),
        }
    }

    fn records_url(&self) -> String {
        format!("{}/api/pricing-analysis", self.base_url)
    }
}

fn transport(err: ureq::Error) -> TransportError {
    TransportError {
        message: err.to_string(),
    }
}

impl RecordApi for HttpApi {
    fn create(&self, state: &FormState) -> Result<String, TransportError> {
        let url = self.records_url();
        tracing::debug!(%url, "create record");
        let mut response = self
            .agent
            .post(&url)
            .send_json(state)
            .map_err(transport)?;
        let created: CreateResponse = response.body_mut().read_json().map_err(transport)?;
        tracing::info!(project_id = %created.project_id, "record created");
        Ok(created.project_id)
    }

    fn fetch(&self, project_id: &str) -> Result<Record, FetchError> {
        let url = format!("{}/{}", self.records_url(), project_id);
        tracing::debug!(%url, "fetch record");
        let mut response = match self.agent.get(&url).call() {
            Ok(response) => response,
            Err(ureq::Error::StatusCode(404)) => {
                return Err(FetchError::NotFound(project_id.to_string()))
            }
            Err(err) => return Err(transport(err).into()),
        };
        let record: Record = response.body_mut().read_json().map_err(transport)?;
        Ok(record)
    }
}
