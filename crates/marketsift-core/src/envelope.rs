//! Response envelope carrying provenance alongside payloads.
//!
//! Every acquisition answer records which sources were consulted, in order,
//! and what each failed attempt looked like, so a caller can always tell
//! real data from synthesized data without inspecting the payload.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ProviderId, UtcDateTime, ValidationError};

/// Error surfaced by a failed provider attempt, kept on the envelope even
/// when a later source succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeError {
    pub code: String,
    pub message: String,
    pub retryable: bool,
    pub source: Option<ProviderId>,
}

impl EnvelopeError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        retryable: bool,
        source: Option<ProviderId>,
    ) -> Result<Self, ValidationError> {
        let code = code.into();
        let message = message.into();
        if code.trim().is_empty() {
            return Err(ValidationError::EmptyErrorCode);
        }
        if message.trim().is_empty() {
            return Err(ValidationError::EmptyErrorMessage);
        }
        Ok(Self {
            code,
            message,
            retryable,
            source,
        })
    }
}

/// Provenance metadata attached to every envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    pub request_id: String,
    pub generated_at: UtcDateTime,
    /// Sources consulted, in consultation order. Never empty; the last entry
    /// is the one that produced the payload.
    pub source_chain: Vec<ProviderId>,
    pub latency_ms: u64,
    pub cache_hit: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<EnvelopeError>,
}

impl EnvelopeMeta {
    pub fn new(
        request_id: impl Into<String>,
        source_chain: Vec<ProviderId>,
        latency_ms: u64,
        cache_hit: bool,
        errors: Vec<EnvelopeError>,
    ) -> Result<Self, ValidationError> {
        let request_id = request_id.into();
        if request_id.trim().len() < 8 {
            return Err(ValidationError::InvalidRequestId);
        }
        if source_chain.is_empty() {
            return Err(ValidationError::EmptySourceChain);
        }
        Ok(Self {
            request_id,
            generated_at: UtcDateTime::now(),
            source_chain,
            latency_ms,
            cache_hit,
            errors,
        })
    }

    /// The source that produced the payload.
    pub fn served_by(&self) -> ProviderId {
        *self
            .source_chain
            .last()
            .expect("source chain is validated non-empty")
    }
}

/// Fresh request identifier for one acquisition pass.
pub fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub meta: EnvelopeMeta,
    pub payload: T,
}

impl<T> Envelope<T> {
    pub fn new(meta: EnvelopeMeta, payload: T) -> Self {
        Self { meta, payload }
    }
}
