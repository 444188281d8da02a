// Copyright (c) 2025 - Cowboy AI, Inc.
//! WPS Embedding
//!
//! A serialized parameter travels to the compute service as the string value
//! of a complex process input declared as `application/json`. The execute
//! call itself belongs to the WPS client; this module only produces and
//! consumes the string payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::WireCodec;
use crate::errors::{ParameterError, ParameterResult};

/// Declared content type of every parameter payload
pub const JSON_MIME_TYPE: &str = "application/json";

/// Complex-typed process input carrying a JSON payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexInput {
    /// Process input identifier (`domain`, `variable`, `operation`, ...)
    pub identifier: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub value: String,
}

impl ComplexInput {
    /// Parse the payload back into a parameter
    pub fn parse<T: WireCodec>(&self) -> ParameterResult<T> {
        if self.mime_type != JSON_MIME_TYPE {
            return Err(ParameterError::schema(
                T::TYPE_NAME,
                format!("unsupported content type '{}'", self.mime_type),
            ));
        }
        T::from_payload(&self.value)
    }
}

/// Parameters that can be passed as a WPS process input
pub trait WpsParameter: WireCodec {
    /// JSON text of the canonical wire tree
    fn to_payload(&self) -> ParameterResult<String> {
        Ok(serde_json::to_string(&self.to_wire())?)
    }

    /// Parse JSON text produced by any supported wire variant
    fn from_payload(payload: &str) -> ParameterResult<Self> {
        if payload.trim().is_empty() {
            return Err(ParameterError::schema(Self::TYPE_NAME, "empty payload"));
        }
        let tree: Value = serde_json::from_str(payload)?;
        Self::from_wire(&tree)
    }

    fn to_complex_input(&self, identifier: impl Into<String>) -> ParameterResult<ComplexInput> {
        Ok(ComplexInput {
            identifier: identifier.into(),
            mime_type: JSON_MIME_TYPE.to_string(),
            value: self.to_payload()?,
        })
    }
}

impl<T: WireCodec> WpsParameter for T {}
