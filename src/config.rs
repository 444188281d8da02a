// Copyright (c) 2025 - Cowboy AI, Inc.
//! Codec configuration
//!
//! Incoming payloads from different service generations are structurally
//! ambiguous, so the variant to read and the variant to write are chosen by
//! the caller rather than guessed per call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::WireCodec;
use crate::collections::{Outputs, ProcessOutput, OUTPUT_IDENTIFIER};
use crate::compat::WireVariant;
use crate::errors::{ParameterError, ParameterResult};

/// Wire variant selection for reading and writing parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Variant of incoming trees; `None` detects the shape per tree
    pub read_variant: Option<WireVariant>,
    /// Variant of outgoing trees
    pub write_variant: WireVariant,
    /// Process output that carries the outputs payload
    pub output_identifier: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            read_variant: None,
            write_variant: WireVariant::Flat,
            output_identifier: OUTPUT_IDENTIFIER.to_string(),
        }
    }
}

impl CodecConfig {
    /// Read and write the same variant, without detection
    pub fn strict(variant: WireVariant) -> Self {
        Self {
            read_variant: Some(variant),
            write_variant: variant,
            ..Self::default()
        }
    }

    pub fn with_read_variant(mut self, variant: WireVariant) -> Self {
        self.read_variant = Some(variant);
        self
    }

    pub fn with_write_variant(mut self, variant: WireVariant) -> Self {
        self.write_variant = variant;
        self
    }

    pub fn with_output_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.output_identifier = identifier.into();
        self
    }

    pub fn encode<T: WireCodec>(&self, parameter: &T) -> Value {
        parameter.to_wire_as(self.write_variant)
    }

    pub fn decode<T: WireCodec>(&self, tree: &Value) -> ParameterResult<T> {
        match self.read_variant {
            Some(variant) => T::from_wire_as(tree, variant),
            None => T::from_wire(tree),
        }
    }

    pub fn encode_payload<T: WireCodec>(&self, parameter: &T) -> ParameterResult<String> {
        Ok(serde_json::to_string(&self.encode(parameter))?)
    }

    pub fn decode_payload<T: WireCodec>(&self, payload: &str) -> ParameterResult<T> {
        if payload.trim().is_empty() {
            return Err(ParameterError::schema(T::TYPE_NAME, "empty payload"));
        }
        let tree: Value = serde_json::from_str(payload)?;
        self.decode(&tree)
    }

    /// Extract [`Outputs`] from an executed process's outputs
    pub fn extract_outputs<P: ProcessOutput>(&self, outputs: &[P]) -> ParameterResult<Outputs> {
        Outputs::from_process_outputs_with(outputs, &self.output_identifier, self.read_variant)
    }
}
