// Copyright (c) 2025 - Cowboy AI, Inc.
//! Value Object Codec Protocol
//!
//! Every parameter and every parameter collection converts to and from a JSON
//! tree through [`WireCodec`]. The canonical tree is the flat, id-keyed shape
//! ([`WireVariant::Flat`]); the `*_as` methods go through the compatibility
//! layer for the array-wrapped shape.
//!
//! # Laws
//!
//! - `to_wire` is a pure function of the current fields and never mutates
//! - `from_wire(&x.to_wire()) == x` for every valid `x`
//! - `from_wire` rejects a tree missing a mandatory field instead of
//!   defaulting it
//!
//! [`WireVariant::Flat`]: crate::compat::WireVariant::Flat

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use crate::compat::WireVariant;
use crate::errors::{ParameterError, ParameterResult};

/// The value-object types that travel on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    Dimension,
    Domain,
    Variable,
    Operation,
    Output,
}

impl ParameterKind {
    /// Type name used in descriptions and errors
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dimension => "Dimension",
            Self::Domain => "Domain",
            Self::Variable => "Variable",
            Self::Operation => "Operation",
            Self::Output => "Output",
        }
    }

    /// Type name of the ordered collection of this kind
    pub const fn collection_name(&self) -> &'static str {
        match self {
            Self::Dimension => "Dimensions",
            Self::Domain => "Domains",
            Self::Variable => "Variables",
            Self::Operation => "Operations",
            Self::Output => "Outputs",
        }
    }

    /// Field name a collection of this kind displays its member keys under
    pub const fn collection_field(&self) -> &'static str {
        match self {
            Self::Dimension => "dimensions",
            Self::Domain => "domains",
            Self::Variable => "variables",
            Self::Operation => "operations",
            Self::Output => "outputs",
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shared JSON codec contract for parameters and parameter collections
pub trait WireCodec: Sized {
    /// Name shown by [`WireCodec::describe`]
    const TYPE_NAME: &'static str;

    /// Serialize to the canonical (flat) wire tree
    fn to_wire(&self) -> Value;

    /// Parse a wire tree
    ///
    /// The shape is detected on a best-effort basis: arrays are read as the
    /// array-wrapped variant, objects as the flat variant. Use
    /// [`WireCodec::from_wire_as`] when the producer is known.
    fn from_wire(value: &Value) -> ParameterResult<Self>;

    /// Serialize to the given wire variant
    fn to_wire_as(&self, variant: WireVariant) -> Value;

    /// Parse a tree that is known to be in the given wire variant
    fn from_wire_as(value: &Value, variant: WireVariant) -> ParameterResult<Self>;

    /// The field subset shown by [`WireCodec::describe`]
    fn displayed_fields(&self) -> Vec<(&'static str, String)>;

    /// Human-readable form for diagnostics; never parsed back
    fn describe(&self) -> String {
        describe(Self::TYPE_NAME, &self.displayed_fields())
    }
}

/// A single value object that can live in a [`ParameterList`]
///
/// [`ParameterList`]: crate::collections::ParameterList
pub trait Parameter: WireCodec {
    const KIND: ParameterKind;

    /// The identity a collection lists this member under
    fn key(&self) -> &str;
}

/// Render `Type(key='value',...)`
pub fn describe(type_name: &str, fields: &[(&'static str, String)]) -> String {
    let params = fields
        .iter()
        .map(|(key, value)| format!("{}='{}'", key, value))
        .collect::<Vec<_>>()
        .join(",");
    format!("{}({})", type_name, params)
}

/// Decode the field struct of a canonical tree, reporting failures as schema errors
pub(crate) fn decode_fields<T: DeserializeOwned>(kind: ParameterKind, tree: &Value) -> ParameterResult<T> {
    T::deserialize(tree).map_err(|e| ParameterError::schema(kind.as_str(), e.to_string()))
}

/// JSON number for a coordinate, keeping integral values as integers
pub(crate) fn number(value: f64) -> Value {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    if value.fract() == 0.0 && value.abs() < MAX_EXACT {
        Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}
