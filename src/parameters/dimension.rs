// Copyright (c) 2025 - Cowboy AI, Inc.
//! Dimension Value Object
//!
//! One axis subset of a [`Domain`](super::Domain), either a coordinate-value
//! range or an index range. The axis name is the key the owning domain keeps
//! the dimension under.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

use crate::codec::{self, ParameterKind, WireCodec};
use crate::compat::{self, WireVariant};
use crate::errors::{ParameterError, ParameterResult};

/// Coordinate reference of a dimension range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Crs {
    /// Range given in coordinate values
    #[default]
    Values,
    /// Range given in array indices
    Indices,
}

impl Crs {
    /// Accepted wire tokens
    pub const ALLOWED: &'static str = "values, indices";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Values => "values",
            Self::Indices => "indices",
        }
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Crs {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "values" => Ok(Self::Values),
            "indices" => Ok(Self::Indices),
            _ => Err(ParameterError::InvalidEnum {
                field: "crs",
                value: s.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

/// Axis subset `start..end` by `step`
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    start: f64,
    end: f64,
    step: f64,
    crs: Crs,
}

#[derive(Deserialize)]
struct DimensionFields {
    start: f64,
    end: f64,
    #[serde(default)]
    step: Option<f64>,
    #[serde(default)]
    crs: Option<String>,
}

impl Dimension {
    pub const DEFAULT_STEP: f64 = 1.0;

    /// Range `start..end` with the default step
    ///
    /// Coordinates must be finite; NaN and infinities have no wire form.
    pub fn new(start: f64, end: f64, crs: Crs) -> ParameterResult<Self> {
        Ok(Self {
            start: finite("start", start)?,
            end: finite("end", end)?,
            step: Self::DEFAULT_STEP,
            crs,
        })
    }

    /// Coordinate-value range
    pub fn values(start: f64, end: f64) -> ParameterResult<Self> {
        Self::new(start, end, Crs::Values)
    }

    /// Index range
    pub fn indices(start: f64, end: f64) -> ParameterResult<Self> {
        Self::new(start, end, Crs::Indices)
    }

    pub fn with_step(mut self, step: f64) -> ParameterResult<Self> {
        self.step = finite("step", step)?;
        Ok(self)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    /// Replace the coordinate reference from its wire token
    ///
    /// The dimension is left untouched when `value` is not a valid token.
    pub fn set_crs(&mut self, value: &str) -> ParameterResult<()> {
        self.crs = value.parse()?;
        Ok(())
    }

    pub(crate) fn from_canonical(tree: &Value) -> ParameterResult<Self> {
        let fields: DimensionFields = codec::decode_fields(ParameterKind::Dimension, tree)?;
        let crs = match fields.crs.as_deref() {
            None | Some("") => Crs::default(),
            Some(token) => token.parse()?,
        };

        Self::new(fields.start, fields.end, crs)?.with_step(fields.step.unwrap_or(Self::DEFAULT_STEP))
    }
}

fn finite(field: &'static str, value: f64) -> ParameterResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParameterError::InvalidNumber {
            field,
            value: value.to_string(),
        })
    }
}

impl WireCodec for Dimension {
    const TYPE_NAME: &'static str = "Dimension";

    fn to_wire(&self) -> Value {
        json!({
            "start": codec::number(self.start),
            "end": codec::number(self.end),
            "step": codec::number(self.step),
            "crs": self.crs.as_str(),
        })
    }

    fn from_wire(value: &Value) -> ParameterResult<Self> {
        Self::from_wire_as(value, compat::detect(value))
    }

    fn to_wire_as(&self, variant: WireVariant) -> Value {
        compat::emit(ParameterKind::Dimension, self.to_wire(), variant)
    }

    fn from_wire_as(value: &Value, variant: WireVariant) -> ParameterResult<Self> {
        let tree = compat::canonicalize(ParameterKind::Dimension, value, variant)?;
        Self::from_canonical(&tree)
    }

    fn displayed_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("start", self.start.to_string()),
            ("end", self.end.to_string()),
            ("step", self.step.to_string()),
            ("crs", self.crs.to_string()),
        ]
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}
