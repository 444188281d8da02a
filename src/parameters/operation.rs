// Copyright (c) 2025 - Cowboy AI, Inc.
//! Operation Value Object
//!
//! A named computation request over input variables within a domain,
//! producing a named result. The domain and inputs are [`Reference`]s and are
//! resolved to identity strings when the operation is serialized.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

use super::Reference;
use crate::codec::{self, Parameter, ParameterKind, WireCodec};
use crate::compat::{self, WireVariant};
use crate::errors::ParameterResult;
use crate::identity;

#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    name: String,
    domain: Option<Reference>,
    inputs: Vec<Reference>,
    result: String,
    axes: Option<Value>,
    bins: Option<Value>,
}

#[derive(Deserialize)]
struct OperationFields {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    input: Vec<String>,
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    axes: Option<Value>,
    #[serde(default)]
    bins: Option<Value>,
}

impl Operation {
    pub fn builder() -> OperationBuilder {
        OperationBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> Option<&Reference> {
        self.domain.as_ref()
    }

    pub fn inputs(&self) -> &[Reference] {
        &self.inputs
    }

    /// The domain reference resolved to its identity
    pub fn domain_id(&self) -> Option<&str> {
        self.domain.as_ref().map(Reference::resolve)
    }

    /// The input references resolved to their identities, in request order
    pub fn input_names(&self) -> Vec<&str> {
        self.inputs.iter().map(Reference::resolve).collect()
    }

    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn axes(&self) -> Option<&Value> {
        self.axes.as_ref()
    }

    pub fn bins(&self) -> Option<&Value> {
        self.bins.as_ref()
    }

    pub(crate) fn from_canonical(tree: &Value) -> ParameterResult<Self> {
        let fields: OperationFields = codec::decode_fields(ParameterKind::Operation, tree)?;

        let mut builder = Self::builder().inputs(fields.input);
        if let Some(name) = fields.name {
            builder = builder.name(name);
        }
        if let Some(domain) = fields.domain {
            builder = builder.domain(domain);
        }
        if let Some(result) = fields.result {
            builder = builder.result(result);
        }
        if let Some(axes) = fields.axes {
            builder = builder.axes(axes);
        }
        if let Some(bins) = fields.bins {
            builder = builder.bins(bins);
        }
        Ok(builder.build())
    }
}

impl WireCodec for Operation {
    const TYPE_NAME: &'static str = "Operation";

    /// `domain` is always present on the wire, `null` when unset
    fn to_wire(&self) -> Value {
        let mut object = Map::new();
        object.insert("name".to_string(), Value::String(self.name.clone()));
        object.insert(
            "domain".to_string(),
            self.domain_id()
                .map_or(Value::Null, |id| Value::String(id.to_string())),
        );
        object.insert(
            "input".to_string(),
            Value::Array(
                self.input_names()
                    .into_iter()
                    .map(|name| Value::String(name.to_string()))
                    .collect(),
            ),
        );
        object.insert("result".to_string(), Value::String(self.result.clone()));
        if let Some(axes) = &self.axes {
            object.insert("axes".to_string(), axes.clone());
        }
        if let Some(bins) = &self.bins {
            object.insert("bins".to_string(), bins.clone());
        }
        Value::Object(object)
    }

    fn from_wire(value: &Value) -> ParameterResult<Self> {
        Self::from_wire_as(value, compat::detect(value))
    }

    fn to_wire_as(&self, variant: WireVariant) -> Value {
        compat::emit(ParameterKind::Operation, self.to_wire(), variant)
    }

    fn from_wire_as(value: &Value, variant: WireVariant) -> ParameterResult<Self> {
        let tree = compat::canonicalize(ParameterKind::Operation, value, variant)?;
        Self::from_canonical(&tree)
    }

    fn displayed_fields(&self) -> Vec<(&'static str, String)> {
        vec![("name", self.name.clone())]
    }
}

impl Parameter for Operation {
    const KIND: ParameterKind = ParameterKind::Operation;

    fn key(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Builder for [`Operation`]
///
/// Name and result are generated when not given.
#[derive(Debug, Default)]
pub struct OperationBuilder {
    name: Option<String>,
    domain: Option<Reference>,
    inputs: Vec<Reference>,
    result: Option<String>,
    axes: Option<Value>,
    bins: Option<Value>,
}

impl OperationBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<Reference>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Append one input reference
    pub fn input(mut self, input: impl Into<Reference>) -> Self {
        self.inputs.push(input.into());
        self
    }

    /// Append input references in order
    pub fn inputs<I, R>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Reference>,
    {
        self.inputs.extend(inputs.into_iter().map(Into::into));
        self
    }

    pub fn result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    pub fn axes(mut self, axes: Value) -> Self {
        self.axes = Some(axes);
        self
    }

    pub fn bins(mut self, bins: Value) -> Self {
        self.bins = Some(bins);
        self
    }

    pub fn build(self) -> Operation {
        Operation {
            name: non_empty_or_generate(self.name),
            domain: self.domain,
            inputs: self.inputs,
            result: non_empty_or_generate(self.result),
            axes: self.axes.filter(|v| !v.is_null()),
            bins: self.bins.filter(|v| !v.is_null()),
        }
    }
}

fn non_empty_or_generate(value: Option<String>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(identity::generate)
}
