// Copyright (c) 2025 - Cowboy AI, Inc.
//! Variable Value Object
//!
//! A named data source (URI) restricted to an optional domain. Its id is the
//! composite `"<var_name>|<name>"`, where `name` is generated unless the id
//! is given explicitly.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::Reference;
use crate::codec::{self, Parameter, ParameterKind, WireCodec};
use crate::compat::{self, WireVariant};
use crate::errors::{ParameterError, ParameterResult};
use crate::identity;

/// Separator between variable name and generated name in a variable id
pub const ID_SEPARATOR: char = '|';

/// Composite variable id `"<var_name>|<name>"`
///
/// # Invariants
/// - Exactly one separator
/// - Both halves non-empty
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableId {
    id: String,
    separator_at: usize,
}

impl VariableId {
    /// Parse a composite id, rejecting zero or several separators
    pub fn parse(id: &str) -> ParameterResult<Self> {
        let malformed = || ParameterError::MalformedIdentity {
            value: id.to_string(),
        };

        let separator_at = id.find(ID_SEPARATOR).ok_or_else(malformed)?;
        let (var_name, rest) = (&id[..separator_at], &id[separator_at + 1..]);
        if var_name.is_empty() || rest.is_empty() || rest.contains(ID_SEPARATOR) {
            return Err(malformed());
        }

        Ok(Self {
            id: id.to_string(),
            separator_at,
        })
    }

    /// Join a variable name and a name into an id
    pub fn compose(var_name: &str, name: &str) -> ParameterResult<Self> {
        if var_name.is_empty() {
            return Err(ParameterError::MissingIdentity {
                kind: "Variable",
                field: "var_name",
            });
        }
        Self::parse(&format!("{}{}{}", var_name, ID_SEPARATOR, name))
    }

    /// Id for `var_name` with a generated name
    pub fn generate(var_name: &str) -> ParameterResult<Self> {
        Self::compose(var_name, &identity::generate())
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }

    pub fn var_name(&self) -> &str {
        &self.id[..self.separator_at]
    }

    pub fn name(&self) -> &str {
        &self.id[self.separator_at + 1..]
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl FromStr for VariableId {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for VariableId {
    type Error = ParameterError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl AsRef<str> for VariableId {
    fn as_ref(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    uri: String,
    id: VariableId,
    domain: Option<Reference>,
}

#[derive(Deserialize)]
struct VariableFields {
    uri: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    var_name: Option<String>,
    #[serde(default)]
    domain: Option<String>,
}

impl Variable {
    /// Variable `var_name` at `uri` with a generated name
    pub fn new(uri: impl Into<String>, var_name: impl Into<String>) -> ParameterResult<Self> {
        Self::builder().uri(uri).var_name(var_name).build()
    }

    pub fn builder() -> VariableBuilder {
        VariableBuilder::default()
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    pub fn variable_id(&self) -> &VariableId {
        &self.id
    }

    pub fn var_name(&self) -> &str {
        self.id.var_name()
    }

    /// The name operations reference this variable by
    pub fn name(&self) -> &str {
        self.id.name()
    }

    pub fn domain(&self) -> Option<&Reference> {
        self.domain.as_ref()
    }

    pub(crate) fn from_canonical(tree: &Value) -> ParameterResult<Self> {
        let fields: VariableFields = codec::decode_fields(ParameterKind::Variable, tree)?;

        let mut builder = Self::builder().uri(fields.uri);
        if let Some(id) = fields.id {
            builder = builder.id(id);
        }
        if let Some(var_name) = fields.var_name {
            builder = builder.var_name(var_name);
        }
        if let Some(domain) = fields.domain {
            builder = builder.domain(domain);
        }
        builder.build()
    }
}

impl WireCodec for Variable {
    const TYPE_NAME: &'static str = "Variable";

    fn to_wire(&self) -> Value {
        let mut object = Map::new();
        object.insert("uri".to_string(), Value::String(self.uri.clone()));
        object.insert("id".to_string(), Value::String(self.id.to_string()));
        if let Some(domain) = &self.domain {
            object.insert("domain".to_string(), Value::String(domain.resolve().to_string()));
        }
        Value::Object(object)
    }

    fn from_wire(value: &Value) -> ParameterResult<Self> {
        Self::from_wire_as(value, compat::detect(value))
    }

    fn to_wire_as(&self, variant: WireVariant) -> Value {
        compat::emit(ParameterKind::Variable, self.to_wire(), variant)
    }

    fn from_wire_as(value: &Value, variant: WireVariant) -> ParameterResult<Self> {
        let tree = compat::canonicalize(ParameterKind::Variable, value, variant)?;
        Self::from_canonical(&tree)
    }

    fn displayed_fields(&self) -> Vec<(&'static str, String)> {
        vec![("id", self.id.to_string())]
    }
}

impl Parameter for Variable {
    const KIND: ParameterKind = ParameterKind::Variable;

    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Builder for [`Variable`]
///
/// An explicit id takes precedence over a variable name.
#[derive(Debug, Default)]
pub struct VariableBuilder {
    uri: Option<String>,
    var_name: Option<String>,
    id: Option<String>,
    domain: Option<Reference>,
}

impl VariableBuilder {
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn var_name(mut self, var_name: impl Into<String>) -> Self {
        self.var_name = Some(var_name.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<Reference>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn build(self) -> ParameterResult<Variable> {
        let uri = self.uri.ok_or(ParameterError::MissingIdentity {
            kind: "Variable",
            field: "uri",
        })?;

        let id = match (self.id.filter(|id| !id.is_empty()), self.var_name) {
            (Some(id), var_name) => {
                let id = VariableId::parse(&id)?;
                if let Some(var_name) = var_name.filter(|v| v != id.var_name()) {
                    debug!(var_name = %var_name, id = %id, "explicit id overrides variable name");
                }
                id
            }
            (None, Some(var_name)) => VariableId::generate(&var_name)?,
            (None, None) => {
                return Err(ParameterError::MissingIdentity {
                    kind: "Variable",
                    field: "id",
                })
            }
        };

        Ok(Variable {
            uri,
            id,
            domain: self.domain,
        })
    }
}
