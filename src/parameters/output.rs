// Copyright (c) 2025 - Cowboy AI, Inc.
//! Output Value Object
//!
//! Descriptor of one result artifact produced by a compute service.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

use super::Reference;
use crate::codec::{self, Parameter, ParameterKind, WireCodec};
use crate::compat::{self, WireVariant};
use crate::errors::{ParameterError, ParameterResult};
use crate::identity;

/// Wire key of the media type
pub const MIME_TYPE_KEY: &str = "mime-type";

#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    id: String,
    uri: String,
    domain: Option<Reference>,
    mimetype: Option<String>,
}

#[derive(Deserialize)]
struct OutputFields {
    uri: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    domain: Option<String>,
    #[serde(default, rename = "mime-type")]
    mimetype: Option<String>,
}

impl Output {
    /// Output at `uri` with a generated id
    pub fn new(uri: impl Into<String>) -> ParameterResult<Self> {
        Self::builder().uri(uri).build()
    }

    pub fn builder() -> OutputBuilder {
        OutputBuilder::default()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn domain(&self) -> Option<&Reference> {
        self.domain.as_ref()
    }

    pub fn mimetype(&self) -> Option<&str> {
        self.mimetype.as_deref()
    }

    pub(crate) fn from_canonical(tree: &Value) -> ParameterResult<Self> {
        let fields: OutputFields = codec::decode_fields(ParameterKind::Output, tree)?;

        let mut builder = Self::builder().uri(fields.uri);
        if let Some(id) = fields.id {
            builder = builder.id(id);
        }
        if let Some(domain) = fields.domain {
            builder = builder.domain(domain);
        }
        if let Some(mimetype) = fields.mimetype {
            builder = builder.mimetype(mimetype);
        }
        builder.build()
    }
}

impl WireCodec for Output {
    const TYPE_NAME: &'static str = "Output";

    fn to_wire(&self) -> Value {
        let mut object = Map::new();
        object.insert("uri".to_string(), Value::String(self.uri.clone()));
        object.insert("id".to_string(), Value::String(self.id.clone()));
        if let Some(domain) = &self.domain {
            object.insert("domain".to_string(), Value::String(domain.resolve().to_string()));
        }
        if let Some(mimetype) = &self.mimetype {
            object.insert(MIME_TYPE_KEY.to_string(), Value::String(mimetype.clone()));
        }
        Value::Object(object)
    }

    fn from_wire(value: &Value) -> ParameterResult<Self> {
        Self::from_wire_as(value, compat::detect(value))
    }

    fn to_wire_as(&self, variant: WireVariant) -> Value {
        compat::emit(ParameterKind::Output, self.to_wire(), variant)
    }

    fn from_wire_as(value: &Value, variant: WireVariant) -> ParameterResult<Self> {
        let tree = compat::canonicalize(ParameterKind::Output, value, variant)?;
        Self::from_canonical(&tree)
    }

    fn displayed_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("uri", self.uri.clone()), ("id", self.id.clone())];
        if let Some(domain) = &self.domain {
            fields.push(("domain", domain.resolve().to_string()));
        }
        if let Some(mimetype) = &self.mimetype {
            fields.push((MIME_TYPE_KEY, mimetype.clone()));
        }
        fields
    }
}

impl Parameter for Output {
    const KIND: ParameterKind = ParameterKind::Output;

    fn key(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Builder for [`Output`]
#[derive(Debug, Default)]
pub struct OutputBuilder {
    id: Option<String>,
    uri: Option<String>,
    domain: Option<Reference>,
    mimetype: Option<String>,
}

impl OutputBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn domain(mut self, domain: impl Into<Reference>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn mimetype(mut self, mimetype: impl Into<String>) -> Self {
        self.mimetype = Some(mimetype.into());
        self
    }

    pub fn build(self) -> ParameterResult<Output> {
        let uri = self
            .uri
            .filter(|uri| !uri.is_empty())
            .ok_or(ParameterError::MissingIdentity {
                kind: "Output",
                field: "uri",
            })?;

        Ok(Output {
            id: self
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(identity::generate),
            uri,
            domain: self.domain,
            mimetype: self.mimetype.filter(|m| !m.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_output_compat_payload() {
        let data = json!({
            "uri": "http://test.org/output.nc",
            "id": "tas_avg_mon",
            "domain": {"id": "d0"},
            "mime-type": "x-application/netcdf"
        });

        let output = Output::from_wire(&data).unwrap();
        assert_eq!(output.uri(), "http://test.org/output.nc");
        assert_eq!(output.id(), "tas_avg_mon");
        assert_eq!(output.domain().unwrap().resolve(), "d0");
        assert_eq!(output.mimetype(), Some("x-application/netcdf"));
        assert_eq!(output.to_wire()["uri"], "http://test.org/output.nc");
    }

    #[test]
    fn test_output_accepts_mimetype_key() {
        let output = Output::from_wire(&json!({
            "uri": "http://test.org/output.nc",
            "mimetype": "application/x-netcdf"
        }))
        .unwrap();
        assert_eq!(output.mimetype(), Some("application/x-netcdf"));
        assert_eq!(output.to_wire()[MIME_TYPE_KEY], "application/x-netcdf");
    }

    #[test]
    fn test_output_generates_id() {
        let output = Output::new("http://test.org/output.nc").unwrap();
        assert!(identity::is_generated(output.id()));
        assert_eq!(
            output.to_wire(),
            json!({"uri": "http://test.org/output.nc", "id": output.id()})
        );
    }

    #[test]
    fn test_output_requires_uri() {
        assert_eq!(
            Output::builder().id("o0").build().unwrap_err(),
            ParameterError::MissingIdentity {
                kind: "Output",
                field: "uri"
            }
        );

        let result = Output::from_wire(&json!({"id": "o0"}));
        assert!(matches!(result, Err(ParameterError::Schema { kind: "Output", .. })));
    }

    #[test]
    fn test_output_round_trip() {
        let output = Output::builder()
            .id("tas_avg_mon")
            .uri("http://test.org/output.nc")
            .domain("d0")
            .mimetype("application/x-netcdf")
            .build()
            .unwrap();

        assert_eq!(Output::from_wire(&output.to_wire()).unwrap(), output);
        assert_eq!(
            output.describe(),
            "Output(uri='http://test.org/output.nc',id='tas_avg_mon',domain='d0',mime-type='application/x-netcdf')"
        );
    }
}
