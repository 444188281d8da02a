// Copyright (c) 2025 - Cowboy AI, Inc.
//! Parameter Collections
//!
//! Ordered sequences of one parameter type. A collection serializes to the
//! JSON array of its members' trees; order is the request order and is kept
//! through a round trip. Members are never deduplicated.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::ops::Index;
use tracing::{debug, warn};

use crate::codec::{Parameter, WireCodec};
use crate::compat::{self, WireVariant};
use crate::errors::{ParameterError, ParameterResult};
use crate::parameters::{Domain, Operation, Output, Variable};

/// Identifier of the process output that carries the outputs payload
pub const OUTPUT_IDENTIFIER: &str = "output";

/// Ordered collection of parameters of one kind
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterList<T> {
    items: Vec<T>,
}

pub type Variables = ParameterList<Variable>;
pub type Domains = ParameterList<Domain>;
pub type Operations = ParameterList<Operation>;
pub type Outputs = ParameterList<Output>;

impl<T> ParameterList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T: Parameter> ParameterList<T> {
    /// Member keys in order
    pub fn keys(&self) -> Vec<&str> {
        self.items.iter().map(Parameter::key).collect()
    }

    /// First member listed under `key`
    pub fn find(&self, key: &str) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }
}

impl<T: Parameter> WireCodec for ParameterList<T> {
    const TYPE_NAME: &'static str = T::KIND.collection_name();

    fn to_wire(&self) -> Value {
        Value::Array(self.items.iter().map(WireCodec::to_wire).collect())
    }

    fn from_wire(value: &Value) -> ParameterResult<Self> {
        parse_members(value, T::from_wire)
    }

    fn to_wire_as(&self, variant: WireVariant) -> Value {
        Value::Array(self.items.iter().map(|item| item.to_wire_as(variant)).collect())
    }

    fn from_wire_as(value: &Value, variant: WireVariant) -> ParameterResult<Self> {
        parse_members(value, |member| T::from_wire_as(member, variant))
    }

    fn displayed_fields(&self) -> Vec<(&'static str, String)> {
        vec![(T::KIND.collection_field(), format!("[{}]", self.keys().join(", ")))]
    }
}

fn parse_members<T, F>(value: &Value, parse: F) -> ParameterResult<ParameterList<T>>
where
    T: Parameter,
    F: Fn(&Value) -> ParameterResult<T>,
{
    let members = value.as_array().ok_or_else(|| {
        ParameterError::schema(
            T::KIND.collection_name(),
            "expected an array of parameters",
        )
    })?;

    let items = members
        .iter()
        .enumerate()
        .map(|(index, member)| {
            parse(member).map_err(|err| {
                debug!(index, error = %err, "rejecting {} member", T::KIND);
                err
            })
        })
        .collect::<ParameterResult<Vec<T>>>()?;

    Ok(ParameterList::new(items))
}

impl<T: Parameter> fmt::Display for ParameterList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

impl<T> Default for ParameterList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> From<Vec<T>> for ParameterList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for ParameterList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for ParameterList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ParameterList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> Index<usize> for ParameterList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

/// One named output of an executed process, as the WPS client reports it
pub trait ProcessOutput {
    fn identifier(&self) -> &str;

    /// Literal data items; the first one carries the JSON payload
    fn data(&self) -> &[String];
}

/// Plain [`ProcessOutput`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutput {
    pub identifier: String,
    #[serde(default)]
    pub data: Vec<String>,
}

impl ExecutionOutput {
    pub fn new(identifier: impl Into<String>, data: Vec<String>) -> Self {
        Self {
            identifier: identifier.into(),
            data,
        }
    }
}

impl ProcessOutput for ExecutionOutput {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn data(&self) -> &[String] {
        &self.data
    }
}

impl ParameterList<Output> {
    /// Extract the outputs payload from the process output named `"output"`
    ///
    /// No such output yields an empty collection.
    pub fn from_process_outputs<P: ProcessOutput>(outputs: &[P]) -> ParameterResult<Self> {
        Self::from_process_outputs_with(outputs, OUTPUT_IDENTIFIER, None)
    }

    /// Extract the outputs payload from the process output named `identifier`
    ///
    /// The payload is read as YAML flow text, so both JSON and single-quoted
    /// payloads are accepted. With `variant` unset the payload shape is
    /// detected per member.
    pub fn from_process_outputs_with<P: ProcessOutput>(
        outputs: &[P],
        identifier: &str,
        variant: Option<WireVariant>,
    ) -> ParameterResult<Self> {
        let Some(output) = outputs.iter().find(|o| o.identifier() == identifier) else {
            warn!(identifier, available = outputs.len(), "no process output carries the outputs payload");
            return Ok(Self::default());
        };

        let payload = output.data().first().ok_or_else(|| {
            ParameterError::schema(
                "Outputs",
                format!("process output '{}' carries no data", identifier),
            )
        })?;

        // YAML flow text; plain JSON parses the same way.
        let tree: Value = serde_yaml::from_str(payload)?;
        match variant {
            Some(variant) => Self::from_wire_as(&tree, variant),
            None => Self::from_wire(&tree),
        }
    }
}

/// Best-effort guess of the variant a collection payload was written in
///
/// Looks at the first member; an empty collection reads as flat.
pub fn detect_members(value: &Value) -> WireVariant {
    value
        .as_array()
        .and_then(|members| members.first())
        .map_or(WireVariant::Flat, compat::detect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::Dimension;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn tas() -> Variable {
        Variable::builder()
            .uri("http://data.test.org/tas.nc")
            .id("tas|v0")
            .build()
            .unwrap()
    }

    fn pr() -> Variable {
        Variable::builder()
            .uri("http://data.test.org/pr.nc")
            .id("pr|v1")
            .build()
            .unwrap()
    }

    #[test]
    fn test_variables_round_trip_preserves_order() {
        let variables = Variables::new(vec![pr(), tas(), pr()]);
        let parsed = Variables::from_wire(&variables.to_wire()).unwrap();

        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed.keys(), vec!["pr|v1", "tas|v0", "pr|v1"]);
        assert_eq!(parsed, variables);
    }

    #[test]
    fn test_variables_describe_lists_ids() {
        let variables = Variables::new(vec![tas(), pr()]);
        assert_eq!(
            variables.to_string(),
            "Variables(variables='[tas|v0, pr|v1]')"
        );
    }

    #[test]
    fn test_domains_round_trip() {
        let d0 = Domain::new([("time", Dimension::indices(0.0, 1.0).unwrap())]).unwrap();
        let domains = Domains::new(vec![d0.clone()]);

        let parsed = Domains::from_wire(&domains.to_wire()).unwrap();
        assert_eq!(parsed[0].id(), d0.id());
        assert!(domains.describe().contains(d0.id()));
    }

    #[test]
    fn test_operations_round_trip() {
        let operation = Operation::builder().name("subset").domain("d0").input("tas").build();
        let operations: Operations = vec![operation.clone()].into();

        let parsed = Operations::from_wire(&operations.to_wire()).unwrap();
        assert_eq!(parsed[0].name(), "subset");
        assert_eq!(parsed.find("subset"), Some(&operation));
        assert_eq!(operations.to_string(), "Operations(operations='[subset]')");
    }

    #[test]
    fn test_collection_rejects_non_array() {
        let result = Variables::from_wire(&json!({"uri": "a", "id": "tas|v0"}));
        assert!(matches!(
            result,
            Err(ParameterError::Schema { kind: "Variables", .. })
        ));
    }

    #[test]
    fn test_collection_fails_on_bad_member() {
        let result = Variables::from_wire(&json!([
            {"uri": "a", "id": "tas|v0"},
            {"uri": "b", "id": "broken"}
        ]));
        assert!(matches!(result, Err(ParameterError::MalformedIdentity { .. })));
    }

    #[test]
    fn test_collection_array_wrapped_round_trip() {
        let variables = Variables::new(vec![tas(), pr()]);
        let legacy = variables.to_wire_as(WireVariant::ArrayWrapped);

        assert_eq!(
            legacy[0],
            json!([{"uri": "http://data.test.org/tas.nc", "name": "v0", "id": "tas|v0", "var_name": "tas"}])
        );
        assert_eq!(detect_members(&legacy), WireVariant::ArrayWrapped);
        assert_eq!(
            Variables::from_wire_as(&legacy, WireVariant::ArrayWrapped).unwrap(),
            variables
        );
        assert_eq!(Variables::from_wire(&legacy).unwrap(), variables);
    }

    #[test]
    fn test_outputs_from_process_outputs() {
        let payload = json!([{"uri": "http://test.org/output.nc", "id": "tas_avg_mon"}]).to_string();
        let process_outputs = vec![
            ExecutionOutput::new("log", vec!["done".to_string()]),
            ExecutionOutput::new(OUTPUT_IDENTIFIER, vec![payload]),
        ];

        let outputs = Outputs::from_process_outputs(&process_outputs).unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].uri(), "http://test.org/output.nc");
        assert_eq!(outputs.to_string(), "Outputs(outputs='[tas_avg_mon]')");
    }

    #[test]
    fn test_outputs_without_matching_process_output() {
        let process_outputs = vec![ExecutionOutput::new("log", vec!["done".to_string()])];
        let outputs = Outputs::from_process_outputs(&process_outputs).unwrap();
        assert!(outputs.is_empty());
    }

    #[test]
    fn test_outputs_with_empty_data_is_schema_error() {
        let process_outputs = vec![ExecutionOutput::new(OUTPUT_IDENTIFIER, vec![])];
        assert!(matches!(
            Outputs::from_process_outputs(&process_outputs),
            Err(ParameterError::Schema { kind: "Outputs", .. })
        ));
    }

    #[test]
    fn test_outputs_with_invalid_json_payload() {
        let process_outputs = vec![ExecutionOutput::new(OUTPUT_IDENTIFIER, vec!["[{".to_string()])];
        assert!(matches!(
            Outputs::from_process_outputs(&process_outputs),
            Err(ParameterError::Serialization(_))
        ));
    }

    #[test]
    fn test_outputs_from_single_quoted_payload() {
        let payload = "[{'uri': 'http://test.org/output.nc', 'id': 'tas_avg_mon', 'mime-type': 'application/x-netcdf'}]";
        let process_outputs = vec![ExecutionOutput::new(OUTPUT_IDENTIFIER, vec![payload.to_string()])];

        let outputs = Outputs::from_process_outputs(&process_outputs).unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].id(), "tas_avg_mon");
        assert_eq!(outputs[0].mimetype(), Some("application/x-netcdf"));
    }
}
