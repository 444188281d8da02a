// Copyright (c) 2025 - Cowboy AI, Inc.
//! Wire Schema Compatibility Layer
//!
//! Two generations of compute services disagree on how the same parameter is
//! laid out in JSON. This module maps between them at the parse and emit
//! boundary only; once a value object is built it no longer knows which
//! shape it came from.
//!
//! # Variants
//!
//! ```text
//! Flat (canonical)                       ArrayWrapped (legacy)
//! ────────────────                       ─────────────────────
//! {"id": "d0",                           [{"name": "d0",
//!  "time": {"start": 0, ...}}              "dimensions": [{"name": "time", "start": 0, ...}]}]
//! {"uri": .., "id": "tas|v0"}            [{"name": "v0", "id": "tas|v0", "var_name": "tas", "uri": ..}]
//! {"name": .., "input": [..]}            [{"name": .., "inputs": [..]}]
//! {"uri": .., "mime-type": ..}           [{"uri": .., "name": .., "mimetype": ..}]
//! ```
//!
//! # Aliases
//!
//! Whatever the variant, the identity may arrive as `id` or `name`, an
//! operation's references as `input` or `inputs`, an output's media type as
//! `mime-type` or `mimetype`, and a reference as an id-object
//! (`{"id": "d0"}`). They are folded into the canonical key right after
//! parse. When both spellings are present the canonical one wins. A variable
//! that carries only its bare `name` and `var_name` gets its composite id
//! rebuilt from the two.
//!
//! Dimension order is significant in both shapes and survives every mapping.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::codec::ParameterKind;
use crate::errors::{ParameterError, ParameterResult};
use crate::parameters::ID_SEPARATOR;

/// Domain keys that never name a dimension
pub const DOMAIN_RESERVED_KEYS: [&str; 2] = ["id", "mask"];

/// Key holding the dimension list in the array-wrapped domain shape
pub const DIMENSIONS_KEY: &str = "dimensions";

/// Historical JSON shapes of the parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WireVariant {
    /// Flat, id-keyed objects; dimensions inlined by name
    #[default]
    Flat,
    /// Single-element arrays; dimensions listed under `dimensions`
    ArrayWrapped,
}

impl WireVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::ArrayWrapped => "array-wrapped",
        }
    }
}

impl fmt::Display for WireVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WireVariant {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flat" | "a" | "id-keyed" => Ok(Self::Flat),
            "array-wrapped" | "b" | "compat" => Ok(Self::ArrayWrapped),
            _ => Err(ParameterError::InvalidEnum {
                field: "wire variant",
                value: s.to_string(),
                allowed: "flat, array-wrapped",
            }),
        }
    }
}

/// Guess the variant of an incoming tree
///
/// Best effort: arrays are array-wrapped, anything else is flat.
pub fn detect(value: &Value) -> WireVariant {
    if value.is_array() {
        WireVariant::ArrayWrapped
    } else {
        WireVariant::Flat
    }
}

/// Map an incoming tree of `kind` in `variant` to the canonical flat shape
pub fn canonicalize(kind: ParameterKind, value: &Value, variant: WireVariant) -> ParameterResult<Value> {
    let object = match variant {
        WireVariant::Flat => value.as_object().cloned().ok_or_else(|| {
            ParameterError::schema(kind.as_str(), format!("expected an object, got {}", type_of(value)))
        })?,
        WireVariant::ArrayWrapped => unwrap_single(kind, value)?,
    };

    let object = match kind {
        ParameterKind::Dimension => object,
        ParameterKind::Domain => canonical_domain(object, variant)?,
        ParameterKind::Variable => canonical_variable(object),
        ParameterKind::Operation => canonical_operation(object),
        ParameterKind::Output => canonical_output(object),
    };

    Ok(Value::Object(object))
}

/// Map a canonical flat tree of `kind` to `variant`
pub fn emit(kind: ParameterKind, canonical: Value, variant: WireVariant) -> Value {
    let object = match (variant, canonical) {
        (WireVariant::Flat, tree) => return tree,
        (WireVariant::ArrayWrapped, Value::Object(object)) => object,
        (WireVariant::ArrayWrapped, other) => return Value::Array(vec![other]),
    };

    let object = match kind {
        ParameterKind::Dimension => object,
        ParameterKind::Domain => legacy_domain(object),
        ParameterKind::Variable => legacy_variable(object),
        ParameterKind::Operation => rename_key(object, "input", "inputs"),
        ParameterKind::Output => {
            let object = rename_key(object, "id", "name");
            rename_key(object, "mime-type", "mimetype")
        }
    };

    Value::Array(vec![Value::Object(object)])
}

/// Resolve a reference given either as a plain string or as an id-object
pub fn reference_token(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(object) => object
            .get("id")
            .or_else(|| object.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

fn unwrap_single(kind: ParameterKind, value: &Value) -> ParameterResult<Map<String, Value>> {
    match value {
        Value::Array(items) if items.len() == 1 => items[0].as_object().cloned().ok_or_else(|| {
            ParameterError::schema(
                kind.as_str(),
                format!("expected an object inside the array, got {}", type_of(&items[0])),
            )
        }),
        Value::Array(items) => Err(ParameterError::schema(
            kind.as_str(),
            format!("expected a single-element array, got {} elements", items.len()),
        )),
        other => Err(ParameterError::schema(
            kind.as_str(),
            format!("expected a single-element array, got {}", type_of(other)),
        )),
    }
}

fn canonical_domain(mut object: Map<String, Value>, variant: WireVariant) -> ParameterResult<Map<String, Value>> {
    if !object.contains_key("id") && object.get("name").is_some_and(Value::is_string) {
        object = rename_key(object, "name", "id");
    }

    let listed = object.get(DIMENSIONS_KEY).is_some_and(Value::is_array);
    if variant == WireVariant::Flat && !listed {
        // Anything but a list under "dimensions" is a dimension of that name.
        return Ok(object);
    }

    match object.shift_remove(DIMENSIONS_KEY) {
        Some(Value::Array(dimensions)) => {
            debug!(count = dimensions.len(), "folding dimension list into keyed domain");
            for dimension in dimensions {
                let (name, fields) = named_dimension(dimension)?;
                if DOMAIN_RESERVED_KEYS.contains(&name.as_str()) || object.contains_key(&name) {
                    return Err(ParameterError::schema(
                        "Domain",
                        format!("dimension '{}' is listed more than once or shadows a domain key", name),
                    ));
                }
                object.insert(name, Value::Object(fields));
            }
        }
        Some(other) => {
            return Err(ParameterError::schema(
                "Domain",
                format!("'{}' must be a list, got {}", DIMENSIONS_KEY, type_of(&other)),
            ))
        }
        None => {
            return Err(ParameterError::schema(
                "Domain",
                format!("missing '{}' list", DIMENSIONS_KEY),
            ))
        }
    }

    Ok(object)
}

fn named_dimension(value: Value) -> ParameterResult<(String, Map<String, Value>)> {
    let mut fields = match value {
        Value::Object(fields) => fields,
        other => {
            return Err(ParameterError::schema(
                "Domain",
                format!("dimension entries must be objects, got {}", type_of(&other)),
            ))
        }
    };

    match fields.shift_remove("name").or_else(|| fields.shift_remove("id")) {
        Some(Value::String(name)) => Ok((name, fields)),
        _ => Err(ParameterError::schema(
            "Domain",
            "dimension entry without a 'name'",
        )),
    }
}

fn canonical_variable(mut object: Map<String, Value>) -> Map<String, Value> {
    let composed = match (object.get("id"), object.get("name"), object.get("var_name")) {
        (None, Some(Value::String(name)), Some(Value::String(var_name))) if !name.contains(ID_SEPARATOR) => {
            Some(format!("{}{}{}", var_name, ID_SEPARATOR, name))
        }
        _ => None,
    };
    if let Some(id) = composed {
        debug!(id = %id, "composing variable id from var_name and name");
        object.insert("id".to_string(), Value::String(id));
    }

    let object = alias(object, "name", "id");
    resolve_reference_field(object, "domain")
}

fn canonical_operation(object: Map<String, Value>) -> Map<String, Value> {
    let object = alias(object, "id", "name");
    let mut object = alias(object, "inputs", "input");
    object = resolve_reference_field(object, "domain");

    if let Some(single) = object.get_mut("input").filter(|input| input.is_string()) {
        *single = Value::Array(vec![single.take()]);
    }
    if let Some(Value::Array(inputs)) = object.get_mut("input") {
        for input in inputs.iter_mut() {
            if input.is_object() {
                if let Some(token) = reference_token(input) {
                    *input = Value::String(token);
                }
            }
        }
    }

    object
}

fn canonical_output(object: Map<String, Value>) -> Map<String, Value> {
    let object = alias(object, "name", "id");
    let object = alias(object, "mimetype", "mime-type");
    resolve_reference_field(object, "domain")
}

/// Bare `name` and `var_name` next to the composite `id`
fn legacy_variable(object: Map<String, Value>) -> Map<String, Value> {
    let mut legacy = Map::new();
    if let Some((var_name, name)) = object
        .get("id")
        .and_then(Value::as_str)
        .and_then(|id| id.split_once(ID_SEPARATOR))
    {
        legacy.insert("name".to_string(), Value::String(name.to_string()));
        legacy.insert("var_name".to_string(), Value::String(var_name.to_string()));
    }
    legacy.extend(object);
    legacy
}

fn legacy_domain(object: Map<String, Value>) -> Map<String, Value> {
    let mut legacy = Map::new();
    let mut dimensions = Vec::new();

    for (key, value) in object {
        match key.as_str() {
            "id" => {
                legacy.insert("name".to_string(), value);
            }
            "mask" => {
                legacy.insert(key, value);
            }
            _ => {
                let mut fields = Map::new();
                fields.insert("name".to_string(), Value::String(key));
                if let Value::Object(dimension) = value {
                    fields.extend(dimension);
                }
                dimensions.push(Value::Object(fields));
            }
        }
    }

    legacy.insert(DIMENSIONS_KEY.to_string(), Value::Array(dimensions));
    legacy
}

/// Fold `from` into `to`; the canonical key wins when both are present
fn alias(mut object: Map<String, Value>, from: &str, to: &str) -> Map<String, Value> {
    if let Some(value) = object.shift_remove(from) {
        if object.contains_key(to) {
            debug!(alias = from, key = to, "dropping alias shadowed by canonical key");
        } else {
            debug!(alias = from, key = to, "canonicalizing alias key");
            object.insert(to.to_string(), value);
        }
    }
    object
}

fn rename_key(mut object: Map<String, Value>, from: &str, to: &str) -> Map<String, Value> {
    if let Some(value) = object.shift_remove(from) {
        object.insert(to.to_string(), value);
    }
    object
}

fn resolve_reference_field(mut object: Map<String, Value>, key: &str) -> Map<String, Value> {
    if let Some(value) = object.get_mut(key) {
        if value.is_object() {
            if let Some(token) = reference_token(value) {
                debug!(field = key, reference = %token, "resolving id-object reference");
                *value = Value::String(token);
            }
        }
    }
    object
}

fn type_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
