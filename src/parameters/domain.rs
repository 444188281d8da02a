// Copyright (c) 2025 - Cowboy AI, Inc.
//! Domain Value Object
//!
//! A named bounding region made of zero or more [`Dimension`]s keyed by axis
//! name, plus an optional mask reference.
//!
//! # Invariants
//! - The id is non-empty (generated when not supplied)
//! - No dimension is named `id` or `mask`, the keys reserved on the wire
//! - Dimensions keep the order they were added or parsed in
//! - An empty mask (`null`, `false`, `0`, `""`, `[]`, `{}`) is no mask

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt;

use super::Dimension;
use crate::codec::{Parameter, ParameterKind, WireCodec};
use crate::compat::{self, WireVariant, DOMAIN_RESERVED_KEYS};
use crate::errors::{ParameterError, ParameterResult};
use crate::identity;

#[derive(Debug, Clone, PartialEq)]
pub struct Domain {
    id: String,
    dimensions: IndexMap<String, Dimension>,
    mask: Option<Value>,
}

impl Domain {
    /// Domain with a generated id over the given dimensions
    pub fn new<I, K>(dimensions: I) -> ParameterResult<Self>
    where
        I: IntoIterator<Item = (K, Dimension)>,
        K: Into<String>,
    {
        dimensions
            .into_iter()
            .fold(Self::builder(), |builder, (name, dim)| builder.dimension(name, dim))
            .build()
    }

    pub fn builder() -> DomainBuilder {
        DomainBuilder::default()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn dimensions(&self) -> &IndexMap<String, Dimension> {
        &self.dimensions
    }

    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.get(name)
    }

    pub fn mask(&self) -> Option<&Value> {
        self.mask.as_ref()
    }

    pub(crate) fn from_canonical(tree: &Value) -> ParameterResult<Self> {
        let object = tree
            .as_object()
            .ok_or_else(|| ParameterError::schema("Domain", "expected an object"))?;

        let id = object
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| ParameterError::schema("Domain", "missing string field 'id'"))?;

        let mut builder = Self::builder().id(id);
        if let Some(mask) = object.get("mask") {
            builder = builder.mask(mask.clone());
        }
        for (name, fields) in object {
            if DOMAIN_RESERVED_KEYS.contains(&name.as_str()) {
                continue;
            }
            builder = builder.dimension(name.clone(), Dimension::from_canonical(fields)?);
        }

        builder.build()
    }
}

impl WireCodec for Domain {
    const TYPE_NAME: &'static str = "Domain";

    fn to_wire(&self) -> Value {
        let mut object = Map::new();
        object.insert("id".to_string(), Value::String(self.id.clone()));
        if let Some(mask) = &self.mask {
            object.insert("mask".to_string(), mask.clone());
        }
        for (name, dim) in &self.dimensions {
            object.insert(name.clone(), dim.to_wire());
        }
        Value::Object(object)
    }

    fn from_wire(value: &Value) -> ParameterResult<Self> {
        Self::from_wire_as(value, compat::detect(value))
    }

    fn to_wire_as(&self, variant: WireVariant) -> Value {
        compat::emit(ParameterKind::Domain, self.to_wire(), variant)
    }

    fn from_wire_as(value: &Value, variant: WireVariant) -> ParameterResult<Self> {
        let tree = compat::canonicalize(ParameterKind::Domain, value, variant)?;
        Self::from_canonical(&tree)
    }

    fn displayed_fields(&self) -> Vec<(&'static str, String)> {
        vec![("id", self.id.clone())]
    }
}

impl Parameter for Domain {
    const KIND: ParameterKind = ParameterKind::Domain;

    fn key(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Builder for [`Domain`]
#[derive(Debug, Default)]
pub struct DomainBuilder {
    id: Option<String>,
    dimensions: IndexMap<String, Dimension>,
    mask: Option<Value>,
}

impl DomainBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a dimension
    ///
    /// A later dimension with the same name replaces the earlier one in place.
    pub fn dimension(mut self, name: impl Into<String>, dimension: Dimension) -> Self {
        self.dimensions.insert(name.into(), dimension);
        self
    }

    pub fn mask(mut self, mask: Value) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn build(self) -> ParameterResult<Domain> {
        let id = match self.id {
            Some(id) if id.is_empty() => {
                return Err(ParameterError::MissingIdentity {
                    kind: "Domain",
                    field: "id",
                })
            }
            Some(id) => id,
            None => identity::generate(),
        };

        if let Some(reserved) = self
            .dimensions
            .keys()
            .find(|name| DOMAIN_RESERVED_KEYS.contains(&name.as_str()))
        {
            return Err(ParameterError::schema(
                "Domain",
                format!("'{}' is reserved and cannot name a dimension", reserved),
            ));
        }

        Ok(Domain {
            id,
            dimensions: self.dimensions,
            mask: self.mask.filter(|mask| !is_empty_mask(mask)),
        })
    }
}

fn is_empty_mask(mask: &Value) -> bool {
    match mask {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}
