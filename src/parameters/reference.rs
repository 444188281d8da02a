// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cross-parameter references
//!
//! Operations point at their domain and inputs, and variables and outputs at
//! their domain. A reference is either the identity string itself or a handle
//! to the referenced parameter; it becomes a string only when serialized.

use std::fmt;
use std::sync::Arc;

use super::{Domain, Operation, Variable};

/// Reference to another parameter
///
/// Two references are equal when they resolve to the same identity.
#[derive(Debug, Clone)]
pub enum Reference {
    /// Identity string as it appears on the wire
    Identity(String),
    /// A domain, resolved to its id
    Domain(Arc<Domain>),
    /// A variable, resolved to its name (the part after the separator)
    Variable(Arc<Variable>),
    /// Another operation, resolved to its name
    Operation(Arc<Operation>),
}

impl Reference {
    /// The identity string this reference stands for
    pub fn resolve(&self) -> &str {
        match self {
            Self::Identity(identity) => identity,
            Self::Domain(domain) => domain.id(),
            Self::Variable(variable) => variable.name(),
            Self::Operation(operation) => operation.name(),
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Identity(_))
    }
}

impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        self.resolve() == other.resolve()
    }
}

impl Eq for Reference {}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resolve())
    }
}

impl From<&str> for Reference {
    fn from(value: &str) -> Self {
        Self::Identity(value.to_string())
    }
}

impl From<String> for Reference {
    fn from(value: String) -> Self {
        Self::Identity(value)
    }
}

impl From<Domain> for Reference {
    fn from(value: Domain) -> Self {
        Self::Domain(Arc::new(value))
    }
}

impl From<&Domain> for Reference {
    fn from(value: &Domain) -> Self {
        Self::Domain(Arc::new(value.clone()))
    }
}

impl From<Arc<Domain>> for Reference {
    fn from(value: Arc<Domain>) -> Self {
        Self::Domain(value)
    }
}

impl From<Variable> for Reference {
    fn from(value: Variable) -> Self {
        Self::Variable(Arc::new(value))
    }
}

impl From<&Variable> for Reference {
    fn from(value: &Variable) -> Self {
        Self::Variable(Arc::new(value.clone()))
    }
}

impl From<Arc<Variable>> for Reference {
    fn from(value: Arc<Variable>) -> Self {
        Self::Variable(value)
    }
}

impl From<Operation> for Reference {
    fn from(value: Operation) -> Self {
        Self::Operation(Arc::new(value))
    }
}

impl From<&Operation> for Reference {
    fn from(value: &Operation) -> Self {
        Self::Operation(Arc::new(value.clone()))
    }
}

impl From<Arc<Operation>> for Reference {
    fn from(value: Arc<Operation>) -> Self {
        Self::Operation(value)
    }
}
