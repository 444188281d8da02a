// Copyright (c) 2025 - Cowboy AI, Inc.
//! WPS Parameter Value Objects
//!
//! Typed request parameters of the ESGF compute profile. Each one is built
//! once, from explicit fields or from a parsed JSON tree, and read thereafter.
//!
//! # Value Objects
//!
//! - [`Dimension`] - one axis subset by value or index range
//! - [`Domain`] - named region of keyed dimensions plus optional mask
//! - [`Variable`] - data source URI with a composite [`VariableId`]
//! - [`Operation`] - computation over inputs within a domain
//! - [`Output`] - produced artifact descriptor
//!
//! Cross references between them are [`Reference`]s.

pub mod dimension;
pub mod domain;
pub mod operation;
pub mod output;
pub mod reference;
pub mod variable;

pub use dimension::{Crs, Dimension};
pub use domain::{Domain, DomainBuilder};
pub use operation::{Operation, OperationBuilder};
pub use output::{Output, OutputBuilder};
pub use reference::Reference;
pub use variable::{Variable, VariableBuilder, VariableId, ID_SEPARATOR};
