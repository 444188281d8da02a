// Copyright (c) 2025 - Cowboy AI, Inc.
//! Typed request parameters for the ESGF compute WPS profile
//!
//! This crate provides the value objects a compute request is made of
//! (dimensions, domains, variables, operations, outputs), their ordered
//! collections, and the JSON codec that turns them into the payloads a
//! compute Web Processing Service accepts and back. Transport, execution and
//! the WPS client itself live elsewhere.
//!
//! # Example
//!
//! ```rust
//! use cim_wps_params::{Dimension, Domain, Domains, Operation, Variable, WireCodec};
//!
//! let d0 = Domain::new([("time", Dimension::indices(0.0, 1.0).unwrap())]).unwrap();
//! let tas = Variable::new("http://nowhere/tas.nc", "tas").unwrap();
//! let subset = Operation::builder().name("subset").domain(&d0).input(&tas).build();
//!
//! assert_eq!(subset.to_wire()["domain"], d0.id());
//! assert_eq!(subset.to_wire()["input"][0], tas.name());
//! assert_eq!(Domains::new(vec![d0]).to_wire().as_array().unwrap().len(), 1);
//! ```

pub mod codec;
pub mod collections;
pub mod compat;
pub mod config;
pub mod errors;
pub mod identity;
pub mod parameters;
pub mod wps;

// Re-export commonly used types
pub use codec::{Parameter, ParameterKind, WireCodec};
pub use collections::{
    Domains, ExecutionOutput, Operations, Outputs, ParameterList, ProcessOutput, Variables,
    OUTPUT_IDENTIFIER,
};
pub use compat::WireVariant;
pub use config::CodecConfig;
pub use errors::{ParameterError, ParameterResult};
pub use parameters::{
    Crs, Dimension, Domain, Operation, Output, Reference, Variable, VariableId,
};
pub use wps::{ComplexInput, WpsParameter, JSON_MIME_TYPE};
