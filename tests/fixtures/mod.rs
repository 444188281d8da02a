// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-wps-params
//!
//! Deterministic parameters and payloads. Every identity is a fixed constant
//! so expected trees can be written out literally.

#![allow(dead_code)]

use serde_json::{json, Value};

use cim_wps_params::{Dimension, Domain, Operation, Output, Variable};

pub const DOMAIN_ID: &str = "d0";
pub const VARIABLE_ID: &str = "tas|v0x";
pub const VARIABLE_NAME: &str = "v0x";
pub const TAS_URI: &str = "http://data.test.org/tas.nc";
pub const OUTPUT_URI: &str = "http://test.org/output.nc";

/// Domain `d0` over time (indices), lat and lon (values)
pub fn domain_fixture() -> Domain {
    Domain::builder()
        .id(DOMAIN_ID)
        .dimension("time", Dimension::indices(0.0, 1.0).unwrap())
        .dimension("lat", Dimension::values(40.0, 60.0).unwrap())
        .dimension("lon", Dimension::values(0.0, 20.0).unwrap().with_step(2.5).unwrap())
        .build()
        .expect("Invalid domain fixture")
}

/// Variable `tas` with the fixed name `v0x`
pub fn variable_fixture() -> Variable {
    Variable::builder()
        .uri(TAS_URI)
        .id(VARIABLE_ID)
        .domain(DOMAIN_ID)
        .build()
        .expect("Invalid variable fixture")
}

/// `subset` over the domain and variable fixtures
pub fn operation_fixture() -> Operation {
    Operation::builder()
        .name("subset")
        .domain(&domain_fixture())
        .input(&variable_fixture())
        .result("r0")
        .build()
}

pub fn output_fixture() -> Output {
    Output::builder()
        .id("tas_avg_mon")
        .uri(OUTPUT_URI)
        .domain(DOMAIN_ID)
        .mimetype("application/x-netcdf")
        .build()
        .expect("Invalid output fixture")
}

/// Flat tree of [`domain_fixture`]
pub fn flat_domain_tree() -> Value {
    json!({
        "id": "d0",
        "time": {"start": 0, "end": 1, "step": 1, "crs": "indices"},
        "lat": {"start": 40, "end": 60, "step": 1, "crs": "values"},
        "lon": {"start": 0, "end": 20, "step": 2.5, "crs": "values"}
    })
}

/// Array-wrapped tree of [`domain_fixture`]
pub fn legacy_domain_tree() -> Value {
    json!([{
        "name": "d0",
        "dimensions": [
            {"name": "time", "start": 0, "end": 1, "step": 1, "crs": "indices"},
            {"name": "lat", "start": 40, "end": 60, "step": 1, "crs": "values"},
            {"name": "lon", "start": 0, "end": 20, "step": 2.5, "crs": "values"}
        ]
    }])
}
