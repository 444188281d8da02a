// Copyright (c) 2025 - Cowboy AI, Inc.
//! Subset Request Example
//!
//! Builds the inputs of a `pelican_subset` style process: one domain, one
//! variable, one subset operation. Prints the complex inputs a WPS client
//! would send, in both wire variants.
//!
//! Run with: cargo run --example subset_request

use cim_wps_params::{
    CodecConfig, Dimension, Domain, Domains, Operation, Operations, Variable, Variables,
    WireVariant, WpsParameter,
};

const OPENDAP_URL: &str = "http://nowhere/tas.nc";

fn main() -> anyhow::Result<()> {
    let d0 = Domain::builder()
        .dimension("time", Dimension::indices(0.0, 1.0)?)
        .dimension("lat", Dimension::values(40.0, 60.0)?)
        .dimension("lon", Dimension::values(0.0, 20.0)?)
        .build()?;
    let tas = Variable::new(OPENDAP_URL, "tas")?;
    let subset = Operation::builder()
        .name("subset")
        .domain(&d0)
        .input(&tas)
        .build();

    let domains = Domains::new(vec![d0]);
    let variables = Variables::new(vec![tas]);
    let operations = Operations::new(vec![subset]);

    println!("{}", domains);
    println!("{}", variables);
    println!("{}", operations);
    println!();

    for input in [
        domains.to_complex_input("domain")?,
        variables.to_complex_input("variable")?,
        operations.to_complex_input("operation")?,
    ] {
        println!("{} ({}): {}", input.identifier, input.mime_type, input.value);
    }
    println!();

    let legacy = CodecConfig::strict(WireVariant::ArrayWrapped);
    println!("domain (array-wrapped): {}", legacy.encode_payload(&domains)?);

    Ok(())
}
