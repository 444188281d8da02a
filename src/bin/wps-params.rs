// Copyright (c) 2025 - Cowboy AI, Inc.
//! WPS parameter payload converter
//!
//! Reads a parameter payload from stdin, parses it, and writes it back to
//! stdout in the requested wire variant. Handy for checking what a service
//! generation will make of a hand-written request.
//!
//! Run with: cargo run --bin wps-params < request.json
//!
//! Configuration (environment):
//! - `WPS_PARAMS_KIND`: `domains` (default), `variables`, `operations`,
//!   `outputs`, or a singular kind (`domain`, `variable`, ...)
//! - `WPS_PARAMS_FROM`: variant of the input; unset detects it
//! - `WPS_PARAMS_TO`: variant of the output, `flat` (default) or `array-wrapped`
//! - `WPS_PARAMS_PRETTY`: pretty-print the output when set to `1` or `true`

use anyhow::{bail, Context, Result};
use cim_wps_params::{
    CodecConfig, Dimension, Domain, Domains, Operation, Operations, Output, Outputs,
    Variable, Variables, WireCodec, WireVariant,
};
use serde_json::Value;
use std::io::{self, Read};
use tracing::{debug, info};

/// Configuration for the converter
#[derive(Debug, Clone)]
struct ConverterConfig {
    /// Parameter type of the payload
    kind: String,
    /// Codec variant selection
    codec: CodecConfig,
    /// Pretty-print output
    pretty: bool,
}

impl ConverterConfig {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        let kind = std::env::var("WPS_PARAMS_KIND")
            .unwrap_or_else(|_| "domains".to_string())
            .to_ascii_lowercase();

        let mut codec = CodecConfig::default();
        if let Ok(from) = std::env::var("WPS_PARAMS_FROM") {
            let variant: WireVariant = from.parse().context("Invalid WPS_PARAMS_FROM")?;
            codec = codec.with_read_variant(variant);
        }
        if let Ok(to) = std::env::var("WPS_PARAMS_TO") {
            let variant: WireVariant = to.parse().context("Invalid WPS_PARAMS_TO")?;
            codec = codec.with_write_variant(variant);
        }

        let pretty = std::env::var("WPS_PARAMS_PRETTY")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            kind,
            codec,
            pretty,
        })
    }
}

/// Parse `tree` as `T` and re-encode it, describing what was read
fn convert<T: WireCodec>(tree: &Value, codec: &CodecConfig) -> Result<(Value, String)> {
    let parameter: T = codec
        .decode(tree)
        .with_context(|| format!("Failed to parse payload as {}", T::TYPE_NAME))?;
    Ok((codec.encode(&parameter), parameter.describe()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cim_wps_params=info,wps_params=info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = ConverterConfig::from_env()?;
    debug!(?config, "configuration loaded");

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read payload from stdin")?;
    let tree: Value = serde_json::from_str(&input).context("Payload is not valid JSON")?;

    let (converted, description) = match config.kind.as_str() {
        "dimension" => convert::<Dimension>(&tree, &config.codec)?,
        "domain" => convert::<Domain>(&tree, &config.codec)?,
        "domains" => convert::<Domains>(&tree, &config.codec)?,
        "variable" => convert::<Variable>(&tree, &config.codec)?,
        "variables" => convert::<Variables>(&tree, &config.codec)?,
        "operation" => convert::<Operation>(&tree, &config.codec)?,
        "operations" => convert::<Operations>(&tree, &config.codec)?,
        "output" => convert::<Output>(&tree, &config.codec)?,
        "outputs" => convert::<Outputs>(&tree, &config.codec)?,
        other => bail!("Unknown parameter kind '{}'", other),
    };

    info!(
        to = %config.codec.write_variant,
        "parsed {}",
        description
    );

    let rendered = if config.pretty {
        serde_json::to_string_pretty(&converted)?
    } else {
        serde_json::to_string(&converted)?
    };
    println!("{}", rendered);

    Ok(())
}
