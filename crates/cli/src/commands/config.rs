// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rmd config` - Print the effective configuration

use crate::output::OutputFormat;
use anyhow::Result;
use rmd_core::ServiceConfig;

pub fn show(config: &ServiceConfig, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", toml::to_string_pretty(config)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
    }
    Ok(())
}
