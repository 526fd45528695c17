// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `protoc-gen-permit` binary.
//!
//! Reads a `CodeGeneratorRequest` from stdin and writes the response to
//! stdout. Logs go to stderr, filtered by `PROTOC_GEN_PERMIT_LOG`.

use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "PROTOC_GEN_PERMIT_LOG";

fn main() -> Result<()> {
    init_tracing();

    let mut input = Vec::new();
    io::stdin()
        .read_to_end(&mut input)
        .context("reading CodeGeneratorRequest from stdin")?;
    let output = protoc_gen_permit::run(&input)?;
    io::stdout()
        .write_all(&output)
        .context("writing CodeGeneratorResponse to stdout")?;
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}
