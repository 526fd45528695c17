// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#[allow(dead_code)]
#[path = "src/fixture.rs"]
mod fixture;

use std::{env, error::Error, fs, path::PathBuf};

use permit_codegen::{Config, generate};

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=src/fixture.rs");

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let files = generate(&fixture::schema(), &Config::default()).into_result()?;
    for file in files {
        let path = out_dir.join(&file.name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, file.content)?;
    }
    Ok(())
}
