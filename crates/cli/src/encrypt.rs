// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::with_added_extension;
use anyhow::Result;
use ntru_config::NtruConfig;
use ntru_crypto::{encrypt_file, read_public_key};
use rand::rngs::OsRng;
use std::path::{Path, PathBuf};

pub fn execute(config: &NtruConfig, input: &Path, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| with_added_extension(input, "enc"));
    let pub_key = read_public_key(&config.pubkey_file)?;
    encrypt_file(&pub_key, input, &output, &mut OsRng)?;
    println!("Encrypted {} to {}", input.display(), output.display());
    Ok(())
}
