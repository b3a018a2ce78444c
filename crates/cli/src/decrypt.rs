// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::with_added_extension;
use anyhow::Result;
use ntru_config::NtruConfig;
use ntru_crypto::{decrypt_file, read_private_key};
use std::path::{Path, PathBuf};

pub fn execute(config: &NtruConfig, input: &Path, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| with_added_extension(input, "dec"));
    let priv_key = read_private_key(&config.privkey_file)?;
    decrypt_file(&priv_key, input, &output)?;
    println!("Decrypted {} to {}", input.display(), output.display());
    Ok(())
}
