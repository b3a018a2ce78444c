// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::envelope::{open, seal};
use anyhow::{Context, Result};
use ntru_encrypt::{PrivateKey, PublicKey};
use rand::{CryptoRng, RngCore};
use std::{fs, path::Path};
use tracing::{info, instrument};

/// Seals the contents of `input` into `output`.
#[instrument(skip_all)]
pub fn encrypt_file<R: RngCore + CryptoRng>(
    pub_key: &PublicKey,
    input: &Path,
    output: &Path,
    rng: &mut R,
) -> Result<()> {
    let mut plaintext =
        fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let envelope = seal(pub_key, &mut plaintext, rng)?;
    fs::write(output, &envelope)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(
        "Encrypted {} into {} ({} bytes)",
        input.display(),
        output.display(),
        envelope.len()
    );
    Ok(())
}

/// Opens the envelope stored in `input` and writes the plaintext to `output`.
#[instrument(skip_all)]
pub fn decrypt_file(priv_key: &PrivateKey, input: &Path, output: &Path) -> Result<()> {
    let envelope = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let plaintext = open(priv_key, &envelope)
        .with_context(|| format!("Failed to decrypt {}", input.display()))?;
    fs::write(output, plaintext.as_slice())
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Decrypted {} into {}", input.display(), output.display());
    Ok(())
}
