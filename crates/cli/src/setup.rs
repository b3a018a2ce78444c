// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{bail, Result};
use ntru_config::NtruConfig;
use ntru_crypto::{backup_existing, write_key_pair};
use ntru_encrypt::generate_key_pair;
use rand::{rngs::OsRng, CryptoRng, RngCore};
use tracing::info;

pub fn execute(config: &NtruConfig) -> Result<()> {
    generate(config, &mut OsRng)
}

fn generate<R: RngCore + CryptoRng>(config: &NtruConfig, rng: &mut R) -> Result<()> {
    // both files are moved aside before bailing
    let backups: Vec<_> = [&config.pubkey_file, &config.privkey_file]
        .into_iter()
        .map(|path| backup_existing(path))
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect();
    if !backups.is_empty() {
        let moved: Vec<String> = backups.iter().map(|p| p.display().to_string()).collect();
        bail!(
            "Existing keys were moved to {}. Run `ntru setup` again to generate a new pair.",
            moved.join(", ")
        );
    }

    info!("Generating a {} key pair", config.param_set);
    let pair = generate_key_pair(&config.param_set.params(), rng)?;
    write_key_pair(
        &pair.public,
        &pair.private,
        &config.pubkey_file,
        &config.privkey_file,
    )?;
    println!(
        "Generated {} keys: {} (public), {} (private)",
        config.param_set,
        config.pubkey_file.display(),
        config.privkey_file.display()
    );
    Ok(())
}
