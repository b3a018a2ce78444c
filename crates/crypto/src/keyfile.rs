// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{bail, Context, Result};
use ntru_encrypt::{PrivateKey, PublicKey};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{info, warn};
use zeroize::Zeroizing;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

/// Writes a new key file. Refuses to overwrite an existing file.
fn write_new_file(path: &Path, contents: &[u8], mode: u32) -> Result<()> {
    if contents.is_empty() {
        bail!("Key must contain data!")
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create parent directories")?;
    }
    if path.exists() {
        bail!("Keyfile {} already exists. Refusing to overwrite.", path.display())
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(mode);
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = options
        .open(path)
        .with_context(|| format!("Failed to create keyfile {}", path.display()))?;
    file.write_all(contents)
        .context("Failed to write data to keyfile")?;
    file.flush().context("Failed to flush data to keyfile")?;
    Ok(())
}

/// Stores a key pair. The private key file is only readable by its owner.
pub fn write_key_pair(
    public: &PublicKey,
    private: &PrivateKey,
    pubkey_path: &Path,
    privkey_path: &Path,
) -> Result<()> {
    let public_bytes = public.to_bytes()?;
    let private_bytes = Zeroizing::new(private.to_bytes()?);
    write_new_file(pubkey_path, &public_bytes, 0o644)?;
    if let Err(err) = write_new_file(privkey_path, &private_bytes, 0o600) {
        // leave no public key without its private key
        if let Err(remove_err) = fs::remove_file(pubkey_path) {
            warn!(
                "Could not remove {} after a failed write: {}",
                pubkey_path.display(),
                remove_err
            );
        }
        return Err(err);
    }
    info!(
        "Wrote key pair to {} and {}",
        pubkey_path.display(),
        privkey_path.display()
    );
    Ok(())
}

pub fn read_public_key(path: &Path) -> Result<PublicKey> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read public key {}", path.display()))?;
    PublicKey::from_bytes(&bytes)
        .with_context(|| format!("{} is not a valid public key", path.display()))
}

pub fn read_private_key(path: &Path) -> Result<PrivateKey> {
    let bytes = Zeroizing::new(
        fs::read(path).with_context(|| format!("Failed to read private key {}", path.display()))?,
    );
    PrivateKey::from_bytes(&bytes)
        .with_context(|| format!("{} is not a valid private key", path.display()))
}

/// Moves `path` to `path.bkp` if it exists and returns the backup location.
pub fn backup_existing(path: &Path) -> Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }
    let mut backup = path.as_os_str().to_owned();
    backup.push(".bkp");
    let backup = PathBuf::from(backup);
    fs::rename(path, &backup)
        .with_context(|| format!("Failed to back up {}", path.display()))?;
    info!("Moved {} to {}", path.display(), backup.display());
    Ok(Some(backup))
}
