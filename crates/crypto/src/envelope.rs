// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use anyhow::{anyhow, bail, Context, Result};
use ntru_encrypt::{PrivateKey, PublicKey};
use rand::{CryptoRng, RngCore};
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

// AES PARAMS
const AES_KEY_LEN: usize = 32;
const AES_NONCE_LEN: usize = 12;

/// Appends `u32 BE length || bytes`.
fn write_section(output: &mut Vec<u8>, bytes: &[u8]) -> Result<()> {
    let len = u32::try_from(bytes.len()).context("Section is larger than 4 GiB")?;
    output.extend_from_slice(&len.to_be_bytes());
    output.extend_from_slice(bytes);
    Ok(())
}

/// Splits a `u32 BE length || bytes` section off the front of `input`.
fn read_section<'a>(input: &mut &'a [u8], name: &str) -> Result<&'a [u8]> {
    if input.len() < 4 {
        bail!("Envelope is truncated before the {name} length");
    }
    let (len, rest) = input.split_at(4);
    let len = u32::from_be_bytes([len[0], len[1], len[2], len[3]]) as usize;
    if rest.len() < len {
        bail!("Envelope is truncated inside the {name}");
    }
    let (section, rest) = rest.split_at(len);
    *input = rest;
    Ok(section)
}

/// Encrypts arbitrary length data for the holder of `pub_key`.
///
/// A fresh AES-256-GCM key encrypts the data and NTRUEncrypt wraps that key.
/// The result has the layout
/// `[nonce_len][nonce][wrapped_len][wrapped_key][body_len][body]` where each
/// length is a big-endian `u32`.
///
/// The plaintext is zeroized once it has been encrypted.
pub fn seal<R: RngCore + CryptoRng>(
    pub_key: &PublicKey,
    plaintext: &mut Vec<u8>,
    rng: &mut R,
) -> Result<Vec<u8>> {
    if pub_key.max_msg_len() < AES_KEY_LEN {
        bail!(
            "Parameter set carries at most {} bytes, a {AES_KEY_LEN} byte key does not fit",
            pub_key.max_msg_len()
        );
    }

    let mut key = Zeroizing::new([0u8; AES_KEY_LEN]);
    rng.fill_bytes(&mut key[..]);
    let mut nonce_bytes = [0u8; AES_NONCE_LEN];
    rng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(&key[..])?;
    let body = cipher
        .encrypt(nonce, plaintext.as_ref())
        .map_err(|_| anyhow!("Could not AES Encrypt given plaintext."))?;
    plaintext.zeroize();

    let wrapped = pub_key.encrypt(&key[..], rng)?;
    debug!(
        wrapped = wrapped.len(),
        body = body.len(),
        "sealed hybrid envelope"
    );

    let mut output = Vec::with_capacity(12 + nonce_bytes.len() + wrapped.len() + body.len());
    write_section(&mut output, &nonce_bytes)?;
    write_section(&mut output, &wrapped)?;
    write_section(&mut output, &body)?;
    Ok(output)
}

/// Decrypts an envelope produced by [`seal`].
///
/// Fails if the container is malformed, the key was wrapped for someone else
/// or the body has been modified.
pub fn open(priv_key: &PrivateKey, envelope: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let mut input = envelope;
    let nonce_bytes = read_section(&mut input, "nonce")?;
    let wrapped = read_section(&mut input, "wrapped key")?;
    let body = read_section(&mut input, "body")?;
    if !input.is_empty() {
        bail!("Envelope has {} trailing bytes", input.len());
    }
    if nonce_bytes.len() != AES_NONCE_LEN {
        bail!("Invalid nonce length {}", nonce_bytes.len());
    }

    let key = Zeroizing::new(
        priv_key
            .decrypt(wrapped)
            .context("Could not unwrap the envelope key")?,
    );
    if key.len() != AES_KEY_LEN {
        bail!("Unwrapped key has the wrong length");
    }

    let cipher = Aes256Gcm::new_from_slice(&key)?;
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce_bytes), body)
        .map_err(|_| anyhow!("Could not decrypt data"))?;
    Ok(Zeroizing::new(plaintext))
}
