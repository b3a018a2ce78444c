// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod envelope;
mod file;
mod keyfile;

pub use envelope::{open, seal};
pub use file::{decrypt_file, encrypt_file};
pub use keyfile::{backup_existing, read_private_key, read_public_key, write_key_pair};
