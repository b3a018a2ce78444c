// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::{ffi::OsString, path::Path, path::PathBuf};

pub mod telemetry;

/// `input` with `extension` appended, e.g. `notes.txt` -> `notes.txt.enc`.
pub fn with_added_extension(input: &Path, extension: &str) -> PathBuf {
    let mut path = OsString::from(input.as_os_str());
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}
