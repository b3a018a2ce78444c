// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::path::{Path, PathBuf};

use path_clean::clean;

pub type FindInParent = fn(&Path, &str) -> Option<PathBuf>;

/// Looks for `filename` in `path` and then in each of its ancestors.
pub fn find_in_parent(path: &Path, filename: &str) -> Option<PathBuf> {
    path.ancestors()
        .map(|dir| dir.join(filename))
        .find(|candidate| candidate.is_file())
}

/// Picks the configuration file to load.
///
/// An explicit `cli_file` always wins, relative paths being taken from `cwd`.
/// Otherwise the nearest `default_filename` in `cwd` or its parents is used.
/// `None` means no file applies and only defaults and the environment count.
pub fn resolve_config_path(
    find_in_parent: FindInParent,
    cwd: &Path,
    default_filename: &str,
    cli_file: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(cli_file) = cli_file {
        if cli_file.is_absolute() {
            return Some(cli_file.to_path_buf());
        }
        return Some(clean(cwd.join(cli_file)));
    }

    find_in_parent(cwd, default_filename)
}
