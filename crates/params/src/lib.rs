// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Named parameter sets for NTRUEncrypt.

pub mod constants;
pub mod presets;

pub use presets::{KeyParams, NtruPreset, ParamsError};
