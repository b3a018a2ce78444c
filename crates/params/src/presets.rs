// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::constants::{
    common, ees1087ep1, ees1087ep2, ees1171ep1, ees1499ep1, ees401ep1, ees449ep1, ees541ep1,
    ees613ep1, ees659ep1, ees677ep1, ees761ep1, ees887ep1,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error as ThisError;

/// The EES family of NTRUEncrypt parameter sets.
///
/// Each preset is identified on the wire by a three byte OID and on the command
/// line by its lowercase name, e.g. `ees401ep1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NtruPreset {
    #[default]
    Ees401Ep1,
    Ees449Ep1,
    Ees677Ep1,
    Ees1087Ep2,
    Ees541Ep1,
    Ees613Ep1,
    Ees887Ep1,
    Ees1171Ep1,
    Ees659Ep1,
    Ees761Ep1,
    Ees1087Ep1,
    Ees1499Ep1,
}

#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("Unknown parameter set: {0}")]
    UnknownPreset(String),
    #[error("Unknown parameter set OID: {0:?}")]
    UnknownOid([u8; 3]),
    #[error("Invalid parameters: {0}")]
    Invalid(String),
}

/// A complete NTRUEncrypt parameter set.
///
/// This is passed explicitly into every protocol call; nothing in the
/// workspace looks parameters up from global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyParams {
    /// The named preset these values come from, `None` for synthetic parameters
    pub preset: Option<NtruPreset>,
    /// Ring degree N
    pub n: usize,
    /// Small modulus p, the plaintext space
    pub p: i64,
    /// Large modulus q, the ciphertext space. Always a power of two.
    pub q: i64,
    /// Number of +1 and of -1 coefficients in the private polynomial F
    pub df: usize,
    /// Number of +1 coefficients in g (g has dg - 1 coefficients equal to -1)
    pub dg: usize,
    /// Number of +1 and of -1 coefficients in the blinding polynomial r
    pub dr: usize,
    /// Minimum number of each trit value the masked message must contain
    pub dm0: usize,
    /// Salt length in bits
    pub db: usize,
    /// Bits consumed per candidate index by the index generator
    pub c: u32,
    /// Three byte identifier mixed into the blinding polynomial seed
    pub oid: [u8; 3],
    /// Longest plaintext accepted by encryption
    pub max_msg_len_bytes: usize,
}

impl NtruPreset {
    pub const ALL: [NtruPreset; 12] = [
        NtruPreset::Ees401Ep1,
        NtruPreset::Ees449Ep1,
        NtruPreset::Ees677Ep1,
        NtruPreset::Ees1087Ep2,
        NtruPreset::Ees541Ep1,
        NtruPreset::Ees613Ep1,
        NtruPreset::Ees887Ep1,
        NtruPreset::Ees1171Ep1,
        NtruPreset::Ees659Ep1,
        NtruPreset::Ees761Ep1,
        NtruPreset::Ees1087Ep1,
        NtruPreset::Ees1499Ep1,
    ];

    pub fn from_name(name: &str) -> Result<Self, ParamsError> {
        let normalized = name.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == normalized)
            .ok_or_else(|| ParamsError::UnknownPreset(name.to_string()))
    }

    pub fn from_oid(oid: [u8; 3]) -> Result<Self, ParamsError> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.params().oid == oid)
            .ok_or(ParamsError::UnknownOid(oid))
    }

    pub fn name(&self) -> &'static str {
        match self {
            NtruPreset::Ees401Ep1 => "ees401ep1",
            NtruPreset::Ees449Ep1 => "ees449ep1",
            NtruPreset::Ees677Ep1 => "ees677ep1",
            NtruPreset::Ees1087Ep2 => "ees1087ep2",
            NtruPreset::Ees541Ep1 => "ees541ep1",
            NtruPreset::Ees613Ep1 => "ees613ep1",
            NtruPreset::Ees887Ep1 => "ees887ep1",
            NtruPreset::Ees1171Ep1 => "ees1171ep1",
            NtruPreset::Ees659Ep1 => "ees659ep1",
            NtruPreset::Ees761Ep1 => "ees761ep1",
            NtruPreset::Ees1087Ep1 => "ees1087ep1",
            NtruPreset::Ees1499Ep1 => "ees1499ep1",
        }
    }

    pub fn list() -> Vec<&'static str> {
        Self::ALL.iter().map(NtruPreset::name).collect()
    }

    pub fn params(&self) -> KeyParams {
        KeyParams::from(*self)
    }
}

impl fmt::Display for NtruPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NtruPreset {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

macro_rules! preset_params {
    ($preset:expr, $set:ident) => {
        KeyParams {
            preset: Some($preset),
            n: $set::N,
            p: common::P,
            q: common::Q,
            df: $set::DF,
            dg: $set::N / 3,
            dr: $set::DF,
            dm0: $set::DM0,
            db: $set::DB,
            c: $set::C,
            oid: $set::OID,
            max_msg_len_bytes: $set::MAX_MSG_LEN_BYTES,
        }
    };
}

impl From<NtruPreset> for KeyParams {
    fn from(value: NtruPreset) -> Self {
        match value {
            NtruPreset::Ees401Ep1 => preset_params!(value, ees401ep1),
            NtruPreset::Ees449Ep1 => preset_params!(value, ees449ep1),
            NtruPreset::Ees677Ep1 => preset_params!(value, ees677ep1),
            NtruPreset::Ees1087Ep2 => preset_params!(value, ees1087ep2),
            NtruPreset::Ees541Ep1 => preset_params!(value, ees541ep1),
            NtruPreset::Ees613Ep1 => preset_params!(value, ees613ep1),
            NtruPreset::Ees887Ep1 => preset_params!(value, ees887ep1),
            NtruPreset::Ees1171Ep1 => preset_params!(value, ees1171ep1),
            NtruPreset::Ees659Ep1 => preset_params!(value, ees659ep1),
            NtruPreset::Ees761Ep1 => preset_params!(value, ees761ep1),
            NtruPreset::Ees1087Ep1 => preset_params!(value, ees1087ep1),
            NtruPreset::Ees1499Ep1 => preset_params!(value, ees1499ep1),
        }
    }
}

impl KeyParams {
    /// Builds synthetic parameters, e.g. small rings for tests.
    ///
    /// p is fixed at 3 because messages are encoded as trits. The message bound
    /// is derived from the trit capacity of the ring.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::Invalid` when the values cannot support
    /// encryption; see [`KeyParams::validate`].
    pub fn custom(
        n: usize,
        q: i64,
        df: usize,
        dm0: usize,
        db: usize,
        c: u32,
    ) -> Result<Self, ParamsError> {
        let capacity = Self::buffer_capacity(n);
        let max_msg_len_bytes = capacity
            .checked_sub(db / 8 + 1)
            .ok_or_else(|| ParamsError::Invalid(format!("N = {n} is too small for the salt")))?
            .min(u8::MAX as usize);

        let params = KeyParams {
            preset: None,
            n,
            p: common::P,
            q,
            df,
            dg: n / 3,
            dr: df,
            dm0,
            db,
            c,
            oid: [0xff, 0xff, 0xff],
            max_msg_len_bytes,
        };
        params.validate()?;
        Ok(params)
    }

    /// Number of whole bytes that fit into the trits of a ring of degree `n`
    /// when every 3 bits are carried by 2 trits.
    pub fn buffer_capacity(n: usize) -> usize {
        3 * (n / 2) / 8
    }

    /// Length in bytes of the random salt mixed into each encryption.
    pub fn salt_len(&self) -> usize {
        self.db / 8
    }

    /// Checks that the parameters are internally consistent.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let invalid = |message: &str| Err(ParamsError::Invalid(message.to_string()));

        if self.n < 2 {
            return invalid("N must be at least 2");
        }
        if self.p != common::P {
            return invalid("p must be 3");
        }
        if self.q <= 2 * self.p || self.q & (self.q - 1) != 0 {
            return invalid("q must be a power of two larger than 2p");
        }
        if 2 * self.df > self.n || 2 * self.dr > self.n || 2 * self.dg > self.n {
            return invalid("df, dg and dr must leave room in the ring");
        }
        if self.df == 0 || self.dg == 0 || self.dr == 0 {
            return invalid("df, dg and dr must be positive");
        }
        if 3 * self.dm0 > self.n {
            return invalid("dm0 cannot exceed N/3");
        }
        if self.db % 8 != 0 {
            return invalid("db must be a whole number of bytes");
        }
        if self.c == 0 || self.c > 31 || (1usize << self.c) < self.n {
            return invalid("2^c must be at least N");
        }
        if self.max_msg_len_bytes > u8::MAX as usize {
            return invalid("message length must fit in one byte");
        }
        if self.salt_len() + 1 + self.max_msg_len_bytes > Self::buffer_capacity(self.n) {
            return invalid("message buffer does not fit in N trits");
        }
        if let Some(preset) = self.preset {
            if preset.params() != *self {
                return invalid("values differ from the named parameter set");
            }
        }
        Ok(())
    }
}
