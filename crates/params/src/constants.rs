//! Constants for the EES parameter sets
//!
//! This module contains all hardcoded values used in preset definitions.
//! Every set shares p = 3 and q = 2048; dg is N/3 and dr equals df.

/// Values shared by every EES parameter set
pub mod common {
    pub const P: i64 = 3;
    pub const Q: i64 = 2048;
}

macro_rules! ees_set {
    ($name:ident, n: $n:expr, df: $df:expr, dm0: $dm0:expr, db: $db:expr, c: $c:expr, max_msg: $max:expr, oid: $oid:expr) => {
        pub mod $name {
            pub const N: usize = $n;
            pub const DF: usize = $df;
            pub const DM0: usize = $dm0;
            /// Salt length in bits
            pub const DB: usize = $db;
            /// Bits consumed per candidate index by the index generator
            pub const C: u32 = $c;
            pub const MAX_MSG_LEN_BYTES: usize = $max;
            pub const OID: [u8; 3] = $oid;
        }
    };
}

// 112-bit security, optimized for size
ees_set!(ees401ep1, n: 401, df: 113, dm0: 113, db: 112, c: 11, max_msg: 60, oid: [0, 2, 4]);
// 128-bit security, optimized for size
ees_set!(ees449ep1, n: 449, df: 134, dm0: 134, db: 128, c: 9, max_msg: 67, oid: [0, 3, 3]);
// 192-bit security, optimized for size
ees_set!(ees677ep1, n: 677, df: 157, dm0: 157, db: 192, c: 11, max_msg: 101, oid: [0, 5, 3]);
// 256-bit security, optimized for size
ees_set!(ees1087ep2, n: 1087, df: 120, dm0: 120, db: 256, c: 13, max_msg: 170, oid: [0, 6, 3]);

// cost/size balanced
ees_set!(ees541ep1, n: 541, df: 49, dm0: 49, db: 112, c: 12, max_msg: 86, oid: [0, 2, 5]);
ees_set!(ees613ep1, n: 613, df: 55, dm0: 55, db: 128, c: 11, max_msg: 97, oid: [0, 3, 4]);
ees_set!(ees887ep1, n: 887, df: 81, dm0: 81, db: 192, c: 10, max_msg: 141, oid: [0, 5, 4]);
ees_set!(ees1171ep1, n: 1171, df: 106, dm0: 106, db: 256, c: 12, max_msg: 186, oid: [0, 6, 4]);

// optimized for speed
ees_set!(ees659ep1, n: 659, df: 38, dm0: 38, db: 112, c: 11, max_msg: 108, oid: [0, 2, 6]);
ees_set!(ees761ep1, n: 761, df: 42, dm0: 42, db: 128, c: 12, max_msg: 125, oid: [0, 3, 5]);
ees_set!(ees1087ep1, n: 1087, df: 63, dm0: 63, db: 192, c: 13, max_msg: 178, oid: [0, 5, 5]);
ees_set!(ees1499ep1, n: 1499, df: 79, dm0: 79, db: 256, c: 13, max_msg: 247, oid: [0, 6, 5]);
