// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use ntru_config::NtruConfig;
use ntru_params::NtruPreset;

pub fn execute(config: &NtruConfig) {
    print!("{}", render(config.param_set));
}

fn render(selected: NtruPreset) -> String {
    let mut out = format!(
        "  {:<12} {:>5} {:>5} {:>4} {:>4} {:>8} {:>7}\n",
        "name", "N", "q", "df", "dm0", "max msg", "oid"
    );
    for preset in NtruPreset::ALL {
        let params = preset.params();
        let marker = if preset == selected { '*' } else { ' ' };
        out.push_str(&format!(
            "{} {:<12} {:>5} {:>5} {:>4} {:>4} {:>8} {:>7}\n",
            marker,
            preset.name(),
            params.n,
            params.q,
            params.df,
            params.dm0,
            params.max_msg_len_bytes,
            hex::encode(params.oid)
        ));
    }
    out
}
