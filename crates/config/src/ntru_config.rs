// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::load_config::{find_in_parent, resolve_config_path};
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use ntru_params::NtruPreset;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = "ntru.config.yaml";
pub const ENV_PREFIX: &str = "NTRU_";

/// Settings of the `ntru` tool.
///
/// Relative key paths are taken from the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NtruConfig {
    /// Parameter set used when generating keys
    pub param_set: NtruPreset,
    pub pubkey_file: PathBuf,
    pub privkey_file: PathBuf,
}

impl Default for NtruConfig {
    fn default() -> Self {
        Self {
            param_set: NtruPreset::default(),
            pubkey_file: PathBuf::from("pubKey.key"),
            privkey_file: PathBuf::from("privKey.key"),
        }
    }
}

/// Values given on the command line. They take precedence over everything
/// else.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_set: Option<NtruPreset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pubkey_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privkey_file: Option<PathBuf>,
}

/// Loads the configuration.
///
/// Layers, lowest precedence first: built in defaults, the YAML file (the
/// `cli_file` argument or the nearest `ntru.config.yaml`), `NTRU_*`
/// environment variables and `overrides`.
pub fn load_config(cli_file: Option<String>, overrides: CliOverrides) -> Result<NtruConfig> {
    let cwd = env::current_dir()?;
    let cli_file = cli_file.map(PathBuf::from);
    let resolved =
        resolve_config_path(find_in_parent, &cwd, DEFAULT_CONFIG_NAME, cli_file.as_deref());

    let mut figment = Figment::from(Serialized::defaults(NtruConfig::default()));
    if let Some(path) = &resolved {
        debug!("Loading configuration from {}", path.display());
        figment = figment.merge(Yaml::string(&read_config_file(path)?));
    }

    figment
        .merge(Env::prefixed(ENV_PREFIX))
        .merge(Serialized::defaults(overrides))
        .extract()
        .context("Could not parse configuration")
}

fn read_config_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| {
        format!(
            "Configuration file {} could not be read",
            path.display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_| {
            let config = load_config(None, CliOverrides::default()).map_err(|e| e.to_string())?;
            assert_eq!(config, NtruConfig::default());
            assert_eq!(config.param_set, NtruPreset::Ees401Ep1);
            assert_eq!(config.pubkey_file, PathBuf::from("pubKey.key"));
            assert_eq!(config.privkey_file, PathBuf::from("privKey.key"));
            Ok(())
        });
    }

    #[test]
    fn test_yaml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_NAME,
                r#"
param_set: ees1087ep2
pubkey_file: keys/alice.pub
"#,
            )?;

            let config = load_config(None, CliOverrides::default()).map_err(|e| e.to_string())?;
            assert_eq!(config.param_set, NtruPreset::Ees1087Ep2);
            assert_eq!(config.pubkey_file, PathBuf::from("keys/alice.pub"));
            assert_eq!(config.privkey_file, PathBuf::from("privKey.key"));
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_and_precedence() {
        Jail::expect_with(|jail| {
            jail.create_file(DEFAULT_CONFIG_NAME, "param_set: ees449ep1\n")?;
            jail.create_file(
                "other.yaml",
                "param_set: ees761ep1\nprivkey_file: from_yaml.key\n",
            )?;
            jail.set_env("NTRU_PRIVKEY_FILE", "from_env.key");
            jail.set_env("NTRU_PUBKEY_FILE", "env_pub.key");

            let config = load_config(
                Some("other.yaml".to_string()),
                CliOverrides {
                    pubkey_file: Some(PathBuf::from("cli_pub.key")),
                    ..Default::default()
                },
            )
            .map_err(|e| e.to_string())?;

            assert_eq!(config.param_set, NtruPreset::Ees761Ep1);
            assert_eq!(config.privkey_file, PathBuf::from("from_env.key"));
            assert_eq!(config.pubkey_file, PathBuf::from("cli_pub.key"));
            Ok(())
        });
    }

    #[test]
    fn test_unknown_param_set() {
        Jail::expect_with(|jail| {
            jail.create_file(DEFAULT_CONFIG_NAME, "param_set: ees123ep9\n")?;
            assert!(load_config(None, CliOverrides::default()).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_file_not_found() -> Result<()> {
        let Err(err) = load_config(Some("/nope/ntru.config.yaml".to_string()), CliOverrides::default())
        else {
            bail!("error expected");
        };
        let Some(e) = err.downcast_ref::<std::io::Error>() else {
            bail!("io error expected");
        };

        assert_eq!(e.kind(), std::io::ErrorKind::NotFound);

        Ok(())
    }
}
