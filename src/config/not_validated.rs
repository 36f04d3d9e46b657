//
// Copyright (c) 2020-2022 science+computing ag and other contributors
//
// This program and the accompanying materials are made
// available under the terms of the Eclipse Public License 2.0
// which is available at https://www.eclipse.org/legal/epl-2.0/
//
// SPDX-License-Identifier: EPL-2.0
//

use anyhow::anyhow;
use anyhow::Context;
use anyhow::Result;
use getset::CopyGetters;
use getset::Getters;
use serde::Deserialize;

use crate::config::util::*;
use crate::config::Configuration;

/// The configuration as loaded from disk, before validation
#[derive(Debug, Getters, CopyGetters, Deserialize)]
pub struct NotValidatedConfiguration {
    /// The versions of this crate the configuration is compatible with
    compatibility: semver::VersionReq,

    #[getset(get = "pub")]
    database_host: String,

    #[serde(default = "default_database_port")]
    #[getset(get_copy = "pub")]
    database_port: u16,

    #[getset(get = "pub")]
    database_user: String,

    #[getset(get = "pub")]
    database_password: String,

    #[getset(get = "pub")]
    database_name: String,

    #[getset(get_copy = "pub")]
    database_connection_timeout: Option<u16>,
}

impl NotValidatedConfiguration {
    pub fn validate(self) -> Result<Configuration> {
        let crate_version = semver::Version::parse(env!("CARGO_PKG_VERSION"))
            .context("Parsing version of crate (CARGO_PKG_VERSION) into semver::Version object")?;

        if !self.compatibility.matches(&crate_version) {
            return Err(anyhow!(
                "Configuration is not compatible to envlink {}",
                crate_version
            ));
        }

        Ok(Configuration { inner: self })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_configuration() {
        let c: NotValidatedConfiguration = toml::from_str(
            r#"
            compatibility = "0.2"

            database_host     = "localhost"
            database_user     = "envlink"
            database_password = "envlink"
            database_name     = "envlink"
            "#,
        )
        .unwrap();

        assert_eq!(c.database_host(), "localhost");
        assert_eq!(c.database_port(), 5432);
        assert_eq!(c.database_connection_timeout(), None);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_database_port_can_be_overridden() {
        let c: NotValidatedConfiguration = toml::from_str(
            r#"
            compatibility = "0.2"

            database_host     = "localhost"
            database_port     = 5433
            database_user     = "envlink"
            database_password = "envlink"
            database_name     = "envlink"
            "#,
        )
        .unwrap();

        assert_eq!(c.database_port(), 5433);
    }

    #[test]
    fn test_incompatible_configuration_is_rejected() {
        let c: NotValidatedConfiguration = toml::from_str(
            r#"
            compatibility = "<0.2.0"

            database_host     = "localhost"
            database_user     = "envlink"
            database_password = "envlink"
            database_name     = "envlink"
            "#,
        )
        .unwrap();

        assert!(c.validate().is_err());
    }
}
