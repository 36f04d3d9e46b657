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
use anyhow::Result;

use crate::util::EnvironmentVariableName;

pub fn parse_to_env(s: &str) -> Result<(EnvironmentVariableName, String)> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("Environment variable has no value: {}", s))?;

    if k.is_empty() {
        return Err(anyhow!("Environment variable has no name: {}", s));
    }

    Ok((EnvironmentVariableName::from(k), String::from(v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_to_env() {
        let (k, v) = parse_to_env("FOO=bar").unwrap();
        assert_eq!(k.as_ref(), "FOO");
        assert_eq!(v, "bar");
    }

    #[test]
    fn test_parse_to_env_empty_value() {
        let (k, v) = parse_to_env("FOO=").unwrap();
        assert_eq!(k.as_ref(), "FOO");
        assert_eq!(v, "");
    }

    #[test]
    fn test_parse_to_env_value_contains_equals() {
        let (k, v) = parse_to_env("FOO=bar=baz").unwrap();
        assert_eq!(k.as_ref(), "FOO");
        assert_eq!(v, "bar=baz");
    }

    #[test]
    fn test_parse_to_env_no_value() {
        assert!(parse_to_env("FOO").is_err());
    }

    #[test]
    fn test_parse_to_env_no_name() {
        assert!(parse_to_env("=bar").is_err());
    }
}
