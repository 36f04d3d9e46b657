//
// Copyright (c) 2020-2022 science+computing ag and other contributors
//
// This program and the accompanying materials are made
// available under the terms of the Eclipse Public License 2.0
// which is available at https://www.eclipse.org/legal/epl-2.0/
//
// SPDX-License-Identifier: EPL-2.0
//

use anyhow::Result;
use clap::ArgMatches;

pub fn completions(matches: &ArgMatches) -> Result<()> {
    let shell = matches
        .get_one::<clap_complete::Shell>("shell")
        .copied()
        .unwrap(); // safe by clap

    clap_complete::generate(shell, &mut crate::cli::cli(), "envlink", &mut std::io::stdout());
    Ok(())
}
