//
// Copyright (c) 2020-2022 science+computing ag and other contributors
//
// This program and the accompanying materials are made
// available under the terms of the Eclipse Public License 2.0
// which is available at https://www.eclipse.org/legal/epl-2.0/
//
// SPDX-License-Identifier: EPL-2.0
//

mod associate;
pub use associate::associate;

mod completions;
pub use completions::completions;

mod db;
pub use db::db;

mod dissociate;
pub use dissociate::dissociate;

mod env_of;
pub use env_of::env_of;

mod register;
pub use register::register;
