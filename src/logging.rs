// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unglue and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset and the caller passes none.
pub const DEFAULT_FILTER: &str = "unglue=info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),
}

/// Installs a global `fmt` subscriber writing to stderr.
///
/// `RUST_LOG` wins over `filter`. Returns `Ok(false)` when a global subscriber was already set,
/// so hosts and tests may call this more than once.
pub fn init_tracing(filter: Option<&str>) -> Result<bool, LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => EnvFilter::try_new(filter.unwrap_or(DEFAULT_FILTER))?,
    };
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();
    Ok(installed)
}
