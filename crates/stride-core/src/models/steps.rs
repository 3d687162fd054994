// ABOUTME: Step counter callback payload and reporting convention
// ABOUTME: Sources declare whether they report per-callback deltas or running totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a step source reports counts.
///
/// A source uses exactly one convention for its whole lifetime; mixing the
/// two would corrupt the running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepReporting {
    /// Each callback carries the steps taken since the previous callback
    #[default]
    Delta,
    /// Each callback carries the total since the counter was reset at start
    Cumulative,
}

impl fmt::Display for StepReporting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delta => f.write_str("delta"),
            Self::Cumulative => f.write_str("cumulative"),
        }
    }
}

impl FromStr for StepReporting {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "delta" => Ok(Self::Delta),
            "cumulative" | "total" => Ok(Self::Cumulative),
            other => Err(AppError::invalid_input(format!(
                "unknown step reporting: {other}"
            ))),
        }
    }
}

/// One step counter callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepUpdate {
    /// Delta or running total, per the source's `StepReporting`
    pub steps: u64,
}

impl StepUpdate {
    /// Wrap a raw count
    #[must_use]
    pub const fn new(steps: u64) -> Self {
        Self { steps }
    }
}
