// ABOUTME: Re-exports constants from stride-core for unified access
// ABOUTME: Noise gate, sampling, unit conversion, and storage constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

pub use stride_core::constants::*;
