// ABOUTME: Re-exports data models from stride-core for unified type identity
// ABOUTME: Settings, location fixes, step updates, snapshots, and run sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

pub use stride_core::models::*;
