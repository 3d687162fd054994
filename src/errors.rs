// ABOUTME: Re-exports error types from stride-core for unified type identity
// ABOUTME: Ensures AppError/ErrorCode are the same type across all workspace crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

pub use stride_core::errors::*;
