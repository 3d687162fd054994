// ABOUTME: Core types and constants for the Stride run tracker
// ABOUTME: Foundation crate with error handling, constants, and the run data model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

#![deny(unsafe_code)]

//! # Stride Core
//!
//! Foundation crate providing shared types and constants for the Stride live
//! run tracker. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and storage errors
//! - **constants**: Noise gate, sampling, unit conversion, and storage constants
//! - **models**: Settings, location fixes, tracking snapshots, and run sessions

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`UserSettings`, `LocationFix`, `TrackingSnapshot`, `RunSession`)
pub mod models;
