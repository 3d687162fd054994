// ABOUTME: Main library entry point for the Stride run tracker
// ABOUTME: Live GPS run tracking, unit formatting, run history, and user settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

#![deny(unsafe_code)]

//! # Stride
//!
//! The computational core of an armband running display: it reduces a noisy
//! stream of GPS fixes and step callbacks to distance, speed, pace, elapsed
//! time and step count, and keeps a capped history of completed runs.
//!
//! ## Architecture
//!
//! - **Tracking**: [`tracking::TrackingEngine`] owns the live run and its accumulators
//! - **Sensors**: traits for the platform location, permission and step sources
//! - **Formatters**: unit conversion and the display rules for every stat
//! - **History / Settings**: best-effort persistent stores over [`storage::KeyValueStore`]
//! - **Run**: [`run::RunController`] connecting the engine to both stores
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stride::config::TrackingConfig;
//! use stride::models::{GpsAccuracy, LocationFix};
//! use stride::sensors::{SensorSources, SyntheticSensors};
//! use stride::tracking::TrackingEngine;
//!
//! # async fn example() -> stride::errors::AppResult<()> {
//! let sensors = Arc::new(SyntheticSensors::new());
//! let engine = TrackingEngine::new(SensorSources::synthetic(&sensors), TrackingConfig::default())?;
//!
//! engine.start(GpsAccuracy::High).await?;
//! engine.on_position_fix(&LocationFix::at(0.0, 0.0, 0));
//! engine.on_position_fix(&LocationFix::at(0.0, 0.00009, 5_000));
//! let run = engine.stop().await;
//! # Ok(())
//! # }
//! ```

/// Configuration management
pub mod config;

/// Application constants, grouped by domain
pub mod constants;

/// Unified error handling
pub mod errors;

/// Unit conversion and stat display formatting
pub mod formatters;

/// Great-circle distance
pub mod geo;

/// Persistent run history
pub mod history;

/// Logging setup and structured run events
pub mod logging;

/// Data model shared across components
pub mod models;

/// Engine-to-store lifecycle glue
pub mod run;

/// Platform sensor seams
pub mod sensors;

/// Persistent user preferences
pub mod settings;

/// Key/value persistence backends
pub mod storage;

/// Live run tracking
pub mod tracking;
