// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors
// ABOUTME: Helper modules for stride-cli
// ABOUTME: Provides terminal display formatting for runs, totals, and settings

pub mod display;
