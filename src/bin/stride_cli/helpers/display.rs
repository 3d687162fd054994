// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors
// ABOUTME: Output formatting helpers for stride-cli
// ABOUTME: Renders runs, history totals, and preferences with the display unit rules

use stride::formatters::{
    format_distance, format_recorded_stat, format_steps, format_time, StatKind,
};
use stride::history::HistorySummary;
use stride::models::{RunSession, UnitsSnapshot, UserSettings};

fn started_label(session: &RunSession) -> String {
    session.started_at().map_or_else(
        || session.started_at_unix_ms.to_string(),
        |at| at.format("%Y-%m-%d %H:%M UTC").to_string(),
    )
}

/// One line per run for `history list`
pub fn display_run_row(session: &RunSession) {
    let units = &session.units_snapshot;
    println!(
        "{}  {}  {:>7} {:<2}  {:>8}  {:>6} {}",
        started_label(session),
        session.id,
        format_recorded_stat(StatKind::Distance, session),
        StatKind::Distance.label(units),
        format_recorded_stat(StatKind::Time, session),
        format_recorded_stat(StatKind::Pace, session),
        StatKind::Pace.label(units),
    );
}

/// Every stat of one run, in the units it was recorded with
pub fn display_run(session: &RunSession) {
    println!("\nRun {}", session.id);
    println!("{}", "=".repeat(50));
    println!("   Started: {}", started_label(session));
    for kind in StatKind::ALL {
        println!(
            "   {:<9} {} {}",
            format!("{kind:?}:"),
            format_recorded_stat(kind, session),
            kind.label(&session.units_snapshot),
        );
    }
}

/// Totals across history, in the current display units
pub fn display_summary(summary: &HistorySummary, units: &UnitsSnapshot) {
    println!("\nHistory Summary");
    println!("{}", "=".repeat(50));
    println!("   Runs:     {}", summary.total_runs);
    println!(
        "   Distance: {} {}",
        format_distance(summary.total_distance_meters, units.distance_unit),
        StatKind::Distance.label(units),
    );
    println!("   Time:     {}", format_time(summary.total_duration_seconds));
    println!("   Steps:    {}", format_steps(summary.total_steps));
}

/// Stored preferences
pub fn display_settings(settings: &UserSettings) {
    println!("\nSettings");
    println!("{}", "=".repeat(50));
    println!("   Distance unit: {}", settings.distance_unit);
    println!("   Pace unit:     {}", settings.pace_unit);
    println!("   Speed unit:    {}", settings.speed_unit);
    println!("   Theme:         {}", settings.theme);
    println!("   Lock rotation: {}", settings.lock_rotation);
    println!("   GPS accuracy:  {}", settings.gps_accuracy);
}
