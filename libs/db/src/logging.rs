//! Log filtering for the database stack.
//!
//! SeaORM instruments `execute`/`query_*` with spans that record the whole
//! `Statement`, bound values included, and SQLx logs statement text at debug.
//! Subscribers built with [`log_targets`] keep both driver crates at `info`
//! or quieter, so values bound by repositories (passwords among them) never
//! reach the output regardless of the level chosen for everything else.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Targets;

/// Targets whose debug/trace output carries statement text or bound values.
pub const DRIVER_TARGETS: [&str; 2] = ["sea_orm", "sqlx"];

/// Most verbose level a driver target may log at.
pub const DRIVER_MAX_LEVEL: LevelFilter = LevelFilter::INFO;

/// Per-target filter: `default` for every target, driver targets capped at
/// [`DRIVER_MAX_LEVEL`].
pub fn log_targets(default: LevelFilter) -> Targets {
    let driver_level = default.min(DRIVER_MAX_LEVEL);
    DRIVER_TARGETS
        .iter()
        .fold(Targets::new().with_default(default), |targets, name| {
            targets.with_target(*name, driver_level)
        })
}
