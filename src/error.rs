//! Error types
//!
//! `ConfigError` is fatal and surfaces from [`crate::Engine::new`]. `SoftError`
//! covers tolerated races and out-of-phase calls; the engine logs them and
//! carries on. `StoreError` belongs to the best-score store.

use thiserror::Error;

use crate::sim::RoundPhase;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("weighted table `{table}` is empty")]
    EmptyTable { table: &'static str },
    #[error("weighted table `{table}` has invalid weight {weight} at entry {index}")]
    InvalidWeight {
        table: &'static str,
        index: usize,
        weight: f32,
    },
    #[error("weighted table `{table}` has non-positive total weight {total}")]
    NonPositiveTotal { table: &'static str, total: f32 },
    #[error("`{field}` range is inverted or negative ({min} > {max})")]
    InvalidRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("`{field}` must be within {expected}, got {value}")]
    OutOfBounds {
        field: &'static str,
        expected: &'static str,
        value: f32,
    },
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tuning json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tolerated misuse: logged, never propagated to the player
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SoftError {
    #[error("drop {0} is no longer live")]
    InvalidTap(u32),
    #[error("`{operation}` ignored during {phase:?}")]
    LifecycleViolation {
        operation: &'static str,
        phase: RoundPhase,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("best score io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("best score json error: {0}")]
    Json(#[from] serde_json::Error),
}
