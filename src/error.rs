//! Error types for the lattice planner.

use thiserror::Error;

/// Planner error type.
///
/// Covers three kinds of failure: preconditions rejected before any search
/// work happens (returned by environment setup), search outcomes the calling
/// engine reports (`NoPath`, `Timeout`), and invariant violations that abort
/// a plan outright.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanningError {
    /// The collision oracle could not evaluate a state.
    #[error("collision checking unavailable: {0}")]
    CollisionCheckingUnavailable(String),

    /// The requested start configuration is in collision.
    #[error("start state is in collision")]
    StartInCollision,

    /// The requested goal configuration is in collision.
    #[error("goal state is in collision")]
    GoalInCollision,

    /// The start configuration could not be used (missing joint value,
    /// end effector outside the workspace grid).
    #[error("invalid start state: {0}")]
    InvalidStart(String),

    /// The goal configuration could not be used.
    #[error("invalid goal state: {0}")]
    InvalidGoal(String),

    /// Self and world distance fields disagree on grid dimensions.
    #[error("self and world distance fields disagree on grid dimensions")]
    GridMismatch,

    /// The plan request names a planning group the robot model lacks.
    #[error("unknown planning group: {0}")]
    UnknownGroup(String),

    /// The search engine exhausted the graph without reaching the goal.
    #[error("no path found")]
    NoPath,

    /// The search engine ran out of budget.
    #[error("planning timed out")]
    Timeout,

    /// A state id outside the interned range was presented. This is a
    /// contract violation by the search engine and aborts the plan.
    #[error("state id {id} out of range (state table holds {len} entries)")]
    InvalidStateId {
        /// The offending id.
        id: u32,
        /// Number of interned states at the time of the lookup.
        len: usize,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for PlanningError {
    fn from(e: toml::de::Error) -> Self {
        PlanningError::Config(e.to_string())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PlanningError>;
