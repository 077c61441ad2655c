//! # Tweak Error Types
//!
//! All errors that can occur while building a system or running a pass.

use diversity_procedural::ProceduralError;
use thiserror::Error;

/// Errors that can occur in the rule engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TweakError {
    /// A building block rejected its input.
    #[error(transparent)]
    Procedural(#[from] ProceduralError),

    /// Two bodies share a name.
    #[error("duplicate body: {0}")]
    DuplicateBody(String),

    /// A body orbits a body that does not exist.
    #[error("body {body} orbits unknown body {parent}")]
    UnknownParent {
        /// The orbiting body.
        body: String,
        /// The missing parent.
        parent: String,
    },

    /// The orbit relation contains a cycle.
    #[error("orbit cycle detected: {}", .0.join(" -> "))]
    CycleDetected(Vec<String>),

    /// Lookup of a body that is not in the system.
    #[error("body not found: {0}")]
    UnknownBody(String),

    /// A registered rule belongs to a group the config does not declare.
    #[error("missing config group: {0}")]
    MissingGroup(String),

    /// The host implements an older capability interface.
    #[error("host capability version {found} is older than required {required}")]
    IncompatibleHost {
        /// Version the engine needs.
        required: u32,
        /// Version the host reports.
        found: u32,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A rule failed on one body and was rolled back.
    #[error("rule {rule} failed on {body}: {reason}")]
    RuleFault {
        /// Rule name.
        rule: String,
        /// Body name.
        body: String,
        /// Error or panic message.
        reason: String,
    },
}

/// Result type for rule engine operations.
pub type TweakResult<T> = Result<T, TweakError>;
