//! Typed evaluation errors.
//!
//! Only abnormal outcomes are errors. Frontier exhaustion and step-bound
//! exhaustion are normal terminations expressed via
//! [`crate::graph::TerminationV1`] in the evaluation report; they never
//! surface here.

use weave_kernel::proof::encode::EncodeError;

use crate::configuration::ScheduleEventV1;
use crate::contract::FieldError;

/// A user invariant failed inside a step -- the engine's primary useful
/// output.
///
/// Carries the full interleaving that reached the violating configuration,
/// so the counterexample can be replayed by hand: follow `schedule` from the
/// initial configuration, then run `process`'s step at `cursor`.
#[derive(Debug, Clone, PartialEq)]
pub struct ViolationReportV1 {
    /// Name of the process whose step violated the invariant.
    pub process: String,
    /// The violating process's cursor at the time of the violation.
    pub cursor: u64,
    /// The assertion message (or panic payload).
    pub message: String,
    /// Hex fingerprint of the configuration the step ran from.
    pub configuration: String,
    /// The interleaving that reached that configuration, oldest first.
    pub schedule: Vec<ScheduleEventV1>,
}

impl std::fmt::Display for ViolationReportV1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invariant violation in process `{}` (step {}): {} [after {} transition(s), at {}]",
            self.process,
            self.cursor,
            self.message,
            self.schedule.len(),
            self.configuration,
        )
    }
}

/// Abnormal evaluation outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluateError {
    /// A user invariant failed. Aborts the whole search immediately.
    Violation(ViolationReportV1),
    /// A value could not be canonically encoded or hashed.
    Encoding(EncodeError),
    /// A tracked-object adapter failed outside a step body.
    Adapter(FieldError),
    /// A process was bound to an object id that is not registered
    /// (pre-flight validation).
    UnknownTarget { process: String, target: String },
    /// The visited set contradicted itself. A defect in the engine, never
    /// silently ignored.
    VisitedCorrupted { fingerprint: String },
}

impl std::fmt::Display for EvaluateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Violation(report) => report.fmt(f),
            Self::Encoding(err) => write!(f, "encoding failure: {err}"),
            Self::Adapter(err) => write!(f, "adapter failure: {err}"),
            Self::UnknownTarget { process, target } => {
                write!(f, "process `{process}` targets unknown object `{target}`")
            }
            Self::VisitedCorrupted { fingerprint } => {
                write!(f, "visited set corrupted at fingerprint {fingerprint}")
            }
        }
    }
}

impl std::error::Error for EvaluateError {}

impl From<EncodeError> for EvaluateError {
    fn from(err: EncodeError) -> Self {
        Self::Encoding(err)
    }
}

impl From<FieldError> for EvaluateError {
    fn from(err: FieldError) -> Self {
        Self::Adapter(err)
    }
}
