//! Step and process model.
//!
//! A step is one atomic transition: however much ordinary Rust it calls, no
//! other process can observe anything between its first and last effect. The
//! only suspension points in the whole engine are the boundaries between
//! steps. A process is an ordered list of steps bound to one tracked object
//! -- one concurrent actor whose steps interleave freely with other
//! processes' steps.

use weave_kernel::proof::encode::EncodeError;
use weave_kernel::tree::{ChoiceSetV1, StateTree};

use crate::contract::{FieldError, TrackedObjectV1};

/// Why a step run did not complete normally.
///
/// `ChoicePoint` is a control signal, not a failure: it tells the evaluator
/// to fork one successor per choice member and re-run the step with the
/// choice resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum StepFailureV1 {
    /// A user invariant failed. Aborts the whole search.
    AssertionViolation { message: String },
    /// The step consumed an unresolved nondeterministic choice.
    ChoicePoint { set: ChoiceSetV1 },
    /// Adapter failure while reading or writing the target.
    Field(FieldError),
    /// A value could not be canonically encoded.
    Encoding(EncodeError),
}

impl From<FieldError> for StepFailureV1 {
    fn from(err: FieldError) -> Self {
        Self::Field(err)
    }
}

impl From<EncodeError> for StepFailureV1 {
    fn from(err: EncodeError) -> Self {
        Self::Encoding(err)
    }
}

/// A boxed step body. Use [`step`] to build one from a closure.
pub type StepFnV1 = Box<dyn Fn(&mut StepScopeV1<'_>) -> Result<(), StepFailureV1> + Send + Sync>;

/// Box a closure as a step.
pub fn step<F>(body: F) -> StepFnV1
where
    F: Fn(&mut StepScopeV1<'_>) -> Result<(), StepFailureV1> + Send + Sync + 'static,
{
    Box::new(body)
}

/// What a running step sees: its bound target plus the assertion and
/// choice surfaces.
pub struct StepScopeV1<'a> {
    target: &'a mut dyn TrackedObjectV1,
    resolutions: &'a [StateTree],
    next_resolution: usize,
}

impl<'a> StepScopeV1<'a> {
    pub(crate) fn new(target: &'a mut dyn TrackedObjectV1, resolutions: &'a [StateTree]) -> Self {
        Self {
            target,
            resolutions,
            next_resolution: 0,
        }
    }

    /// Read a field of the bound target.
    ///
    /// # Errors
    ///
    /// Propagates adapter failures as [`StepFailureV1::Field`].
    pub fn read(&self, field: &str) -> Result<StateTree, StepFailureV1> {
        Ok(self.target.read_field(field)?)
    }

    /// Write a field of the bound target.
    ///
    /// # Errors
    ///
    /// Propagates adapter failures as [`StepFailureV1::Field`].
    pub fn write(&mut self, field: &str, value: StateTree) -> Result<(), StepFailureV1> {
        Ok(self.target.write_field(field, value)?)
    }

    /// Assert a user invariant.
    ///
    /// # Errors
    ///
    /// Returns [`StepFailureV1::AssertionViolation`] when `condition` is false.
    pub fn check(&self, condition: bool, message: &str) -> Result<(), StepFailureV1> {
        if condition {
            Ok(())
        } else {
            Err(StepFailureV1::AssertionViolation {
                message: message.to_string(),
            })
        }
    }

    /// Consume one nondeterministic choice.
    ///
    /// On the first (unresolved) encounter this aborts the step run with
    /// [`StepFailureV1::ChoicePoint`]; the evaluator forks one successor per
    /// member and re-runs the step with the member pre-resolved. Steps must
    /// therefore keep any effects before `choose` idempotent -- the run up to
    /// the choice point is discarded and replayed.
    ///
    /// # Errors
    ///
    /// Returns [`StepFailureV1::ChoicePoint`] when the choice is unresolved.
    pub fn choose(&mut self, set: &ChoiceSetV1) -> Result<StateTree, StepFailureV1> {
        if let Some(value) = self.resolutions.get(self.next_resolution) {
            self.next_resolution += 1;
            Ok(value.clone())
        } else {
            Err(StepFailureV1::ChoicePoint { set: set.clone() })
        }
    }
}

/// Whether a process runs its steps once or forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessModeV1 {
    /// Finite: the cursor runs past the last step and the process finishes.
    Sequence,
    /// Generator-style: always enabled, the cursor wraps around.
    Generator,
}

/// An ordered list of steps bound to one tracked object.
///
/// The process itself is immutable during exploration; the cursor lives in
/// the configuration, and the evaluator owns advancement.
pub struct ProcessV1 {
    name: String,
    target: String,
    mode: ProcessModeV1,
    steps: Vec<StepFnV1>,
}

impl ProcessV1 {
    /// A finite process: runs each step once, in order, then finishes.
    #[must_use]
    pub fn sequence(name: impl Into<String>, target: impl Into<String>, steps: Vec<StepFnV1>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            mode: ProcessModeV1::Sequence,
            steps,
        }
    }

    /// A generator-style process: cycles through its steps forever and never
    /// finishes on its own. Callers must rely on the step bound (or state
    /// convergence) for termination.
    #[must_use]
    pub fn generator(name: impl Into<String>, target: impl Into<String>, steps: Vec<StepFnV1>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            mode: ProcessModeV1::Generator,
            steps,
        }
    }

    /// Process name (used in schedules and violation reports).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the tracked object this process is bound to.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Sequence or generator.
    #[must_use]
    pub const fn mode(&self) -> ProcessModeV1 {
        self.mode
    }

    /// True while the process has a next step to offer at this cursor.
    #[must_use]
    pub fn enabled(&self, cursor: u64) -> bool {
        match self.mode {
            ProcessModeV1::Sequence => cursor < self.steps.len() as u64,
            ProcessModeV1::Generator => !self.steps.is_empty(),
        }
    }

    /// The step the cursor points at, if the process is enabled.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn step_at(&self, cursor: u64) -> Option<&StepFnV1> {
        if self.steps.is_empty() {
            return None;
        }
        match self.mode {
            ProcessModeV1::Sequence => self.steps.get(cursor as usize),
            ProcessModeV1::Generator => self.steps.get((cursor % self.steps.len() as u64) as usize),
        }
    }

    /// The cursor after running the step at `cursor`.
    #[must_use]
    pub fn advance(&self, cursor: u64) -> u64 {
        match self.mode {
            ProcessModeV1::Sequence => cursor + 1,
            ProcessModeV1::Generator => (cursor + 1) % self.steps.len() as u64,
        }
    }
}

impl std::fmt::Debug for ProcessV1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessV1")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("mode", &self.mode)
            .field("steps", &self.steps.len())
            .finish()
    }
}
