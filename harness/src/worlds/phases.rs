//! `phases`: one actor moving a cell through sequential phases.
//!
//! Two builders over the same mutations:
//!
//! - [`phased_process`]: two ordered steps (advance, then verify-and-reset).
//!   Each step is its own transition, so the engine sees the intermediate
//!   phase.
//! - [`fused_process`]: the same logic in a single step whose second half is
//!   an ordinary function call. Sub-calls run inside the step's atomic
//!   boundary, so the intermediate phase is never an observable
//!   configuration.

use weave_kernel::tree::StateTree;
use weave_search::contract::TrackedObjectV1;
use weave_search::process::{step, ProcessV1, StepFailureV1, StepScopeV1};

use crate::record::RecordV1;

/// Tracked object id.
pub const OBJECT_ID: &str = "cell";

/// The phase field.
pub const FIELD: &str = "phase";

/// Initial and final phase.
pub const REST: &str = "rest";

/// Intermediate phase.
pub const BUSY: &str = "busy";

/// The cell at rest.
#[must_use]
pub fn objects() -> Vec<Box<dyn TrackedObjectV1>> {
    vec![Box::new(RecordV1::new(
        OBJECT_ID,
        [(FIELD, StateTree::str(REST))],
    ))]
}

/// Verify the cell is busy, then put it back to rest. Ordinary logic, not a
/// step: callers decide the atomic boundary.
fn verify_and_reset(scope: &mut StepScopeV1<'_>) -> Result<(), StepFailureV1> {
    let phase = scope.read(FIELD)?;
    scope.check(phase == StateTree::str(BUSY), "cell must be busy")?;
    scope.write(FIELD, StateTree::str(REST))
}

/// Two ordered steps: the intermediate `busy` phase is observable.
#[must_use]
pub fn phased_process() -> ProcessV1 {
    ProcessV1::sequence(
        "worker",
        OBJECT_ID,
        vec![
            step(|scope| scope.write(FIELD, StateTree::str(BUSY))),
            step(verify_and_reset),
        ],
    )
}

/// One step doing both halves: the intermediate phase stays inside the
/// atomic boundary.
#[must_use]
pub fn fused_process() -> ProcessV1 {
    ProcessV1::sequence(
        "worker",
        OBJECT_ID,
        vec![step(|scope| {
            scope.write(FIELD, StateTree::str(BUSY))?;
            verify_and_reset(scope)
        })],
    )
}
