//! `dice`: a single roll through a nondeterministic choice set.
//!
//! The engine forks once per face, in canonical (content-derived) order.
//! An empty face list makes the roll a dead end: zero successors, no error.

use weave_kernel::tree::{ChoiceSetV1, StateTree};
use weave_search::contract::TrackedObjectV1;
use weave_search::process::{step, ProcessV1};

use crate::record::RecordV1;

/// Tracked object id.
pub const OBJECT_ID: &str = "die";

/// The face field.
pub const FIELD: &str = "face";

/// The die before the roll.
#[must_use]
pub fn objects() -> Vec<Box<dyn TrackedObjectV1>> {
    vec![Box::new(RecordV1::new(OBJECT_ID, [(FIELD, StateTree::Absent)]))]
}

/// A single-step roller choosing among `faces`.
#[must_use]
pub fn processes(faces: &[i64]) -> Vec<ProcessV1> {
    let set: ChoiceSetV1 = faces.iter().map(|&f| StateTree::int(f)).collect();
    vec![ProcessV1::sequence(
        "roller",
        OBJECT_ID,
        vec![step(move |scope| {
            let face = scope.choose(&set)?;
            scope.write(FIELD, face)
        })],
    )]
}
