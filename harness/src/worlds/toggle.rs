//! `toggle`: a generator process flipping a switch forever.
//!
//! The process never finishes on its own; only the step bound (or the
//! two-state revisit dedup) terminates exploration.

use weave_kernel::tree::StateTree;
use weave_search::contract::TrackedObjectV1;
use weave_search::process::{step, ProcessV1};

use crate::record::RecordV1;

/// Tracked object id.
pub const OBJECT_ID: &str = "switch";

/// The position field.
pub const FIELD: &str = "position";

/// The two positions.
pub const UP: &str = "up";
pub const DOWN: &str = "down";

/// The switch, starting up.
#[must_use]
pub fn objects() -> Vec<Box<dyn TrackedObjectV1>> {
    vec![Box::new(RecordV1::new(OBJECT_ID, [(FIELD, StateTree::str(UP))]))]
}

/// The toggling generator.
#[must_use]
pub fn processes() -> Vec<ProcessV1> {
    vec![ProcessV1::generator(
        "toggler",
        OBJECT_ID,
        vec![step(|scope| {
            let next = if scope.read(FIELD)? == StateTree::str(UP) {
                DOWN
            } else {
                UP
            };
            scope.write(FIELD, StateTree::str(next))
        })],
    )]
}
