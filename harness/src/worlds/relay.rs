//! `relay`: two independent single-step processes over one shared flag.
//!
//! One process unconditionally raises the flag; the other asserts it is
//! already raised. The ordering where the observer runs first sees the flag
//! unset, so any exploration covering both orderings must surface the
//! violation.

use weave_kernel::tree::StateTree;
use weave_search::contract::TrackedObjectV1;
use weave_search::process::{step, ProcessV1};

use crate::record::RecordV1;

/// Tracked object id.
pub const OBJECT_ID: &str = "mailbox";

/// The shared flag field.
pub const FIELD: &str = "flag";

/// Value the raiser writes and the observer requires.
pub const RAISED: &str = "raised";

/// The mailbox with an unset flag.
#[must_use]
pub fn objects() -> Vec<Box<dyn TrackedObjectV1>> {
    vec![Box::new(RecordV1::new(
        OBJECT_ID,
        [(FIELD, StateTree::Absent)],
    ))]
}

/// The raiser and the observer, as independent single-step processes.
#[must_use]
pub fn processes() -> Vec<ProcessV1> {
    vec![
        ProcessV1::sequence(
            "raiser",
            OBJECT_ID,
            vec![step(|scope| scope.write(FIELD, StateTree::str(RAISED)))],
        ),
        ProcessV1::sequence(
            "observer",
            OBJECT_ID,
            vec![step(|scope| {
                let flag = scope.read(FIELD)?;
                scope.check(flag == StateTree::str(RAISED), "flag observed before raise")
            })],
        ),
    ]
}
