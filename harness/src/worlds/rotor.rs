//! `rotor`: a generator process cycling a counter with a fixed period.
//!
//! The reachable state space is exactly the cycle, so the distinct-state
//! count stops growing at `period` no matter how generous the step bound.

use weave_kernel::tree::StateTree;
use weave_search::contract::TrackedObjectV1;
use weave_search::process::{step, ProcessV1};

use crate::record::RecordV1;

/// Tracked object id.
pub const OBJECT_ID: &str = "rotor";

/// The position field.
pub const FIELD: &str = "position";

/// The rotor at position zero.
#[must_use]
pub fn objects() -> Vec<Box<dyn TrackedObjectV1>> {
    vec![Box::new(RecordV1::new(OBJECT_ID, [(FIELD, StateTree::int(0))]))]
}

/// The advancing generator. `period` must be positive.
#[must_use]
pub fn processes(period: i64) -> Vec<ProcessV1> {
    vec![ProcessV1::generator(
        "advancer",
        OBJECT_ID,
        vec![step(move |scope| {
            let position = match scope.read(FIELD)? {
                StateTree::Int(p) => p,
                _ => 0,
            };
            scope.write(FIELD, StateTree::int((position + 1) % period))
        })],
    )]
}
