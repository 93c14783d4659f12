//! Tracked-object adapter contract.
//!
//! The engine never inspects tracked state directly: every object crosses
//! this boundary as a [`StateTree`] built from a declared field set. This
//! replaces "observe arbitrary attribute reads/writes" designs with an
//! explicit interface fixed at construction time.
//!
//! # Contract
//!
//! - `field_names` must be stable for the lifetime of the object; reads and
//!   writes outside the declared set fail with [`FieldError::UnknownField`].
//! - `read_field` after `write_field` must return the written value;
//!   snapshot/restore round-trips rely on it.
//! - Adapters must never encode object identity (addresses, arbitrary ids
//!   that change between runs) into field values.

use std::collections::BTreeMap;

use weave_kernel::tree::StateTree;

/// Typed failure at the adapter boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// A field outside the declared set was read or written.
    UnknownField { object: String, field: String },
    /// A snapshot did not have the shape the object declares.
    ShapeMismatch { object: String, detail: String },
    /// Two tracked objects were registered under one id.
    DuplicateObject { object: String },
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField { object, field } => {
                write!(f, "unknown field `{field}` on tracked object `{object}`")
            }
            Self::ShapeMismatch { object, detail } => {
                write!(f, "snapshot shape mismatch for `{object}`: {detail}")
            }
            Self::DuplicateObject { object } => {
                write!(f, "duplicate tracked object id `{object}`")
            }
        }
    }
}

impl std::error::Error for FieldError {}

/// Trait for objects whose state participates in exploration.
pub trait TrackedObjectV1 {
    /// Stable identifier used as the snapshot key.
    fn object_id(&self) -> &str;

    /// The declared field set, in stable order.
    fn field_names(&self) -> Vec<String>;

    /// Read one declared field as a tree value.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::UnknownField`] for fields outside the declared set.
    fn read_field(&self, field: &str) -> Result<StateTree, FieldError>;

    /// Write one declared field from a tree value.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::UnknownField`] for fields outside the declared set.
    fn write_field(&mut self, field: &str, value: StateTree) -> Result<(), FieldError>;

    /// Snapshot the object as a mapping of its declared fields.
    ///
    /// # Errors
    ///
    /// Propagates the first field read failure.
    fn to_tree(&self) -> Result<StateTree, FieldError> {
        let mut entries = BTreeMap::new();
        for name in self.field_names() {
            let value = self.read_field(&name)?;
            entries.insert(name, value);
        }
        Ok(StateTree::Map(entries))
    }

    /// Restore the object from a snapshot produced by [`Self::to_tree`].
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ShapeMismatch`] if the tree is not a mapping;
    /// propagates field write failures.
    fn restore_tree(&mut self, tree: &StateTree) -> Result<(), FieldError> {
        let StateTree::Map(entries) = tree else {
            return Err(FieldError::ShapeMismatch {
                object: self.object_id().to_string(),
                detail: "snapshot is not a mapping".to_string(),
            });
        };
        for (name, value) in entries {
            self.write_field(name, value.clone())?;
        }
        Ok(())
    }
}

/// An immutable snapshot of every tracked object, keyed by object id.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotV1 {
    objects: BTreeMap<String, StateTree>,
}

impl SnapshotV1 {
    /// One object's tree, if present.
    #[must_use]
    pub fn object(&self, id: &str) -> Option<&StateTree> {
        self.objects.get(id)
    }

    /// The whole snapshot as a single mapping node for hashing.
    #[must_use]
    pub fn to_tree(&self) -> StateTree {
        StateTree::Map(self.objects.clone())
    }
}

/// The live (scratch) tracked objects the evaluator mutates during one step.
///
/// Branch isolation comes from snapshots, not from the store: the evaluator
/// restores the parent snapshot before every step run, so sibling branches
/// can never observe each other's mutations.
pub struct ObjectStoreV1 {
    objects: Vec<Box<dyn TrackedObjectV1>>,
}

impl std::fmt::Debug for ObjectStoreV1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStoreV1")
            .field(
                "objects",
                &self
                    .objects
                    .iter()
                    .map(|o| o.object_id().to_string())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl ObjectStoreV1 {
    /// Build a store, rejecting duplicate object ids.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::DuplicateObject`] if two objects share an id.
    pub fn new(objects: Vec<Box<dyn TrackedObjectV1>>) -> Result<Self, FieldError> {
        let mut seen = BTreeMap::new();
        for (i, obj) in objects.iter().enumerate() {
            if seen.insert(obj.object_id().to_string(), i).is_some() {
                return Err(FieldError::DuplicateObject {
                    object: obj.object_id().to_string(),
                });
            }
        }
        Ok(Self { objects })
    }

    /// True if an object with this id is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.objects.iter().any(|o| o.object_id() == id)
    }

    /// Mutable access to one object by id.
    pub fn object_mut(&mut self, id: &str) -> Option<&mut dyn TrackedObjectV1> {
        self.objects
            .iter_mut()
            .find(|o| o.object_id() == id)
            .map(|obj| &mut **obj as &mut dyn TrackedObjectV1)
    }

    /// Snapshot every object.
    ///
    /// # Errors
    ///
    /// Propagates the first adapter read failure.
    pub fn snapshot(&self) -> Result<SnapshotV1, FieldError> {
        let mut objects = BTreeMap::new();
        for obj in &self.objects {
            objects.insert(obj.object_id().to_string(), obj.to_tree()?);
        }
        Ok(SnapshotV1 { objects })
    }

    /// Restore every object from a snapshot of the same shape.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ShapeMismatch`] if an object is missing from the
    /// snapshot; propagates adapter write failures.
    pub fn restore(&mut self, snapshot: &SnapshotV1) -> Result<(), FieldError> {
        for obj in &mut self.objects {
            let Some(tree) = snapshot.objects.get(obj.object_id()) else {
                return Err(FieldError::ShapeMismatch {
                    object: obj.object_id().to_string(),
                    detail: "object missing from snapshot".to_string(),
                });
            };
            obj.restore_tree(tree)?;
        }
        Ok(())
    }
}
