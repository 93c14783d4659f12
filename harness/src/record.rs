//! `RecordV1`: a tracked object with a declared field set.
//!
//! The field set is fixed at construction; reads and writes outside it fail
//! with `UnknownField`. This is the explicit-boundary replacement for
//! "intercept arbitrary attribute access" designs: a record declares up
//! front exactly which state participates in exploration.

use std::collections::BTreeMap;

use weave_kernel::tree::StateTree;
use weave_search::contract::{FieldError, TrackedObjectV1};

/// A string-keyed record of tree-valued fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordV1 {
    id: String,
    fields: BTreeMap<String, StateTree>,
}

impl RecordV1 {
    /// Build a record with its declared fields and initial values.
    #[must_use]
    pub fn new<K: Into<String>>(
        id: impl Into<String>,
        fields: impl IntoIterator<Item = (K, StateTree)>,
    ) -> Self {
        Self {
            id: id.into(),
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl TrackedObjectV1 for RecordV1 {
    fn object_id(&self) -> &str {
        &self.id
    }

    fn field_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    fn read_field(&self, field: &str) -> Result<StateTree, FieldError> {
        self.fields
            .get(field)
            .cloned()
            .ok_or_else(|| FieldError::UnknownField {
                object: self.id.clone(),
                field: field.to_string(),
            })
    }

    fn write_field(&mut self, field: &str, value: StateTree) -> Result<(), FieldError> {
        match self.fields.get_mut(field) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(FieldError::UnknownField {
                object: self.id.clone(),
                field: field.to_string(),
            }),
        }
    }
}
