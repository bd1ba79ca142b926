use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::extract::AssignmentRecord;
use crate::infer::Inferrer;
use crate::types::TypeDescriptor;

/// Variable bindings in first-assignment order. Rebinding a name replaces
/// its descriptor without moving it.
#[derive(Debug, Clone, Default)]
pub struct TypeContext {
    entries: Vec<(String, TypeDescriptor)>,
    index: HashMap<String, usize>,
}

impl TypeContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`, returning the descriptor it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        descriptor: TypeDescriptor,
    ) -> Option<TypeDescriptor> {
        let name = name.into();
        match self.index.get(&name) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, descriptor)),
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, descriptor));
                None
            }
        }
    }

    /// Infers `assignment` against the current bindings and binds the result,
    /// returning the descriptor it replaced.
    pub fn bind(
        &mut self,
        assignment: &AssignmentRecord,
        inferrer: &Inferrer<'_>,
    ) -> Option<TypeDescriptor> {
        let descriptor = inferrer.infer_expr(&assignment.value, self);
        log::trace!(
            "{}:{} {} {} {}",
            assignment.line,
            assignment.col,
            assignment.variable,
            assignment.operator.symbol(),
            descriptor
        );
        self.insert(assignment.variable.clone(), descriptor)
    }

    pub fn lookup(&self, name: &str) -> Option<&TypeDescriptor> {
        self.index.get(name).map(|&slot| &self.entries[slot].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeDescriptor)> {
        self.entries
            .iter()
            .map(|(name, descriptor)| (name.as_str(), descriptor))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for TypeContext {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, descriptor) in self.iter() {
            map.serialize_entry(name, descriptor)?;
        }
        map.end()
    }
}

/// Folds `assignments` in order, inferring each value against the bindings
/// accumulated so far.
pub fn build_context(assignments: &[AssignmentRecord], inferrer: &Inferrer<'_>) -> TypeContext {
    assignments
        .iter()
        .fold(TypeContext::new(), |mut context, assignment| {
            context.bind(assignment, inferrer);
            context
        })
}
