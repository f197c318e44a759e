//! Ordered collection of pending requirement descriptors.

use crate::requirements::descriptor::RequirementDescriptor;

/// Append-only list of descriptors awaiting evaluation.
///
/// No deduplication: registering the same requirement twice keeps both, and
/// each must be satisfied on its own. Order only affects reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementSet {
    descriptors: Vec<RequirementDescriptor>,
}

impl RequirementSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a descriptor.
    pub fn push(&mut self, descriptor: RequirementDescriptor) {
        self.descriptors.push(descriptor);
    }

    /// Remove every descriptor.
    pub fn reset(&mut self) {
        self.descriptors.clear();
    }

    /// Iterate in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, RequirementDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl<'a> IntoIterator for &'a RequirementSet {
    type Item = &'a RequirementDescriptor;
    type IntoIter = std::slice::Iter<'a, RequirementDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
