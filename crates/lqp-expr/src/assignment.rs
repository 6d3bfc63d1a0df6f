//! Values assigned to decision variables.

use crate::ids::VariableId;
use std::collections::{BTreeMap, HashMap};

/// Source of variable values used to evaluate expressions.
///
/// Variables without an entry read as `0.0`.
pub trait Assignment {
    fn value(&self, variable: VariableId) -> f64;
}

impl Assignment for BTreeMap<VariableId, f64> {
    fn value(&self, variable: VariableId) -> f64 {
        self.get(&variable).copied().unwrap_or(0.0)
    }
}

impl<S: std::hash::BuildHasher> Assignment for HashMap<VariableId, f64, S> {
    fn value(&self, variable: VariableId) -> f64 {
        self.get(&variable).copied().unwrap_or(0.0)
    }
}

/// Dense values indexed by [`VariableId::index`].
impl Assignment for [f64] {
    fn value(&self, variable: VariableId) -> f64 {
        self.get(variable.index()).copied().unwrap_or(0.0)
    }
}

impl Assignment for Vec<f64> {
    fn value(&self, variable: VariableId) -> f64 {
        self.as_slice().value(variable)
    }
}
