use super::BoolVar;
use super::IntVar;
use super::Lit;
use super::SymbolicModel;
use crate::containers::KeyedVec;

/// Values for the variables of a [`SymbolicModel`], as reported by a backend.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    booleans: KeyedVec<BoolVar, Option<bool>>,
    integers: KeyedVec<IntVar, Option<i64>>,
}

impl Assignment {
    /// An assignment in which none of the variables of the model have a value yet.
    pub fn for_model(model: &SymbolicModel) -> Assignment {
        Assignment {
            booleans: KeyedVec::filled(model.num_booleans(), None),
            integers: KeyedVec::filled(model.num_integers(), None),
        }
    }

    pub fn set_boolean(&mut self, var: BoolVar, value: bool) {
        if let Some(slot) = self.booleans.get_mut(var) {
            *slot = Some(value);
        }
    }

    pub fn set_integer(&mut self, var: IntVar, value: i64) {
        if let Some(slot) = self.integers.get_mut(var) {
            *slot = Some(value);
        }
    }

    pub fn boolean(&self, var: BoolVar) -> Option<bool> {
        self.booleans.get(var).copied().flatten()
    }

    pub fn literal(&self, literal: Lit) -> Option<bool> {
        self.boolean(literal.var())
            .map(|value| value == literal.is_positive())
    }

    pub fn integer(&self, var: IntVar) -> Option<i64> {
        self.integers.get(var).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_only_kept_for_variables_of_the_model() {
        let mut model = SymbolicModel::default();
        let flag = model.new_boolean();
        let size = model.new_integer(0, 5);

        let mut assignment = Assignment::for_model(&model);
        assert_eq!(None, assignment.boolean(flag));

        assignment.set_boolean(flag, true);
        assignment.set_integer(size, 3);
        // a variable of a larger model
        let foreign = BoolVar::new(7);
        assignment.set_boolean(foreign, true);

        assert_eq!(Some(true), assignment.boolean(flag));
        assert_eq!(Some(false), assignment.literal(flag.negative()));
        assert_eq!(Some(3), assignment.integer(size));
        assert_eq!(None, assignment.boolean(foreign));
    }
}
