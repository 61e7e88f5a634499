use std::ops::Not;

use crate::containers::StorageKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoolVar(usize);

impl BoolVar {
    pub(crate) fn new(index: usize) -> BoolVar {
        BoolVar(index)
    }

    pub fn positive(self) -> Lit {
        Lit {
            var: self,
            positive: true,
        }
    }

    pub fn negative(self) -> Lit {
        !self.positive()
    }
}

impl StorageKey for BoolVar {
    fn index(&self) -> usize {
        self.0
    }

    fn create_from_index(index: usize) -> Self {
        BoolVar(index)
    }
}

/// A bounded integer variable; its domain is stored in the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntVar(usize);

impl StorageKey for IntVar {
    fn index(&self) -> usize {
        self.0
    }

    fn create_from_index(index: usize) -> Self {
        IntVar(index)
    }
}

/// A boolean variable or its negation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Lit {
    var: BoolVar,
    positive: bool,
}

impl Lit {
    pub fn var(self) -> BoolVar {
        self.var
    }

    pub fn is_positive(self) -> bool {
        self.positive
    }
}

impl Not for Lit {
    type Output = Lit;

    fn not(self) -> Self::Output {
        Lit {
            var: self.var,
            positive: !self.positive,
        }
    }
}
