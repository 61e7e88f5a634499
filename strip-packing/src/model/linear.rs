use super::Assignment;
use super::IntVar;

/// The linear inequality `sum(coefficient * variable) <= rhs`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearInequality {
    terms: Vec<(i64, IntVar)>,
    rhs: i64,
}

impl LinearInequality {
    pub fn new(terms: impl IntoIterator<Item = (i64, IntVar)>, rhs: i64) -> LinearInequality {
        LinearInequality {
            terms: terms
                .into_iter()
                .filter(|&(coefficient, _)| coefficient != 0)
                .collect(),
            rhs,
        }
    }

    /// Add the term `coefficient * var` to the left-hand side.
    pub fn plus_term(mut self, coefficient: i64, var: IntVar) -> LinearInequality {
        if coefficient != 0 {
            self.terms.push((coefficient, var));
        }
        self
    }

    pub fn terms(&self) -> &[(i64, IntVar)] {
        &self.terms
    }

    pub fn rhs(&self) -> i64 {
        self.rhs
    }

    /// The value of the left-hand side, or `None` if a variable is unassigned.
    pub fn evaluate(&self, assignment: &Assignment) -> Option<i64> {
        self.terms.iter().try_fold(0, |sum, &(coefficient, var)| {
            assignment
                .integer(var)
                .map(|value| sum + coefficient * value)
        })
    }

    pub fn is_satisfied_by(&self, assignment: &Assignment) -> Option<bool> {
        self.evaluate(assignment).map(|lhs| lhs <= self.rhs)
    }
}
