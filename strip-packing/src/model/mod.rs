//! A solver-independent model: boolean and bounded integer variables, clauses, linear
//! inequalities, disjunctions of linear inequalities and an optional objective to minimise.
//!
//! Encoders build a [`SymbolicModel`]; a [`Backend`](crate::backend::Backend) translates it to an
//! engine and reports an [`Assignment`] back.

mod assignment;
mod linear;
mod variables;

pub use assignment::Assignment;
pub use linear::LinearInequality;
use log::debug;
pub use variables::BoolVar;
pub use variables::IntVar;
pub use variables::Lit;

use crate::containers::KeyedVec;
use crate::statistics::log_statistic;
use crate::statistics::should_log_statistics;

/// The inclusive range of values an integer variable can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntegerDomain {
    pub lower: i64,
    pub upper: i64,
}

impl IntegerDomain {
    pub fn contains(&self, value: i64) -> bool {
        self.lower <= value && value <= self.upper
    }

    pub fn is_empty(&self) -> bool {
        self.lower > self.upper
    }
}

#[derive(Clone, Debug, Default)]
pub struct SymbolicModel {
    num_booleans: usize,
    domains: KeyedVec<IntVar, IntegerDomain>,
    clauses: Vec<Vec<Lit>>,
    inequalities: Vec<LinearInequality>,
    /// At least one inequality of every disjunction has to hold.
    disjunctions: Vec<Vec<LinearInequality>>,
    objective: Option<IntVar>,
}

impl SymbolicModel {
    pub fn new_boolean(&mut self) -> BoolVar {
        self.num_booleans += 1;
        BoolVar::new(self.num_booleans - 1)
    }

    pub fn new_integer(&mut self, lower: i64, upper: i64) -> IntVar {
        self.domains.push(IntegerDomain { lower, upper })
    }

    /// Add a clause; the empty clause makes the model infeasible.
    pub fn add_clause(&mut self, literals: impl IntoIterator<Item = Lit>) {
        self.clauses.push(literals.into_iter().collect());
    }

    /// Add `sum(terms) <= rhs`.
    pub fn add_inequality(&mut self, inequality: LinearInequality) {
        self.inequalities.push(inequality);
    }

    /// Require at least one of the inequalities to hold; the empty disjunction makes the model
    /// infeasible.
    pub fn add_disjunction(&mut self, disjuncts: impl IntoIterator<Item = LinearInequality>) {
        self.disjunctions.push(disjuncts.into_iter().collect());
    }

    pub fn minimise(&mut self, objective: IntVar) {
        self.objective = Some(objective);
    }

    pub fn num_booleans(&self) -> usize {
        self.num_booleans
    }

    pub fn booleans(&self) -> impl Iterator<Item = BoolVar> {
        (0..self.num_booleans).map(BoolVar::new)
    }

    pub fn integers(&self) -> impl Iterator<Item = (IntVar, IntegerDomain)> + '_ {
        self.domains.entries().map(|(var, domain)| (var, *domain))
    }

    pub fn num_integers(&self) -> usize {
        self.domains.len()
    }

    pub fn domain(&self, var: IntVar) -> IntegerDomain {
        self.domains[var]
    }

    pub fn clauses(&self) -> &[Vec<Lit>] {
        &self.clauses
    }

    pub fn inequalities(&self) -> &[LinearInequality] {
        &self.inequalities
    }

    pub fn disjunctions(&self) -> &[Vec<LinearInequality>] {
        &self.disjunctions
    }

    pub fn objective(&self) -> Option<IntVar> {
        self.objective
    }

    /// Whether the model contains a constraint which can never be satisfied by construction.
    pub fn is_trivially_infeasible(&self) -> bool {
        self.clauses.iter().any(Vec::is_empty)
            || self.disjunctions.iter().any(Vec::is_empty)
            || self.domains.iter().any(IntegerDomain::is_empty)
    }

    /// Checks that every variable is assigned within its domain and that every constraint holds.
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        let booleans_assigned = self
            .booleans()
            .all(|var| assignment.boolean(var).is_some());
        let integers_in_domain = self.integers().all(|(var, domain)| {
            assignment
                .integer(var)
                .is_some_and(|value| domain.contains(value))
        });

        booleans_assigned
            && integers_in_domain
            && self.clauses.iter().all(|clause| {
                clause
                    .iter()
                    .any(|&literal| assignment.literal(literal) == Some(true))
            })
            && self
                .inequalities
                .iter()
                .all(|inequality| inequality.is_satisfied_by(assignment) == Some(true))
            && self.disjunctions.iter().all(|disjunction| {
                disjunction
                    .iter()
                    .any(|inequality| inequality.is_satisfied_by(assignment) == Some(true))
            })
    }

    /// Report the size of the model, as statistics when they are enabled and otherwise in the
    /// debug log.
    pub fn log_size(&self, encoding: &str) {
        if should_log_statistics() {
            log_statistic(format!("num{encoding}Booleans"), self.num_booleans);
            log_statistic(format!("num{encoding}Integers"), self.domains.len());
            log_statistic(format!("num{encoding}Clauses"), self.clauses.len());
            log_statistic(format!("num{encoding}Inequalities"), self.inequalities.len());
            log_statistic(format!("num{encoding}Disjunctions"), self.disjunctions.len());
        } else {
            debug!(
                "{encoding} model: {} booleans, {} integers, {} clauses, {} inequalities, {} disjunctions",
                self.num_booleans,
                self.domains.len(),
                self.clauses.len(),
                self.inequalities.len(),
                self.disjunctions.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_clause_is_trivially_infeasible() {
        let mut model = SymbolicModel::default();
        let a = model.new_boolean();
        model.add_clause([a.positive()]);
        assert!(!model.is_trivially_infeasible());

        model.add_clause([]);
        assert!(model.is_trivially_infeasible());
    }

    #[test]
    fn assignment_is_checked_against_every_constraint() {
        let mut model = SymbolicModel::default();
        let a = model.new_boolean();
        let x = model.new_integer(0, 5);
        let y = model.new_integer(0, 5);
        model.add_clause([!a.positive()]);
        model.add_inequality(LinearInequality::new([(1, x), (-1, y)], -2));
        model.add_disjunction([
            LinearInequality::new([(1, x)], 0),
            LinearInequality::new([(-1, y)], -5),
        ]);

        let mut assignment = Assignment::for_model(&model);
        assignment.set_boolean(a, false);
        assignment.set_integer(x, 0);
        assignment.set_integer(y, 2);
        assert!(model.is_satisfied_by(&assignment));

        assignment.set_integer(x, 1);
        assignment.set_integer(y, 4);
        assert!(!model.is_satisfied_by(&assignment));

        assignment.set_integer(y, 5);
        assert!(model.is_satisfied_by(&assignment));

        assignment.set_integer(y, 6);
        assert!(!model.is_satisfied_by(&assignment));
    }

    #[test]
    fn unassigned_boolean_fails_the_check() {
        let mut model = SymbolicModel::default();
        let _ = model.new_boolean();

        assert!(!model.is_satisfied_by(&Assignment::for_model(&model)));
    }
}
