use log::debug;
use pumpkin_solver::constraints;
use pumpkin_solver::results::OptimisationResult;
use pumpkin_solver::results::ProblemSolution;
use pumpkin_solver::results::SatisfactionResult;
use pumpkin_solver::results::Solution;
use pumpkin_solver::termination::TerminationCondition;
use pumpkin_solver::variables::AffineView;
use pumpkin_solver::variables::DomainId;
use pumpkin_solver::variables::Literal;
use pumpkin_solver::variables::TransformableVariable;
use pumpkin_solver::Solver;

use super::Backend;
use super::BackendVerdict;
use super::ProbeLimits;
use crate::containers::StorageKey;
use crate::model::Assignment;
use crate::model::LinearInequality;
use crate::model::Lit;
use crate::model::SymbolicModel;

/// A [`Backend`] on top of the Pumpkin lazy clause generation solver.
///
/// Booleans become literals and integers become bounded domains. Every disjunction is posted as
/// half-reified inequalities together with a clause over the reification literals. An objective
/// is minimised with the linear search of [`Solver::minimise`], which keeps tightening the
/// objective until infeasibility is proven or the limits are hit.
#[derive(Clone, Copy, Debug, Default)]
pub struct PumpkinBackend;

impl Backend for PumpkinBackend {
    fn name(&self) -> &'static str {
        "Pumpkin"
    }

    fn solve(&mut self, model: &SymbolicModel, limits: &ProbeLimits) -> BackendVerdict {
        if model.is_trivially_infeasible() {
            return BackendVerdict::Unsatisfiable;
        }

        let mut translation = match Translation::new(model) {
            Ok(translation) => translation,
            Err(TranslationError::Infeasible) => return BackendVerdict::Unsatisfiable,
            Err(TranslationError::Overflow(reason)) => return BackendVerdict::Unknown(reason),
        };

        let mut brancher = translation
            .solver
            .default_brancher_over_all_propositional_variables();
        let mut termination = ProbeTermination { limits };

        let Some(objective) = model.objective() else {
            return match translation.solver.satisfy(&mut brancher, &mut termination) {
                SatisfactionResult::Satisfiable(solution) => BackendVerdict::Satisfiable {
                    assignment: translation.extract(model, &solution),
                    optimal: true,
                },
                SatisfactionResult::Unsatisfiable => BackendVerdict::Unsatisfiable,
                SatisfactionResult::Unknown => stopped_without_solution(limits),
            };
        };

        let objective = translation.domains[objective.index()];
        match translation
            .solver
            .minimise(&mut brancher, &mut termination, objective)
        {
            OptimisationResult::Optimal(solution) => {
                debug!(
                    "Proved the objective {} optimal",
                    solution.get_integer_value(objective)
                );
                BackendVerdict::Satisfiable {
                    assignment: translation.extract(model, &solution),
                    optimal: true,
                }
            }
            OptimisationResult::Satisfiable(solution) => {
                debug!(
                    "Stopped with the objective at {}",
                    solution.get_integer_value(objective)
                );
                BackendVerdict::Satisfiable {
                    assignment: translation.extract(model, &solution),
                    optimal: false,
                }
            }
            OptimisationResult::Unsatisfiable => BackendVerdict::Unsatisfiable,
            OptimisationResult::Unknown => stopped_without_solution(limits),
        }
    }
}

/// The verdict when the solver stopped without finding a solution.
fn stopped_without_solution(limits: &ProbeLimits) -> BackendVerdict {
    if limits.is_exhausted() {
        BackendVerdict::Timeout
    } else {
        BackendVerdict::Unknown("the solver stopped without a verdict".to_owned())
    }
}

/// Stops the solver once the probe limits are exhausted.
#[derive(Debug)]
struct ProbeTermination<'a> {
    limits: &'a ProbeLimits,
}

impl TerminationCondition for ProbeTermination<'_> {
    fn should_stop(&mut self) -> bool {
        self.limits.is_exhausted()
    }
}

enum TranslationError {
    /// Posting a constraint led to a conflict at the root.
    Infeasible,
    /// A value does not fit the 32-bit integers of the solver.
    Overflow(String),
}

/// A solver holding the constraints of a model, together with the mapping of the variables.
struct Translation {
    solver: Solver,
    literals: Vec<Literal>,
    domains: Vec<DomainId>,
}

impl Translation {
    fn new(model: &SymbolicModel) -> Result<Translation, TranslationError> {
        let mut solver = Solver::default();

        let literals = model
            .booleans()
            .map(|_| solver.new_literal())
            .collect::<Vec<_>>();
        let domains = model
            .integers()
            .map(|(_, domain)| {
                Ok(solver.new_bounded_integer(to_i32(domain.lower)?, to_i32(domain.upper)?))
            })
            .collect::<Result<Vec<_>, TranslationError>>()?;

        let mut translation = Translation {
            solver,
            literals,
            domains,
        };

        for clause in model.clauses() {
            let literals = clause
                .iter()
                .map(|&literal| translation.literal(literal))
                .collect::<Vec<_>>();
            translation
                .solver
                .add_clause(literals)
                .map_err(|_| TranslationError::Infeasible)?;
        }

        for inequality in model.inequalities() {
            match translation.linear(inequality)? {
                Linear::Constant(true) => {}
                Linear::Constant(false) => return Err(TranslationError::Infeasible),
                Linear::Terms(terms, rhs) => translation
                    .solver
                    .add_constraint(constraints::less_than_or_equals(terms, rhs))
                    .post()
                    .map_err(|_| TranslationError::Infeasible)?,
            }
        }

        for disjunction in model.disjunctions() {
            translation.post_disjunction(disjunction)?;
        }

        Ok(translation)
    }

    fn literal(&self, literal: Lit) -> Literal {
        let translated = self.literals[literal.var().index()];
        if literal.is_positive() {
            translated
        } else {
            !translated
        }
    }

    fn linear(&self, inequality: &LinearInequality) -> Result<Linear, TranslationError> {
        if inequality.terms().is_empty() {
            return Ok(Linear::Constant(0 <= inequality.rhs()));
        }

        let terms = inequality
            .terms()
            .iter()
            .map(|&(coefficient, var)| {
                Ok(self.domains[var.index()].scaled(to_i32(coefficient)?))
            })
            .collect::<Result<Vec<_>, TranslationError>>()?;

        Ok(Linear::Terms(terms, to_i32(inequality.rhs())?))
    }

    /// Every disjunct is implied by a fresh literal, and one of those literals has to hold.
    fn post_disjunction(
        &mut self,
        disjunction: &[LinearInequality],
    ) -> Result<(), TranslationError> {
        let mut reification_literals = Vec::with_capacity(disjunction.len());

        for disjunct in disjunction {
            match self.linear(disjunct)? {
                Linear::Constant(true) => return Ok(()),
                Linear::Constant(false) => {}
                Linear::Terms(terms, rhs) => {
                    let literal = self.solver.new_literal();
                    self.solver
                        .add_constraint(constraints::less_than_or_equals(terms, rhs))
                        .implied_by(literal)
                        .map_err(|_| TranslationError::Infeasible)?;
                    reification_literals.push(literal);
                }
            }
        }

        self.solver
            .add_clause(reification_literals)
            .map_err(|_| TranslationError::Infeasible)
    }

    fn extract(&self, model: &SymbolicModel, solution: &Solution) -> Assignment {
        let mut assignment = Assignment::for_model(model);

        for (var, &literal) in model.booleans().zip(&self.literals) {
            assignment.set_boolean(var, solution.get_literal_value(literal));
        }
        for ((var, _), &domain) in model.integers().zip(&self.domains) {
            assignment.set_integer(var, i64::from(solution.get_integer_value(domain)));
        }

        assignment
    }
}

enum Linear {
    Constant(bool),
    Terms(Vec<AffineView<DomainId>>, i32),
}

fn to_i32(value: i64) -> Result<i32, TranslationError> {
    i32::try_from(value).map_err(|_| {
        TranslationError::Overflow(format!("{value} does not fit in a 32-bit solver integer"))
    })
}
