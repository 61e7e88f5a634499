//! The seam between the encodings and the engine which searches for an assignment.

mod pumpkin;

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

pub use pumpkin::PumpkinBackend;

use crate::model::Assignment;
use crate::model::SymbolicModel;

/// When a single backend invocation has to give up.
#[derive(Clone, Debug)]
pub struct ProbeLimits {
    pub deadline: Instant,
    /// Raised from outside (e.g. on a termination signal) to stop the probe early.
    pub interrupt: Option<Arc<AtomicBool>>,
}

impl ProbeLimits {
    pub fn with_timeout(timeout: Duration) -> ProbeLimits {
        ProbeLimits {
            deadline: Instant::now() + timeout,
            interrupt: None,
        }
    }

    pub fn with_interrupt(mut self, interrupt: Arc<AtomicBool>) -> ProbeLimits {
        self.interrupt = Some(interrupt);
        self
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupt
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Whether the deadline has passed or the probe was interrupted.
    pub fn is_exhausted(&self) -> bool {
        Instant::now() >= self.deadline || self.is_interrupted()
    }
}

/// The answer of a backend to a single model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendVerdict {
    /// An assignment satisfying the model. For a model with an objective, `optimal` tells
    /// whether no better assignment exists; for a model without one it is always true.
    Satisfiable {
        assignment: Assignment,
        optimal: bool,
    },
    Unsatisfiable,
    /// The backend stopped without a verdict for a reason other than its time limit.
    Unknown(String),
    /// The probe limits were reached before a verdict.
    Timeout,
}

pub trait Backend {
    fn name(&self) -> &'static str;

    /// Search for an assignment of the model within the given limits. A model with an objective
    /// is minimised.
    fn solve(&mut self, model: &SymbolicModel, limits: &ProbeLimits) -> BackendVerdict;
}
