use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use log::info;
use log::warn;

use super::stopwatch::Stopwatch;
use super::SearchOptions;
use crate::backend::Backend;
use crate::backend::BackendVerdict;
use crate::backend::ProbeLimits;
use crate::encoders::Encoder;
use crate::encoders::SearchStyle;
use crate::statistics::log_statistic;
use crate::HeightBounds;
use crate::Instance;
use crate::Packing;
use crate::PackingResult;

/// The state of a search. A search starts in [`SearchState::Probing`] and ends in one of the
/// other states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    /// The next model is built for this height.
    Probing(u32),
    /// A packing of this height was found.
    Feasible(u32),
    /// Every height up to the upper bound was probed without finding a packing. Probes may have
    /// been inconclusive, so this is no proof of infeasibility; the outcome of such a search is
    /// [`SearchOutcome::TimedOut`] without a packing.
    Exhausted,
    /// The time budget ran out, or the search was interrupted.
    TimedOut,
}

/// The result of a single probe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    /// A packing was found. For optimising encodings, `optimal` tells whether its height is
    /// proven minimal.
    Feasible { packing: Packing, optimal: bool },
    Infeasible,
    Unknown(String),
    TimedOut,
}

impl SolveOutcome {
    fn verdict(&self) -> ProbeVerdict {
        match self {
            SolveOutcome::Feasible { .. } => ProbeVerdict::Feasible,
            SolveOutcome::Infeasible => ProbeVerdict::Infeasible,
            SolveOutcome::Unknown(_) => ProbeVerdict::Unknown,
            SolveOutcome::TimedOut => ProbeVerdict::TimedOut,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeVerdict {
    Feasible,
    Infeasible,
    Unknown,
    TimedOut,
}

/// A probe which was issued during a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeRecord {
    pub height: u32,
    pub verdict: ProbeVerdict,
    pub elapsed: Duration,
}

/// What a finished search reports to its caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A packing of minimal height.
    Feasible(Packing),
    /// No packing with a proof of optimality; `best` is the best packing found, if any.
    TimedOut { best: Option<Packing> },
}

#[derive(Clone, Debug)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    /// The terminal state of the search.
    pub state: SearchState,
    pub bounds: HeightBounds,
    /// The probes in the order in which they were issued.
    pub probes: Vec<ProbeRecord>,
    pub elapsed: Duration,
}

/// Searches for a packing of minimal height with one encoder and one backend.
///
/// For a decision-style encoder, heights are probed one at a time from the lower bound upwards
/// and the first feasible height is the optimum. An inconclusive probe also moves on to the next
/// height. An optimising encoder is probed once at the upper bound and minimises the height
/// itself.
#[derive(Debug)]
pub struct SearchDriver<E, B> {
    encoder: E,
    backend: B,
    options: SearchOptions,
    interrupt: Option<Arc<AtomicBool>>,
}

impl<E: Encoder, B: Backend> SearchDriver<E, B> {
    pub fn new(encoder: E, backend: B, options: SearchOptions) -> SearchDriver<E, B> {
        SearchDriver {
            encoder,
            backend,
            options,
            interrupt: None,
        }
    }

    /// Stop the search, including a running probe, once `interrupt` is raised.
    pub fn with_interrupt(mut self, interrupt: Arc<AtomicBool>) -> SearchDriver<E, B> {
        self.interrupt = Some(interrupt);
        self
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn run(&mut self, instance: &Instance) -> PackingResult<SearchReport> {
        let stopwatch = Stopwatch::starting_now();
        let style = self.encoder.style();
        let bounds =
            HeightBounds::estimate_with_rotation(instance, self.options.encoder.rotation_enabled);
        info!(
            "Searching with the {} encoding between heights {} and {}",
            self.encoder.name(),
            bounds.lower,
            bounds.upper
        );

        let mut state = match style {
            SearchStyle::Decision => SearchState::Probing(bounds.lower),
            SearchStyle::Optimising => SearchState::Probing(bounds.upper),
        };
        let mut probes = Vec::new();
        let mut best = None;

        while let SearchState::Probing(height) = state {
            let remaining = stopwatch.remaining(self.options.time_budget);
            let mut limits = ProbeLimits::with_timeout(remaining.min(self.options.probe_timeout));
            if let Some(interrupt) = &self.interrupt {
                limits = limits.with_interrupt(Arc::clone(interrupt));
            }
            if remaining.is_zero() || limits.is_interrupted() {
                state = SearchState::TimedOut;
                break;
            }

            let probe_stopwatch = Stopwatch::starting_now();
            let outcome = self.probe(instance, height, &limits)?;
            probes.push(ProbeRecord {
                height,
                verdict: outcome.verdict(),
                elapsed: probe_stopwatch.elapsed(),
            });

            state = match outcome {
                SolveOutcome::Feasible { packing, optimal } => {
                    let found = packing.height;
                    best = Some(packing);
                    if optimal {
                        SearchState::Feasible(found)
                    } else {
                        SearchState::TimedOut
                    }
                }
                SolveOutcome::Infeasible | SolveOutcome::Unknown(_) | SolveOutcome::TimedOut
                    if style == SearchStyle::Decision =>
                {
                    if height < bounds.upper {
                        SearchState::Probing(height + 1)
                    } else {
                        SearchState::Exhausted
                    }
                }
                SolveOutcome::Infeasible => SearchState::Exhausted,
                SolveOutcome::Unknown(_) | SolveOutcome::TimedOut => SearchState::TimedOut,
            };
        }

        let outcome = match (state, best) {
            (SearchState::Feasible(_), Some(packing)) => SearchOutcome::Feasible(packing),
            // Running out of heights is not a proof of infeasibility, as probes may have been
            // inconclusive.
            (SearchState::Exhausted, _) => SearchOutcome::TimedOut { best: None },
            (_, best) => SearchOutcome::TimedOut { best },
        };

        let report = SearchReport {
            outcome,
            state,
            bounds,
            probes,
            elapsed: stopwatch.elapsed(),
        };
        report.log_statistics();

        Ok(report)
    }

    fn probe(
        &mut self,
        instance: &Instance,
        height: u32,
        limits: &ProbeLimits,
    ) -> PackingResult<SolveOutcome> {
        debug!("Probing height {height}");
        let encoding = self
            .encoder
            .build_model(instance, height, &self.options.encoder)?;

        let outcome = match self.backend.solve(&encoding.model, limits) {
            BackendVerdict::Satisfiable {
                assignment,
                optimal,
            } => {
                let packing = self.encoder.decode(&encoding, &assignment, instance)?;
                info!("Found a packing of height {}", packing.height);
                SolveOutcome::Feasible { packing, optimal }
            }
            BackendVerdict::Unsatisfiable => {
                debug!("Height {height} is infeasible");
                SolveOutcome::Infeasible
            }
            BackendVerdict::Unknown(reason) => {
                warn!(
                    "{} gave no verdict for height {height}: {reason}",
                    self.backend.name()
                );
                SolveOutcome::Unknown(reason)
            }
            BackendVerdict::Timeout => {
                debug!("Probe of height {height} timed out");
                SolveOutcome::TimedOut
            }
        };

        Ok(outcome)
    }
}

impl SearchReport {
    /// The packing of the outcome, if any.
    pub fn packing(&self) -> Option<&Packing> {
        match &self.outcome {
            SearchOutcome::Feasible(packing) => Some(packing),
            SearchOutcome::TimedOut { best } => best.as_ref(),
        }
    }

    fn log_statistics(&self) {
        log_statistic("numProbes", self.probes.len());
        log_statistic("lowerBound", self.bounds.lower);
        log_statistic("upperBound", self.bounds.upper);
        if let Some(packing) = self.packing() {
            log_statistic("height", packing.height);
        }
        log_statistic("elapsedMs", self.elapsed.as_millis());
    }
}
