#![cfg(test)]

mod helpers;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use helpers::instance;
use strip_packing::backend::Backend;
use strip_packing::backend::BackendVerdict;
use strip_packing::backend::ProbeLimits;
use strip_packing::backend::PumpkinBackend;
use strip_packing::encoders::ArithmeticEncoder;
use strip_packing::encoders::BigMEncoder;
use strip_packing::encoders::OrderEncoder;
use strip_packing::model::SymbolicModel;
use strip_packing::validate_packing;
use strip_packing::HeightBounds;
use strip_packing::Instance;
use strip_packing::ProbeVerdict;
use strip_packing::SearchDriver;
use strip_packing::SearchOptions;
use strip_packing::SearchOutcome;
use strip_packing::SearchState;

/// A backend which never reaches a verdict.
#[derive(Debug, Default)]
struct Undecided;

impl Backend for Undecided {
    fn name(&self) -> &'static str {
        "Undecided"
    }

    fn solve(&mut self, _: &SymbolicModel, _: &ProbeLimits) -> BackendVerdict {
        BackendVerdict::Unknown("no search was done".to_owned())
    }
}

/// A backend which uses up the whole time it is given without reaching a verdict.
#[derive(Debug, Default)]
struct Stalling;

impl Backend for Stalling {
    fn name(&self) -> &'static str {
        "Stalling"
    }

    fn solve(&mut self, _: &SymbolicModel, limits: &ProbeLimits) -> BackendVerdict {
        std::thread::sleep(limits.deadline.saturating_duration_since(Instant::now()));
        BackendVerdict::Timeout
    }
}

/// Solves with Pumpkin, but never claims that a solution is optimal.
#[derive(Debug, Default)]
struct Unproven;

impl Backend for Unproven {
    fn name(&self) -> &'static str {
        "Unproven"
    }

    fn solve(&mut self, model: &SymbolicModel, limits: &ProbeLimits) -> BackendVerdict {
        match PumpkinBackend.solve(model, limits) {
            BackendVerdict::Satisfiable { assignment, .. } => BackendVerdict::Satisfiable {
                assignment,
                optimal: false,
            },
            verdict => verdict,
        }
    }
}

fn small_instance() -> Instance {
    instance(3, &[(2, 2), (2, 1), (1, 2)], false)
}

#[test]
fn every_encoding_finds_the_minimal_height() {
    let instance = small_instance();

    let reports = [
        SearchDriver::new(OrderEncoder, PumpkinBackend, SearchOptions::default()).run(&instance),
        SearchDriver::new(ArithmeticEncoder, PumpkinBackend, SearchOptions::default())
            .run(&instance),
        SearchDriver::new(BigMEncoder, PumpkinBackend, SearchOptions::default()).run(&instance),
    ];

    for report in reports {
        let report = report.expect("valid instance");
        let SearchOutcome::Feasible(packing) = &report.outcome else {
            panic!("the instance is solved: {:?}", report.outcome);
        };
        assert_eq!(3, packing.height);
        assert_eq!(SearchState::Feasible(3), report.state);
        validate_packing(&instance, packing).expect("valid packing");
    }
}

#[test]
fn decision_search_starts_at_the_lower_bound() {
    let instance = instance(2, &[(1, 1); 4], false);

    let report = SearchDriver::new(OrderEncoder, PumpkinBackend, SearchOptions::default())
        .run(&instance)
        .expect("valid instance");

    assert_eq!(HeightBounds { lower: 2, upper: 4 }, report.bounds);
    assert_eq!(1, report.probes.len());
    assert_eq!(2, report.probes[0].height);
    assert_eq!(ProbeVerdict::Feasible, report.probes[0].verdict);
}

#[test]
fn inconclusive_probes_move_up_until_the_bounds_are_exhausted() {
    let instance = small_instance();
    let bounds = HeightBounds::estimate(&instance);

    let mut driver = SearchDriver::new(OrderEncoder, Undecided, SearchOptions::default());
    let report = driver.run(&instance).expect("valid instance");

    assert_eq!(SearchState::Exhausted, report.state);
    assert_eq!(SearchOutcome::TimedOut { best: None }, report.outcome);

    let heights = report
        .probes
        .iter()
        .map(|probe| probe.height)
        .collect::<Vec<_>>();
    assert_eq!(bounds.heights().collect::<Vec<_>>(), heights);
    assert!(report
        .probes
        .iter()
        .all(|probe| probe.verdict == ProbeVerdict::Unknown));
}

#[test]
fn used_up_budget_issues_no_probes() {
    let options = SearchOptions::default().with_time_budget(Duration::ZERO);

    let report = SearchDriver::new(OrderEncoder, PumpkinBackend, options)
        .run(&small_instance())
        .expect("valid instance");

    assert_eq!(SearchState::TimedOut, report.state);
    assert_eq!(SearchOutcome::TimedOut { best: None }, report.outcome);
    assert!(report.probes.is_empty());
}

#[test]
fn raised_interrupt_issues_no_probes() {
    let interrupt = Arc::new(AtomicBool::new(true));

    let report = SearchDriver::new(OrderEncoder, PumpkinBackend, SearchOptions::default())
        .with_interrupt(interrupt)
        .run(&small_instance())
        .expect("valid instance");

    assert_eq!(SearchState::TimedOut, report.state);
    assert!(report.probes.is_empty());
}

#[test]
fn unproven_optimum_is_reported_as_best_packing() {
    let instance = small_instance();

    let report = SearchDriver::new(ArithmeticEncoder, Unproven, SearchOptions::default())
        .run(&instance)
        .expect("valid instance");

    assert_eq!(SearchState::TimedOut, report.state);
    assert_eq!(1, report.probes.len());
    let SearchOutcome::TimedOut { best: Some(packing) } = &report.outcome else {
        panic!("a packing was found: {:?}", report.outcome);
    };
    validate_packing(&instance, packing).expect("valid packing");
    assert_eq!(Some(packing), report.packing());
}

#[test]
fn optimising_search_probes_once_at_the_upper_bound() {
    let instance = small_instance();
    let bounds = HeightBounds::estimate(&instance);

    let mut driver = SearchDriver::new(BigMEncoder, Undecided, SearchOptions::default());
    let report = driver.run(&instance).expect("valid instance");

    assert_eq!(SearchState::TimedOut, report.state);
    assert_eq!(1, report.probes.len());
    assert_eq!(bounds.upper, report.probes[0].height);
}

#[test]
fn empty_instance_has_height_zero() {
    let instance = instance(4, &[], false);

    let reports = [
        SearchDriver::new(OrderEncoder, PumpkinBackend, SearchOptions::default()).run(&instance),
        SearchDriver::new(ArithmeticEncoder, PumpkinBackend, SearchOptions::default())
            .run(&instance),
        SearchDriver::new(BigMEncoder, PumpkinBackend, SearchOptions::default()).run(&instance),
    ];

    for report in reports {
        let report = report.expect("valid instance");
        assert_eq!(HeightBounds { lower: 0, upper: 0 }, report.bounds);
        let SearchOutcome::Feasible(packing) = report.outcome else {
            panic!("the empty instance is solved: {:?}", report.outcome);
        };
        assert_eq!(0, packing.height);
        assert!(packing.placements.is_empty());
    }
}

#[test]
fn inconclusive_probes_stop_once_the_budget_is_used_up() {
    // Heights 10 up to 100 can be probed.
    let instance = instance(10, &[(1, 10); 10], false);
    let bounds = HeightBounds::estimate(&instance);
    assert_eq!(HeightBounds { lower: 10, upper: 100 }, bounds);

    let options = SearchOptions::default()
        .with_time_budget(Duration::from_millis(200))
        .with_probe_timeout(Duration::from_millis(50));
    let report = SearchDriver::new(OrderEncoder, Stalling, options)
        .run(&instance)
        .expect("valid instance");

    assert_eq!(SearchState::TimedOut, report.state);
    assert_eq!(SearchOutcome::TimedOut { best: None }, report.outcome);
    assert!(!report.probes.is_empty());
    assert!(report.probes.len() < bounds.heights().count());
    assert_eq!(bounds.lower, report.probes[0].height);
    assert!(report
        .probes
        .windows(2)
        .all(|pair| pair[1].height == pair[0].height + 1));
}

#[test]
fn optimising_encodings_solve_a_single_rectangle() {
    let instance = instance(4, &[(3, 2)], false);

    let reports = [
        SearchDriver::new(ArithmeticEncoder, PumpkinBackend, SearchOptions::default())
            .run(&instance),
        SearchDriver::new(BigMEncoder, PumpkinBackend, SearchOptions::default()).run(&instance),
    ];

    for report in reports {
        let report = report.expect("valid instance");
        assert_eq!(SearchState::Feasible(2), report.state);
        let SearchOutcome::Feasible(packing) = report.outcome else {
            panic!("the rectangle is placed: {:?}", report.outcome);
        };
        assert_eq!((0, 0), (packing.placements[0].x, packing.placements[0].y));
    }
}
