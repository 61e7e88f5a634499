//! Shared setup for the integration tests.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use std::time::Duration;

use strip_packing::backend::Backend;
use strip_packing::backend::BackendVerdict;
use strip_packing::backend::ProbeLimits;
use strip_packing::backend::PumpkinBackend;
use strip_packing::encoders::Encoder;
use strip_packing::validate_packing;
use strip_packing::EncoderOptions;
use strip_packing::Instance;
use strip_packing::Packing;
use strip_packing::Rectangle;

pub(crate) const PROBE_TIMEOUT: Duration = Duration::from_secs(60);

pub(crate) fn instance(width: u32, rectangles: &[(u32, u32)], rotation: bool) -> Instance {
    let rectangles = rectangles
        .iter()
        .map(|&(width, height)| Rectangle::new(width, height))
        .collect::<Vec<_>>();
    Instance::new(width, rectangles, rotation).expect("valid instance")
}

/// Build the model for `height` and solve it with Pumpkin. Returns `None` if the model is
/// unsatisfiable; a found packing is validated against the instance.
pub(crate) fn solve_at<E: Encoder>(
    encoder: &E,
    instance: &Instance,
    height: u32,
    options: &EncoderOptions,
) -> Option<Packing> {
    let encoding = encoder
        .build_model(instance, height, options)
        .expect("valid instance");

    match PumpkinBackend.solve(&encoding.model, &ProbeLimits::with_timeout(PROBE_TIMEOUT)) {
        BackendVerdict::Satisfiable { assignment, .. } => {
            assert!(encoding.model.is_satisfied_by(&assignment));
            let packing = encoder
                .decode(&encoding, &assignment, instance)
                .expect("the assignment satisfies the model");
            validate_packing(instance, &packing).expect("decoded packings are valid");
            Some(packing)
        }
        BackendVerdict::Unsatisfiable => None,
        verdict => panic!("no verdict for height {height}: {verdict:?}"),
    }
}

pub(crate) fn without_symmetry_breaking() -> EncoderOptions {
    EncoderOptions {
        symmetry_breaking: false,
        ..EncoderOptions::default()
    }
}
