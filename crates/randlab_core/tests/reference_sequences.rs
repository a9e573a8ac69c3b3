//! Integration tests for the documented reference behaviour.
//!
//! Exercises the public API end to end through the same free-text fields a
//! front end collects.

use approx::assert_abs_diff_eq;
use randlab_core::engine::{run, SequenceRequest, MAX_COUNT};
use randlab_core::generator::{generate, Algorithm, GeneratorParams, GeneratorSpec};
use randlab_core::sampler::{sample, BinomialMethod, DistributionKind, DistributionParams, DistributionSpec};
use randlab_core::{Fields, RngError};

fn fields(pairs: &[(&str, &str)]) -> Fields {
    pairs.iter().copied().collect()
}

/// Fields that drive each algorithm with the calculator's example values.
fn example_fields(algorithm: Algorithm) -> Fields {
    match algorithm {
        Algorithm::MiddleSquare => fields(&[("x0", "1234")]),
        Algorithm::MiddleProduct => fields(&[("x0", "1234"), ("x1", "5678")]),
        Algorithm::LinearCongruential => {
            fields(&[("x0", "7"), ("a", "5"), ("c", "3"), ("m", "10007")])
        }
        Algorithm::MultiplicativeCongruential => fields(&[("x0", "7"), ("a", "5"), ("m", "10007")]),
        Algorithm::MersenneTwister => fields(&[("seed", "12345")]),
        Algorithm::Xorshift => fields(&[("seed", "13579")]),
        Algorithm::Tausworthe => fields(&[("seed", "24680")]),
    }
}

#[test]
fn test_every_algorithm_yields_exact_count_in_range() {
    for algorithm in Algorithm::ALL {
        let spec = GeneratorSpec::from_fields(algorithm, &example_fields(algorithm), 250).unwrap();
        let uniforms = generate(&spec);
        assert_eq!(uniforms.len(), 250, "{}", algorithm);
        assert!(
            uniforms.iter().all(|u| (0.0..1.0).contains(u)),
            "{} left [0, 1)",
            algorithm
        );
    }
}

#[test]
fn test_seeded_algorithms_are_deterministic() {
    for algorithm in Algorithm::ALL {
        let spec = GeneratorSpec::from_fields(algorithm, &example_fields(algorithm), 100).unwrap();
        assert_eq!(generate(&spec), generate(&spec), "{}", algorithm);
    }
}

#[test]
fn test_linear_congruential_reference() {
    let spec = GeneratorSpec::from_fields(
        Algorithm::LinearCongruential,
        &example_fields(Algorithm::LinearCongruential),
        3,
    )
    .unwrap();
    let uniforms = generate(&spec);
    let expected = [0.003_797_4, 0.019_286_5, 0.096_732_3];
    for (u, e) in uniforms.iter().zip(expected) {
        assert_abs_diff_eq!(*u, e, epsilon = 1e-7);
    }
}

#[test]
fn test_multiplicative_congruential_reference() {
    let spec = GeneratorSpec::from_fields(
        Algorithm::MultiplicativeCongruential,
        &example_fields(Algorithm::MultiplicativeCongruential),
        2,
    )
    .unwrap();
    assert_eq!(generate(&spec), vec![35.0 / 10_007.0, 175.0 / 10_007.0]);
}

#[test]
fn test_middle_square_single_step() {
    let spec = GeneratorSpec::new(GeneratorParams::MiddleSquare { x0: 1234 }, 1).unwrap();
    assert_eq!(generate(&spec), vec![0.5227]);
}

#[test]
fn test_uniform_identity_and_exponential_reference() {
    let identity = DistributionSpec::new(DistributionParams::Uniform { a: 0.0, b: 1.0 }).unwrap();
    assert_eq!(
        sample(&[0.0, 0.25, 0.5], &identity).unwrap(),
        vec![0.0, 0.25, 0.5]
    );

    let exponential = DistributionSpec::new(DistributionParams::Exponential { lambda: 1.0 }).unwrap();
    assert_abs_diff_eq!(sample(&[0.5], &exponential).unwrap()[0], 0.6931, epsilon = 1e-4);
}

#[test]
fn test_normal_consumes_pairs() {
    let normal = DistributionSpec::from_fields(
        DistributionKind::Normal,
        &fields(&[("mean", "0"), ("std_dev", "1")]),
        BinomialMethod::default(),
    )
    .unwrap();
    let samples = sample(&[0.11, 0.22, 0.33, 0.44, 0.55], &normal).unwrap();
    assert_eq!(samples.len(), 2);
}

#[test]
fn test_domain_errors_precede_sampling() {
    let poisson = DistributionSpec::from_fields(
        DistributionKind::Poisson,
        &fields(&[("lambda", "0")]),
        BinomialMethod::default(),
    );
    assert!(matches!(poisson, Err(RngError::InvalidParameter { .. })));

    let binomial = DistributionSpec::from_fields(
        DistributionKind::Binomial,
        &fields(&[("n", "10"), ("p", "1.5")]),
        BinomialMethod::default(),
    );
    assert!(matches!(binomial, Err(RngError::InvalidParameter { .. })));
}

#[test]
fn test_run_every_pairing() {
    let distribution_fields = |kind: DistributionKind| match kind {
        DistributionKind::Uniform => fields(&[("a", "0"), ("b", "1")]),
        DistributionKind::Exponential => fields(&[("lambda", "1.5")]),
        DistributionKind::Normal => fields(&[("mean", "0"), ("std_dev", "1")]),
        DistributionKind::Binomial => fields(&[("n", "10"), ("p", "0.5")]),
        DistributionKind::Poisson => fields(&[("lambda", "2")]),
    };

    for algorithm in Algorithm::ALL {
        for kind in DistributionKind::ALL {
            let request = SequenceRequest::new(algorithm, example_fields(algorithm), 100)
                .with_distribution(kind, distribution_fields(kind));
            let report = run(&request).unwrap_or_else(|e| panic!("{} + {}: {}", algorithm, kind, e));
            assert_eq!(report.uniforms.len(), 100);
            assert!(report.values.len() <= 100);
            assert!(report.values.iter().all(|v| v.is_finite()));
        }
    }
}

#[test]
fn test_run_rejects_missing_field_and_oversized_count() {
    let request = SequenceRequest::new(Algorithm::MiddleProduct, fields(&[("x0", "1234")]), 10);
    assert_eq!(run(&request).unwrap_err(), RngError::missing("x1"));

    let request = SequenceRequest::new(
        Algorithm::MiddleSquare,
        example_fields(Algorithm::MiddleSquare),
        MAX_COUNT + 1,
    );
    assert!(matches!(run(&request), Err(RngError::InvalidParameter { .. })));
}
