//! Generation-and-sampling runs.
//!
//! [`run`] is the single entry point a front end needs: it validates every
//! field of a [`SequenceRequest`], generates the uniforms, applies the
//! distribution and returns a [`SequenceReport`]. Nothing is generated
//! unless every field parses.

use tracing::{debug, info, warn};

use crate::error::{Result, RngError};
use crate::fields::Fields;
use crate::generator::{Algorithm, GeneratorSpec};
use crate::sampler::{self, BinomialMethod, DistributionKind, DistributionSpec};

/// Maximum sequence length accepted by [`run`].
pub const MAX_COUNT: usize = 10_000;

/// One run as entered by a user.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceRequest {
    /// Generator algorithm.
    pub algorithm: Algorithm,
    /// Generator fields (`x0`, `a`, `seed`, ...).
    pub generator_fields: Fields,
    /// Target distribution; `None` returns the raw uniforms.
    pub distribution: Option<DistributionKind>,
    /// Distribution fields (`a`, `lambda`, ...).
    pub distribution_fields: Fields,
    /// Binomial sampling method.
    pub binomial_method: BinomialMethod,
    /// Number of uniforms to generate.
    pub count: usize,
}

impl SequenceRequest {
    /// Creates a request for raw uniforms.
    pub fn new(algorithm: Algorithm, generator_fields: Fields, count: usize) -> Self {
        Self {
            algorithm,
            generator_fields,
            distribution: None,
            distribution_fields: Fields::new(),
            binomial_method: BinomialMethod::default(),
            count,
        }
    }

    /// Adds a target distribution.
    pub fn with_distribution(mut self, kind: DistributionKind, fields: Fields) -> Self {
        self.distribution = Some(kind);
        self.distribution_fields = fields;
        self
    }

    /// Selects the binomial sampling method.
    pub fn with_binomial_method(mut self, method: BinomialMethod) -> Self {
        self.binomial_method = method;
        self
    }

    /// Parses the request into validated specs without generating anything.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `count` is outside [1, [`MAX_COUNT`]],
    /// or the first field error of the generator or distribution.
    pub fn resolve(&self) -> Result<(GeneratorSpec, Option<DistributionSpec>)> {
        if self.count == 0 || self.count > MAX_COUNT {
            return Err(RngError::invalid(
                "count",
                format!("{} is outside [1, {}]", self.count, MAX_COUNT),
            ));
        }

        let generator =
            GeneratorSpec::from_fields(self.algorithm, &self.generator_fields, self.count)?;
        warn_unknown(&self.generator_fields, self.algorithm.fields(), "generator");

        let distribution = self
            .distribution
            .map(|kind| {
                warn_unknown(&self.distribution_fields, kind.fields(), "distribution");
                DistributionSpec::from_fields(kind, &self.distribution_fields, self.binomial_method)
            })
            .transpose()?;

        Ok((generator, distribution))
    }
}

fn warn_unknown(fields: &Fields, expected: &[&str], side: &str) {
    let unknown = fields.unknown(expected);
    if !unknown.is_empty() {
        warn!(side, ignored = ?unknown, "ignoring unknown fields");
    }
}

/// Result of one run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SequenceReport {
    /// Generator algorithm.
    pub algorithm: Algorithm,
    /// Distribution applied, if any.
    pub distribution: Option<DistributionKind>,
    /// Seed of the library generator, when it was used.
    pub seed: Option<u64>,
    /// Raw uniforms, in generation order.
    pub uniforms: Vec<f64>,
    /// Final sequence.
    pub values: Vec<f64>,
}

impl SequenceReport {
    /// Values rounded to `decimals` places for display.
    pub fn rounded(&self, decimals: u32) -> Vec<f64> {
        self.values.iter().map(|&v| round_to(v, decimals)).collect()
    }

    /// `(index, value)` pairs, the index-vs-value series for plotting.
    pub fn series(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values.iter().copied().enumerate()
    }
}

/// Rounds half away from zero to `decimals` places.
///
/// Values whose scaled magnitude would overflow are returned unchanged.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(15) as i32);
    let scaled = value * factor;
    if scaled.is_finite() {
        scaled.round() / factor
    } else {
        value
    }
}

/// Validates, generates and samples one request.
///
/// # Examples
///
/// ```rust
/// use randlab_core::engine::{run, SequenceRequest};
/// use randlab_core::generator::Algorithm;
/// use randlab_core::sampler::DistributionKind;
/// use randlab_core::Fields;
///
/// let request = SequenceRequest::new(
///     Algorithm::MiddleSquare,
///     Fields::new().with("x0", "1234"),
///     1,
/// )
/// .with_distribution(DistributionKind::Uniform, Fields::new().with("a", "0").with("b", "10"));
///
/// let report = run(&request).unwrap();
/// assert_eq!(report.uniforms, vec![0.5227]);
/// assert_eq!(report.values, vec![5.227]);
/// ```
pub fn run(request: &SequenceRequest) -> Result<SequenceReport> {
    let (generator, distribution) = request.resolve()?;

    let stream = generator.stream();
    let seed = stream.seed();
    let uniforms: Vec<f64> = stream.collect();
    if let Some(seed) = seed {
        debug!(seed, "library generator seed");
    }

    let values = match &distribution {
        Some(spec) => sampler::sample(&uniforms, spec)?,
        None => uniforms.clone(),
    };

    info!(
        algorithm = %generator.algorithm(),
        distribution = distribution.map(|d| d.kind().name()).unwrap_or("none"),
        count = generator.count(),
        values = values.len(),
        "sequence run complete"
    );

    Ok(SequenceReport {
        algorithm: generator.algorithm(),
        distribution: distribution.map(|d| d.kind()),
        seed,
        uniforms,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn lcg_fields() -> Fields {
        Fields::new()
            .with("x0", "7")
            .with("a", "5")
            .with("c", "3")
            .with("m", "10007")
    }

    #[test]
    fn test_raw_uniforms_pass_through() {
        let report = run(&SequenceRequest::new(
            Algorithm::LinearCongruential,
            lcg_fields(),
            3,
        ))
        .unwrap();
        assert_eq!(report.values, report.uniforms);
        assert_eq!(report.values.len(), 3);
        assert_eq!(report.distribution, None);
        assert_eq!(report.seed, None);
    }

    #[test]
    fn test_count_bounds() {
        for count in [0, MAX_COUNT + 1] {
            let request = SequenceRequest::new(Algorithm::LinearCongruential, lcg_fields(), count);
            assert_eq!(run(&request).unwrap_err().parameter(), Some("count"));
        }
        let request = SequenceRequest::new(Algorithm::LinearCongruential, lcg_fields(), MAX_COUNT);
        assert_eq!(run(&request).unwrap().values.len(), MAX_COUNT);
    }

    #[test]
    fn test_distribution_error_aborts_before_generation() {
        let request = SequenceRequest::new(Algorithm::LinearCongruential, lcg_fields(), 5)
            .with_distribution(DistributionKind::Poisson, Fields::new().with("lambda", "0"));
        assert!(matches!(
            request.resolve(),
            Err(RngError::InvalidParameter { .. })
        ));
        assert!(run(&request).is_err());
    }

    #[test]
    fn test_exponential_run() {
        let request = SequenceRequest::new(Algorithm::LinearCongruential, lcg_fields(), 3)
            .with_distribution(
                DistributionKind::Exponential,
                Fields::new().with("lambda", "1"),
            );
        let report = run(&request).unwrap();
        assert_eq!(report.values.len(), 3);
        assert_relative_eq!(report.values[0], -(38.0f64 / 10_007.0).ln());
    }

    #[test]
    fn test_mersenne_run_reports_seed() {
        let request = SequenceRequest::new(Algorithm::MersenneTwister, Fields::new(), 5);
        let report = run(&request).unwrap();
        let seed = report.seed.expect("seed reported");

        let replay = SequenceRequest::new(
            Algorithm::MersenneTwister,
            Fields::new().with("seed", seed.to_string()),
            5,
        );
        assert_eq!(run(&replay).unwrap().values, report.values);
    }

    #[test]
    fn test_binomial_method_is_forwarded() {
        let base = SequenceRequest::new(Algorithm::Tausworthe, Fields::new().with("seed", "24680"), 40)
            .with_distribution(
                DistributionKind::Binomial,
                Fields::new().with("n", "4").with("p", "0.5"),
            );
        assert_eq!(run(&base).unwrap().values.len(), 40);

        let textbook = base.with_binomial_method(BinomialMethod::BernoulliSum);
        assert_eq!(run(&textbook).unwrap().values.len(), 10);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.692_147, 4), 0.6921);
        assert_eq!(round_to(-1.234_56, 2), -1.23);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(f64::MAX, 4), f64::MAX);
    }

    #[test]
    fn test_report_helpers() {
        let report = SequenceReport {
            algorithm: Algorithm::MiddleSquare,
            distribution: None,
            seed: None,
            uniforms: vec![0.123_456, 0.5],
            values: vec![0.123_456, 0.5],
        };
        assert_eq!(report.rounded(4), vec![0.1235, 0.5]);
        assert_eq!(report.series().collect::<Vec<_>>(), vec![(0, 0.123_456), (1, 0.5)]);
    }
}
