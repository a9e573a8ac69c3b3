//! # Distribution Samplers
//!
//! Transforms a uniform sequence into samples of a target distribution with
//! explicit closed-form transforms:
//!
//! | Distribution | Fields | Transform | Uniforms per sample |
//! |---|---|---|---|
//! | Uniform(a, b) | `a`, `b` | a + (b − a)·u | 1 |
//! | Exponential(λ) | `lambda` | −ln(u)/λ, u ≤ 0 skipped | 1 |
//! | Normal(μ, σ) | `mean`, `std_dev` | Box–Muller, cosine branch | 2 |
//! | Poisson(λ) | `lambda` | Knuth threshold e^−λ, one draw reused | 1 |
//! | Binomial(n, p) | `n`, `p` | see [`BinomialMethod`] | 1 or n |
//!
//! Parameters are validated when the [`DistributionSpec`] is built;
//! [`sample`] additionally rejects inputs that would produce nothing or
//! never terminate. Samples are not rounded here; rounding is a display
//! concern.
//!
//! ## Usage Example
//!
//! ```rust
//! use randlab_core::sampler::{sample, DistributionParams, DistributionSpec};
//!
//! let spec = DistributionSpec::new(DistributionParams::Exponential { lambda: 1.0 }).unwrap();
//! let samples = sample(&[0.5], &spec).unwrap();
//! assert!((samples[0] - 0.6931).abs() < 1e-4);
//! ```

mod transforms;

use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::{Result, RngError};
use crate::fields::Fields;

/// Target distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DistributionKind {
    /// Continuous uniform on [a, b).
    Uniform,
    /// Exponential with rate λ.
    Exponential,
    /// Normal with mean μ and standard deviation σ.
    Normal,
    /// Binomial with n trials and success probability p.
    Binomial,
    /// Poisson with mean λ.
    Poisson,
}

impl DistributionKind {
    /// All distributions, in menu order.
    pub const ALL: [DistributionKind; 5] = [
        DistributionKind::Uniform,
        DistributionKind::Exponential,
        DistributionKind::Normal,
        DistributionKind::Binomial,
        DistributionKind::Poisson,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            DistributionKind::Uniform => "uniform",
            DistributionKind::Exponential => "exponential",
            DistributionKind::Normal => "normal",
            DistributionKind::Binomial => "binomial",
            DistributionKind::Poisson => "poisson",
        }
    }

    /// Field names this distribution reads.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            DistributionKind::Uniform => &["a", "b"],
            DistributionKind::Exponential | DistributionKind::Poisson => &["lambda"],
            DistributionKind::Normal => &["mean", "std_dev"],
            DistributionKind::Binomial => &["n", "p"],
        }
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistributionKind {
    type Err = RngError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "uniform" => Ok(DistributionKind::Uniform),
            "exponential" | "exp" => Ok(DistributionKind::Exponential),
            "normal" | "gaussian" => Ok(DistributionKind::Normal),
            "binomial" => Ok(DistributionKind::Binomial),
            "poisson" => Ok(DistributionKind::Poisson),
            _ => Err(RngError::invalid(
                "distribution",
                format!(
                    "unknown distribution '{}'. Supported: {}",
                    s,
                    DistributionKind::ALL.map(DistributionKind::name).join(", ")
                ),
            )),
        }
    }
}

/// How binomial samples are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BinomialMethod {
    /// One uniform per sample, compared against `p` for every trial.
    ///
    /// Each sample is therefore `0` or `n`. This reproduces the historical
    /// output of the calculator and is not a true binomial sampler.
    #[default]
    SingleDraw,

    /// `n` independent uniforms per sample; the count of those `<= p`.
    BernoulliSum,
}

impl BinomialMethod {
    /// Canonical kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            BinomialMethod::SingleDraw => "single-draw",
            BinomialMethod::BernoulliSum => "bernoulli-sum",
        }
    }
}

impl fmt::Display for BinomialMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BinomialMethod {
    type Err = RngError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "single-draw" | "reference" => Ok(BinomialMethod::SingleDraw),
            "bernoulli-sum" | "bernoulli" => Ok(BinomialMethod::BernoulliSum),
            _ => Err(RngError::invalid(
                "binomial-method",
                format!("unknown method '{}'. Supported: single-draw, bernoulli-sum", s),
            )),
        }
    }
}

/// Typed distribution parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "distribution", rename_all = "lowercase"))]
pub enum DistributionParams {
    /// Uniform on [a, b), a < b.
    Uniform {
        /// Lower bound.
        a: f64,
        /// Upper bound.
        b: f64,
    },
    /// Exponential, λ > 0.
    Exponential {
        /// Rate.
        lambda: f64,
    },
    /// Normal, σ > 0.
    Normal {
        /// Mean μ.
        mean: f64,
        /// Standard deviation σ.
        std_dev: f64,
    },
    /// Binomial, n ≥ 1 and 0 ≤ p ≤ 1.
    Binomial {
        /// Number of trials.
        n: u64,
        /// Success probability.
        p: f64,
        /// Sampling method.
        method: BinomialMethod,
    },
    /// Poisson, λ > 0.
    Poisson {
        /// Mean.
        lambda: f64,
    },
}

impl DistributionParams {
    /// Reads the parameters of `kind` from free-text fields.
    ///
    /// `method` only applies to [`DistributionKind::Binomial`].
    pub fn from_fields(kind: DistributionKind, fields: &Fields, method: BinomialMethod) -> Result<Self> {
        let params = match kind {
            DistributionKind::Uniform => DistributionParams::Uniform {
                a: fields.require_f64("a")?,
                b: fields.require_f64("b")?,
            },
            DistributionKind::Exponential => DistributionParams::Exponential {
                lambda: fields.require_f64("lambda")?,
            },
            DistributionKind::Normal => DistributionParams::Normal {
                mean: fields.require_f64("mean")?,
                std_dev: fields.require_f64("std_dev")?,
            },
            DistributionKind::Binomial => DistributionParams::Binomial {
                n: fields.require_u64("n")?,
                p: fields.require_f64("p")?,
                method,
            },
            DistributionKind::Poisson => DistributionParams::Poisson {
                lambda: fields.require_f64("lambda")?,
            },
        };
        params.validate()?;
        Ok(params)
    }

    /// The distribution these parameters describe.
    pub fn kind(&self) -> DistributionKind {
        match self {
            DistributionParams::Uniform { .. } => DistributionKind::Uniform,
            DistributionParams::Exponential { .. } => DistributionKind::Exponential,
            DistributionParams::Normal { .. } => DistributionKind::Normal,
            DistributionParams::Binomial { .. } => DistributionKind::Binomial,
            DistributionParams::Poisson { .. } => DistributionKind::Poisson,
        }
    }

    /// Checks the parameter domain.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if:
    /// - any parameter is not finite
    /// - `a >= b` for Uniform
    /// - `lambda <= 0` for Exponential or Poisson
    /// - `std_dev <= 0` for Normal
    /// - `n == 0` or `p` outside [0, 1] for Binomial
    pub fn validate(&self) -> Result<()> {
        match *self {
            DistributionParams::Uniform { a, b } => {
                require_finite("a", a)?;
                require_finite("b", b)?;
                if a >= b {
                    return Err(RngError::invalid(
                        "b",
                        format!("upper bound {} must exceed lower bound {}", b, a),
                    ));
                }
            }
            DistributionParams::Exponential { lambda } | DistributionParams::Poisson { lambda } => {
                require_positive("lambda", lambda)?;
            }
            DistributionParams::Normal { mean, std_dev } => {
                require_finite("mean", mean)?;
                require_positive("std_dev", std_dev)?;
            }
            DistributionParams::Binomial { n, p, .. } => {
                if n == 0 {
                    return Err(RngError::invalid("n", "must be a positive integer"));
                }
                if !(0.0..=1.0).contains(&p) {
                    return Err(RngError::invalid("p", format!("{} is outside [0, 1]", p)));
                }
            }
        }
        Ok(())
    }

    /// Uniforms consumed per emitted sample, ignoring skips.
    pub fn uniforms_per_sample(&self) -> usize {
        match *self {
            DistributionParams::Normal { .. } => 2,
            DistributionParams::Binomial {
                n,
                method: BinomialMethod::BernoulliSum,
                ..
            } => usize::try_from(n).unwrap_or(usize::MAX),
            _ => 1,
        }
    }
}

fn require_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RngError::invalid(name, "must be finite"))
    }
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(RngError::invalid(name, format!("{} must be positive", value)))
    }
}

/// Immutable, validated distribution request.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DistributionSpec {
    params: DistributionParams,
}

impl DistributionSpec {
    /// Creates a spec after validating `params`.
    pub fn new(params: DistributionParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Creates a spec from free-text fields.
    pub fn from_fields(kind: DistributionKind, fields: &Fields, method: BinomialMethod) -> Result<Self> {
        Ok(Self {
            params: DistributionParams::from_fields(kind, fields, method)?,
        })
    }

    /// Returns the validated parameters.
    #[inline]
    pub fn params(&self) -> &DistributionParams {
        &self.params
    }

    /// Returns the distribution kind.
    #[inline]
    pub fn kind(&self) -> DistributionKind {
        self.params.kind()
    }

    /// Checks that `uniforms` can be sampled without degenerating.
    ///
    /// Empty input is always accepted.
    fn check_input(&self, uniforms: &[f64]) -> Result<()> {
        if uniforms.is_empty() {
            return Ok(());
        }
        let needed = self.params.uniforms_per_sample();
        if uniforms.len() < needed {
            return Err(RngError::degenerate(format!(
                "{} sampling needs at least {} uniforms, got {}",
                self.kind(),
                needed,
                uniforms.len()
            )));
        }
        if let DistributionParams::Poisson { .. } = self.params {
            if let Some((index, u)) = uniforms
                .iter()
                .enumerate()
                .find(|(_, u)| !(0.0..1.0).contains(*u))
            {
                return Err(RngError::degenerate(format!(
                    "Poisson sampling needs uniforms in [0, 1); value {} at index {} never crosses the threshold",
                    u, index
                )));
            }
        }
        Ok(())
    }
}

/// Lazy sample stream over a borrowed uniform sequence.
#[derive(Clone, Debug)]
pub struct Samples<'a> {
    uniforms: &'a [f64],
    pos: usize,
    params: DistributionParams,
}

impl<'a> Samples<'a> {
    /// Uniforms consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }

    #[inline]
    fn take(&mut self, n: usize) -> Option<&'a [f64]> {
        let end = self.pos.checked_add(n)?;
        let chunk = self.uniforms.get(self.pos..end)?;
        self.pos = end;
        Some(chunk)
    }
}

impl Iterator for Samples<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        loop {
            let value = match self.params {
                DistributionParams::Uniform { a, b } => {
                    Some(transforms::uniform(self.take(1)?[0], a, b))
                }
                DistributionParams::Exponential { lambda } => {
                    transforms::exponential(self.take(1)?[0], lambda)
                }
                DistributionParams::Normal { mean, std_dev } => {
                    let pair = self.take(2)?;
                    transforms::box_muller(pair[0], pair[1]).map(|z| mean + std_dev * z)
                }
                DistributionParams::Poisson { lambda } => {
                    Some(transforms::poisson_single_draw(self.take(1)?[0], lambda))
                }
                DistributionParams::Binomial {
                    n,
                    p,
                    method: BinomialMethod::SingleDraw,
                } => Some(transforms::binomial_single_draw(self.take(1)?[0], n, p)),
                DistributionParams::Binomial {
                    p,
                    method: BinomialMethod::BernoulliSum,
                    ..
                } => {
                    let trials = self.take(self.params.uniforms_per_sample())?;
                    Some(transforms::bernoulli_sum(trials, p))
                }
            };
            // None here means the draw was rejected; move on to the next one.
            if value.is_some() {
                return value;
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let upper = (self.uniforms.len() - self.pos) / self.params.uniforms_per_sample();
        (0, Some(upper))
    }
}

impl FusedIterator for Samples<'_> {}

/// Returns a lazy sample stream after checking the input.
///
/// # Errors
///
/// Returns `DegenerateInput` if a non-empty input is shorter than one
/// sample needs, or a Poisson input lies outside [0, 1).
pub fn sample_iter<'a>(uniforms: &'a [f64], spec: &DistributionSpec) -> Result<Samples<'a>> {
    spec.check_input(uniforms)?;
    Ok(Samples {
        uniforms,
        pos: 0,
        params: spec.params,
    })
}

/// Samples `spec` from `uniforms` into a new vector.
///
/// Empty input yields an empty vector. Output length is one per uniform
/// for Uniform, Poisson and single-draw Binomial, `len / 2` for Normal and
/// `len / n` for Bernoulli-sum Binomial, less any rejected draws.
pub fn sample(uniforms: &[f64], spec: &DistributionSpec) -> Result<Vec<f64>> {
    let samples: Vec<f64> = sample_iter(uniforms, spec)?.collect();

    let expected = uniforms.len() / spec.params.uniforms_per_sample();
    if samples.len() < expected {
        warn!(
            distribution = %spec.kind(),
            skipped = expected - samples.len(),
            "rejected uniforms outside the transform's domain"
        );
    }
    debug!(
        distribution = %spec.kind(),
        uniforms = uniforms.len(),
        samples = samples.len(),
        "sampled distribution"
    );
    Ok(samples)
}
