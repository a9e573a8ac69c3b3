//! # Uniform Sequence Generators
//!
//! This module turns a [`GeneratorSpec`] into a sequence of pseudo-random
//! values in [0, 1). Seven classical algorithms are supported:
//!
//! | Algorithm | Fields | Output |
//! |---|---|---|
//! | Middle-square | `x0` | middle four digits of x² / 10⁴ |
//! | Middle-product | `x0`, `x1` | middle four digits of x₀·x₁ / 10⁴ |
//! | Linear congruential | `x0`, `a`, `c`, `m` | x / m |
//! | Multiplicative congruential | `x0`, `a`, `m` | x / m |
//! | Mersenne Twister (library) | `seed` (optional) | `StdRng` uniform |
//! | Xorshift32 | `seed` | (x mod 10⁴) / 10⁴ |
//! | Tausworthe | `seed` | (s mod 10⁴) / 10⁴ |
//!
//! Every recurrence is a pure step function `state -> (value, state)`; the
//! [`UniformStream`] iterator owns the state for one run and drops it
//! afterwards, so runs never share state.
//!
//! ## Usage Example
//!
//! ```rust
//! use randlab_core::generator::{generate, GeneratorParams, GeneratorSpec};
//!
//! let spec = GeneratorSpec::new(
//!     GeneratorParams::LinearCongruential { x0: 7, a: 5, c: 3, m: 10_007 },
//!     3,
//! )
//! .unwrap();
//!
//! let uniforms = generate(&spec);
//! assert_eq!(uniforms, vec![38.0 / 10_007.0, 193.0 / 10_007.0, 968.0 / 10_007.0]);
//! ```

mod congruential;
mod digits;
mod shift;
mod twister;

use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use tracing::debug;

use crate::error::{Result, RngError};
use crate::fields::Fields;

pub use twister::TwisterRng;

/// Smallest seed offered by [`suggest_seed`].
pub const SUGGESTED_SEED_MIN: u64 = 1000;

/// Largest seed offered by [`suggest_seed`].
pub const SUGGESTED_SEED_MAX: u64 = 9999;

/// Uniform generator algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Algorithm {
    /// Von Neumann's middle-square method.
    MiddleSquare,
    /// Middle-product method on two seeds.
    MiddleProduct,
    /// Mixed linear congruential generator.
    LinearCongruential,
    /// Multiplicative (Lehmer) congruential generator.
    MultiplicativeCongruential,
    /// Library generator in place of Mersenne Twister.
    MersenneTwister,
    /// Marsaglia xorshift32.
    Xorshift,
    /// Tausworthe-style shift register.
    Tausworthe,
}

impl Algorithm {
    /// All algorithms, in menu order.
    pub const ALL: [Algorithm; 7] = [
        Algorithm::MiddleSquare,
        Algorithm::MiddleProduct,
        Algorithm::LinearCongruential,
        Algorithm::MultiplicativeCongruential,
        Algorithm::MersenneTwister,
        Algorithm::Xorshift,
        Algorithm::Tausworthe,
    ];

    /// Canonical kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::MiddleSquare => "middle-square",
            Algorithm::MiddleProduct => "middle-product",
            Algorithm::LinearCongruential => "linear-congruential",
            Algorithm::MultiplicativeCongruential => "multiplicative-congruential",
            Algorithm::MersenneTwister => "mersenne-twister",
            Algorithm::Xorshift => "xorshift",
            Algorithm::Tausworthe => "tausworthe",
        }
    }

    /// Field names this algorithm reads, required ones first.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Algorithm::MiddleSquare => &["x0"],
            Algorithm::MiddleProduct => &["x0", "x1"],
            Algorithm::LinearCongruential => &["x0", "a", "c", "m"],
            Algorithm::MultiplicativeCongruential => &["x0", "a", "m"],
            Algorithm::MersenneTwister => &["seed"],
            Algorithm::Xorshift | Algorithm::Tausworthe => &["seed"],
        }
    }

    /// Returns `true` if the named field may be left blank.
    pub fn is_optional(self, field: &str) -> bool {
        self == Algorithm::MersenneTwister && field == "seed"
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = RngError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "middle-square" | "middle-squares" => Ok(Algorithm::MiddleSquare),
            "middle-product" | "middle-products" => Ok(Algorithm::MiddleProduct),
            "linear-congruential" | "lcg" => Ok(Algorithm::LinearCongruential),
            "multiplicative-congruential" | "multiplicative" | "mcg" => {
                Ok(Algorithm::MultiplicativeCongruential)
            }
            "mersenne-twister" | "mt" => Ok(Algorithm::MersenneTwister),
            "xorshift" | "xorshift32" => Ok(Algorithm::Xorshift),
            "tausworthe" => Ok(Algorithm::Tausworthe),
            _ => Err(RngError::invalid(
                "method",
                format!(
                    "unknown algorithm '{}'. Supported: {}",
                    s,
                    Algorithm::ALL.map(Algorithm::name).join(", ")
                ),
            )),
        }
    }
}

/// Typed, validated parameters for one algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "algorithm", rename_all = "kebab-case"))]
pub enum GeneratorParams {
    /// Middle-square seed.
    MiddleSquare {
        /// Initial state.
        x0: u64,
    },
    /// Middle-product seed pair.
    MiddleProduct {
        /// First seed.
        x0: u64,
        /// Second seed.
        x1: u64,
    },
    /// `x <- (a*x + c) mod m`.
    LinearCongruential {
        /// Initial state.
        x0: u64,
        /// Multiplier.
        a: u64,
        /// Increment.
        c: u64,
        /// Modulus, non-zero.
        m: u64,
    },
    /// `x <- (a*x) mod m`.
    MultiplicativeCongruential {
        /// Initial state.
        x0: u64,
        /// Multiplier.
        a: u64,
        /// Modulus, non-zero.
        m: u64,
    },
    /// Library generator; `None` draws the seed from system entropy.
    MersenneTwister {
        /// Optional seed.
        seed: Option<u64>,
    },
    /// Xorshift32 seed, non-zero.
    Xorshift {
        /// Initial state.
        seed: u32,
    },
    /// Tausworthe seed, non-zero.
    Tausworthe {
        /// Initial state.
        seed: u32,
    },
}

impl GeneratorParams {
    /// Reads the parameters of `algorithm` from free-text fields.
    ///
    /// # Errors
    ///
    /// - `MissingParameter` for a blank required field
    /// - `InvalidParameter` for non-integer or out-of-range text
    /// - `DegenerateInput` for parameters that cannot generate (see [`Self::validate`])
    pub fn from_fields(algorithm: Algorithm, fields: &Fields) -> Result<Self> {
        let params = match algorithm {
            Algorithm::MiddleSquare => GeneratorParams::MiddleSquare {
                x0: fields.require_u64("x0")?,
            },
            Algorithm::MiddleProduct => GeneratorParams::MiddleProduct {
                x0: fields.require_u64("x0")?,
                x1: fields.require_u64("x1")?,
            },
            Algorithm::LinearCongruential => GeneratorParams::LinearCongruential {
                x0: fields.require_u64("x0")?,
                a: fields.require_u64("a")?,
                c: fields.require_u64("c")?,
                m: fields.require_u64("m")?,
            },
            Algorithm::MultiplicativeCongruential => GeneratorParams::MultiplicativeCongruential {
                x0: fields.require_u64("x0")?,
                a: fields.require_u64("a")?,
                m: fields.require_u64("m")?,
            },
            Algorithm::MersenneTwister => GeneratorParams::MersenneTwister {
                seed: fields.optional_u64("seed")?,
            },
            Algorithm::Xorshift => GeneratorParams::Xorshift {
                seed: fields.require_u32("seed")?,
            },
            Algorithm::Tausworthe => GeneratorParams::Tausworthe {
                seed: fields.require_u32("seed")?,
            },
        };
        params.validate()?;
        Ok(params)
    }

    /// The algorithm these parameters drive.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            GeneratorParams::MiddleSquare { .. } => Algorithm::MiddleSquare,
            GeneratorParams::MiddleProduct { .. } => Algorithm::MiddleProduct,
            GeneratorParams::LinearCongruential { .. } => Algorithm::LinearCongruential,
            GeneratorParams::MultiplicativeCongruential { .. } => {
                Algorithm::MultiplicativeCongruential
            }
            GeneratorParams::MersenneTwister { .. } => Algorithm::MersenneTwister,
            GeneratorParams::Xorshift { .. } => Algorithm::Xorshift,
            GeneratorParams::Tausworthe { .. } => Algorithm::Tausworthe,
        }
    }

    /// Checks that the parameters can drive a recurrence.
    ///
    /// # Errors
    ///
    /// Returns `DegenerateInput` if:
    /// - a congruential modulus `m` is zero
    /// - a xorshift or Tausworthe seed is zero (a fixed point of both)
    pub fn validate(&self) -> Result<()> {
        match *self {
            GeneratorParams::LinearCongruential { m: 0, .. }
            | GeneratorParams::MultiplicativeCongruential { m: 0, .. } => {
                Err(RngError::degenerate("modulus m is zero"))
            }
            GeneratorParams::Xorshift { seed: 0 } => Err(RngError::degenerate(
                "xorshift seed 0 is a fixed point and yields only zeros",
            )),
            GeneratorParams::Tausworthe { seed: 0 } => Err(RngError::degenerate(
                "Tausworthe seed 0 is a fixed point and yields only zeros",
            )),
            _ => Ok(()),
        }
    }
}

/// Immutable request for `count` uniforms from one algorithm.
///
/// Fields are private; a constructed spec is always valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GeneratorSpec {
    params: GeneratorParams,
    count: usize,
}

impl GeneratorSpec {
    /// Creates a spec after validating `params` and `count`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero count, or the error of
    /// [`GeneratorParams::validate`].
    pub fn new(params: GeneratorParams, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(RngError::invalid("count", "must be a positive integer"));
        }
        params.validate()?;
        Ok(Self { params, count })
    }

    /// Creates a spec from free-text fields.
    pub fn from_fields(algorithm: Algorithm, fields: &Fields, count: usize) -> Result<Self> {
        Self::new(GeneratorParams::from_fields(algorithm, fields)?, count)
    }

    /// Returns the validated parameters.
    #[inline]
    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    /// Returns the algorithm.
    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.params.algorithm()
    }

    /// Returns the number of uniforms to produce.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Starts a fresh run over the sequence.
    ///
    /// Each call restarts from the seed; an unseeded Mersenne Twister run
    /// draws a new entropy seed every time.
    pub fn stream(&self) -> UniformStream {
        let state = match self.params {
            GeneratorParams::MiddleSquare { x0 } => GeneratorState::MiddleSquare(x0),
            GeneratorParams::MiddleProduct { x0, x1 } => GeneratorState::MiddleProduct(x0, x1),
            GeneratorParams::LinearCongruential { x0, a, c, m } => {
                GeneratorState::Linear { x: x0, a, c, m }
            }
            GeneratorParams::MultiplicativeCongruential { x0, a, m } => {
                GeneratorState::Multiplicative { x: x0, a, m }
            }
            GeneratorParams::MersenneTwister { seed } => GeneratorState::Twister(Box::new(
                seed.map_or_else(TwisterRng::from_entropy, TwisterRng::from_seed),
            )),
            GeneratorParams::Xorshift { seed } => GeneratorState::Xorshift(seed),
            GeneratorParams::Tausworthe { seed } => GeneratorState::Tausworthe(seed),
        };
        UniformStream {
            state,
            remaining: self.count,
        }
    }
}

/// Recurrence state of one run.
#[derive(Clone, Debug)]
enum GeneratorState {
    MiddleSquare(u64),
    MiddleProduct(u64, u64),
    Linear { x: u64, a: u64, c: u64, m: u64 },
    Multiplicative { x: u64, a: u64, m: u64 },
    Twister(Box<TwisterRng>),
    Xorshift(u32),
    Tausworthe(u32),
}

impl GeneratorState {
    #[inline]
    fn step(&mut self) -> f64 {
        match self {
            GeneratorState::MiddleSquare(x) => {
                let (value, next) = digits::middle_square_step(*x);
                *x = next;
                value
            }
            GeneratorState::MiddleProduct(x0, x1) => {
                let (value, (n0, n1)) = digits::middle_product_step((*x0, *x1));
                *x0 = n0;
                *x1 = n1;
                value
            }
            GeneratorState::Linear { x, a, c, m } => {
                let (value, next) = congruential::linear_step(*x, *a, *c, *m);
                *x = next;
                value
            }
            GeneratorState::Multiplicative { x, a, m } => {
                let (value, next) = congruential::multiplicative_step(*x, *a, *m);
                *x = next;
                value
            }
            GeneratorState::Twister(rng) => rng.gen_uniform(),
            GeneratorState::Xorshift(x) => {
                let (value, next) = shift::xorshift32_step(*x);
                *x = next;
                value
            }
            GeneratorState::Tausworthe(s) => {
                let (value, next) = shift::tausworthe_step(*s);
                *s = next;
                value
            }
        }
    }
}

/// Lazy, finite stream of uniforms for one run.
///
/// Yields exactly [`GeneratorSpec::count`] values.
#[derive(Clone, Debug)]
pub struct UniformStream {
    state: GeneratorState,
    remaining: usize,
}

impl UniformStream {
    /// Seed of the library generator, including one drawn from entropy.
    ///
    /// `None` for the classical algorithms, whose seeds are part of the
    /// [`GeneratorParams`].
    pub fn seed(&self) -> Option<u64> {
        match &self.state {
            GeneratorState::Twister(rng) => Some(rng.seed()),
            _ => None,
        }
    }
}

impl Iterator for UniformStream {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.state.step())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for UniformStream {}

impl FusedIterator for UniformStream {}

/// Materialises the full uniform sequence of `spec`.
///
/// Validation happens when the [`GeneratorSpec`] is built, so this cannot fail.
pub fn generate(spec: &GeneratorSpec) -> Vec<f64> {
    debug!(
        algorithm = %spec.algorithm(),
        count = spec.count(),
        "generating uniform sequence"
    );
    spec.stream().collect()
}

/// Draws a four-digit seed in [1000, 9999] for seeding the classical
/// generators by hand.
pub fn suggest_seed<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    Uniform::new_inclusive(SUGGESTED_SEED_MIN, SUGGESTED_SEED_MAX).sample(rng)
}
