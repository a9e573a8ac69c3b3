//! # randlab_core
//!
//! Classical pseudo-random number generators, distribution samplers and a
//! hit-or-miss Monte Carlo area estimator.
//!
//! A run has two stages:
//!
//! 1. [`generator`] produces a uniform sequence in [0, 1) from one of seven
//!    algorithms (middle-square, middle-product, linear and multiplicative
//!    congruential, a library generator standing in for Mersenne Twister,
//!    xorshift32 and a Tausworthe shift register).
//! 2. [`sampler`] maps the uniforms onto Uniform, Exponential, Normal,
//!    Poisson or Binomial samples with closed-form transforms.
//!
//! [`engine`] ties both together for front ends that collect parameters as
//! free text ([`Fields`]); [`montecarlo`] reuses the library generator for
//! area estimation.
//!
//! Every run owns its generator state and is deterministic for a fixed
//! seed, apart from the unseeded library generator, which reports the
//! entropy seed it drew.
//!
//! ## Usage Example
//!
//! ```rust
//! use randlab_core::engine::{run, SequenceRequest};
//! use randlab_core::generator::Algorithm;
//! use randlab_core::sampler::DistributionKind;
//! use randlab_core::Fields;
//!
//! let request = SequenceRequest::new(
//!     Algorithm::LinearCongruential,
//!     Fields::new().with("x0", "7").with("a", "5").with("c", "3").with("m", "10007"),
//!     10,
//! )
//! .with_distribution(DistributionKind::Normal, Fields::new().with("mean", "0").with("std_dev", "1"));
//!
//! let report = run(&request).unwrap();
//! assert_eq!(report.values.len(), 5);
//! ```

#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod fields;
pub mod generator;
pub mod montecarlo;
pub mod sampler;

pub use error::{Result, RngError};
pub use fields::Fields;
