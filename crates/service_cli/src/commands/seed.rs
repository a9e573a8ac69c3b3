//! Seed command implementation
//!
//! Suggests four-digit seeds for the seeded algorithms.

use std::io::Write;

use rand::Rng;
use randlab_core::generator::suggest_seed;
use tracing::debug;

use crate::{CliError, Result};

/// Write `count` suggested seeds drawn from `rng` to `out`, one per line
pub fn run<R: Rng + ?Sized, W: Write>(count: usize, rng: &mut R, out: &mut W) -> Result<()> {
    if count == 0 {
        return Err(CliError::InvalidArgument(
            "seed count must be at least 1".to_string(),
        ));
    }

    for _ in 0..count {
        writeln!(out, "{}", suggest_seed(rng))?;
    }
    debug!("Suggested {} seeds", count);
    Ok(())
}
