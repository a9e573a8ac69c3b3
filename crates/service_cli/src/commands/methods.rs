//! Methods command implementation
//!
//! Lists the generator algorithms and distributions with the fields each one
//! reads.

use std::io::Write;

use randlab_core::generator::Algorithm;
use randlab_core::sampler::{BinomialMethod, DistributionKind};

use crate::Result;

/// Write the algorithm and distribution catalogue to `out`
pub fn run<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Algorithms:")?;
    for algorithm in Algorithm::ALL {
        let fields: Vec<String> = algorithm
            .fields()
            .iter()
            .map(|&field| {
                if algorithm.is_optional(field) {
                    format!("[{}]", field)
                } else {
                    field.to_string()
                }
            })
            .collect();
        writeln!(out, "  {:<30} {}", algorithm.name(), fields.join(", "))?;
    }

    writeln!(out)?;
    writeln!(out, "Distributions:")?;
    for kind in DistributionKind::ALL {
        writeln!(out, "  {:<30} {}", kind.name(), kind.fields().join(", "))?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Binomial methods: {}, {} (default: {})",
        BinomialMethod::SingleDraw,
        BinomialMethod::BernoulliSum,
        BinomialMethod::default()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_method() {
        let mut buffer = Vec::new();
        run(&mut buffer).unwrap();
        let listing = String::from_utf8(buffer).unwrap();

        for algorithm in Algorithm::ALL {
            assert!(listing.contains(algorithm.name()));
        }
        for kind in DistributionKind::ALL {
            assert!(listing.contains(kind.name()));
        }
        assert!(listing.contains("[seed]"));
        assert!(listing.contains("x0, a, c, m"));
    }
}
