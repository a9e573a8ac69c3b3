//! Hit-or-miss Monte Carlo area estimation.
//!
//! Points are thrown uniformly into a bounding box around the curve(s) and
//! the fraction landing between the lower and upper curve scales the box
//! area. The box height comes from sampling the curve(s) on a regular grid.
//!
//! ```rust
//! use randlab_core::montecarlo::{estimate, AreaConfig, AreaProblem};
//!
//! let problem = AreaProblem::under_curve(|x: f64| x * x, 0.0, 1.0).unwrap();
//! let config = AreaConfig::builder().points(50_000).seed(42).build().unwrap();
//! let result = estimate(&problem, &config).unwrap();
//!
//! assert!((result.area - 1.0 / 3.0).abs() < 0.02);
//! ```

use rand_distr::{Distribution, Uniform};
use tracing::debug;

use crate::error::{Result, RngError};
use crate::generator::TwisterRng;

/// Maximum number of points per estimate.
pub const MAX_POINTS: usize = 1_000_000;

/// Default number of grid points used to size the bounding box.
pub const DEFAULT_GRID_POINTS: usize = 300;

/// Simulation settings for [`estimate`].
///
/// Use [`AreaConfig::builder`] to construct instances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AreaConfig {
    points: usize,
    seed: Option<u64>,
    grid_points: usize,
}

impl AreaConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> AreaConfigBuilder {
        AreaConfigBuilder::default()
    }

    /// Number of random points.
    #[inline]
    pub fn points(&self) -> usize {
        self.points
    }

    /// Optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Grid resolution for the bounding box.
    #[inline]
    pub fn grid_points(&self) -> usize {
        self.grid_points
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if:
    /// - `points` is 0 or greater than [`MAX_POINTS`]
    /// - `grid_points` is less than 2
    pub fn validate(&self) -> Result<()> {
        if self.points == 0 || self.points > MAX_POINTS {
            return Err(RngError::invalid(
                "points",
                format!("{} is outside [1, {}]", self.points, MAX_POINTS),
            ));
        }
        if self.grid_points < 2 {
            return Err(RngError::invalid("grid_points", "must be at least 2"));
        }
        Ok(())
    }
}

/// Builder for [`AreaConfig`].
#[derive(Clone, Debug, Default)]
pub struct AreaConfigBuilder {
    points: Option<usize>,
    seed: Option<u64>,
    grid_points: Option<usize>,
}

impl AreaConfigBuilder {
    /// Sets the number of random points, in [1, 1_000_000].
    #[inline]
    pub fn points(mut self, points: usize) -> Self {
        self.points = Some(points);
        self
    }

    /// Sets the seed; without one the seed is drawn from system entropy.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the grid resolution used to size the bounding box.
    #[inline]
    pub fn grid_points(mut self, grid_points: usize) -> Self {
        self.grid_points = Some(grid_points);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `MissingParameter` if `points` was not set, or the error of
    /// [`AreaConfig::validate`].
    pub fn build(self) -> Result<AreaConfig> {
        let config = AreaConfig {
            points: self.points.ok_or_else(|| RngError::missing("points"))?,
            seed: self.seed,
            grid_points: self.grid_points.unwrap_or(DEFAULT_GRID_POINTS),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Region whose area is estimated: under `f`, or between `f` and `g`.
#[derive(Clone, Debug)]
pub struct AreaProblem<F, G = fn(f64) -> f64> {
    f: F,
    g: Option<G>,
    a: f64,
    b: f64,
}

impl<F> AreaProblem<F>
where
    F: Fn(f64) -> f64,
{
    /// Area between the x-axis and `f` on `[a, b]` (where `f` is positive).
    pub fn under_curve(f: F, a: f64, b: f64) -> Result<Self> {
        check_interval(a, b)?;
        Ok(Self { f, g: None, a, b })
    }
}

impl<F, G> AreaProblem<F, G>
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64,
{
    /// Area enclosed between `f` and `g` on `[a, b]`.
    pub fn between_curves(f: F, g: G, a: f64, b: f64) -> Result<Self> {
        check_interval(a, b)?;
        Ok(Self {
            f,
            g: Some(g),
            a,
            b,
        })
    }

    /// Lower and upper curve values at `x`.
    #[inline]
    fn bounds_at(&self, x: f64) -> (f64, f64) {
        let y1 = (self.f)(x);
        match &self.g {
            Some(g) => {
                let y2 = g(x);
                (y1.min(y2), y1.max(y2))
            }
            None => (0.0, y1),
        }
    }

    /// Vertical extent of the bounding box, from a regular grid.
    fn vertical_range(&self, grid_points: usize) -> Result<(f64, f64)> {
        let step = (self.b - self.a) / (grid_points - 1) as f64;
        let mut ymin = f64::INFINITY;
        let mut ymax = f64::NEG_INFINITY;
        for i in 0..grid_points {
            let x = self.a + step * i as f64;
            let y1 = (self.f)(x);
            let y2 = self.g.as_ref().map_or(y1, |g| g(x));
            if !y1.is_finite() || !y2.is_finite() {
                return Err(RngError::degenerate(format!(
                    "curve is not finite at x = {}",
                    x
                )));
            }
            ymin = ymin.min(y1).min(y2);
            ymax = ymax.max(y1).max(y2);
        }
        if self.g.is_none() {
            ymin = 0.0;
        }
        if ymax <= ymin {
            return Err(RngError::degenerate(format!(
                "bounding box has no height (y in [{}, {}])",
                ymin, ymax
            )));
        }
        Ok((ymin, ymax))
    }
}

fn check_interval(a: f64, b: f64) -> Result<()> {
    if !a.is_finite() || !b.is_finite() {
        return Err(RngError::invalid("a", "interval bounds must be finite"));
    }
    if a >= b {
        return Err(RngError::invalid(
            "b",
            format!("upper limit {} must exceed lower limit {}", b, a),
        ));
    }
    Ok(())
}

/// Outcome of an area estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AreaEstimate {
    /// Estimated area.
    pub area: f64,
    /// Standard error of the estimate.
    pub std_error: f64,
    /// Area of the bounding box.
    pub bounding_area: f64,
    /// Points that fell inside the region.
    pub inside: usize,
    /// Points thrown.
    pub points: usize,
    /// Seed used, including one drawn from entropy.
    pub seed: u64,
}

impl AreaEstimate {
    /// Half-width of the 95% confidence interval.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// `|(area - exact) / exact| * 100`, or `None` when `exact` is zero.
    pub fn relative_error_pct(&self, exact: f64) -> Option<f64> {
        if exact == 0.0 {
            None
        } else {
            Some(((self.area - exact) / exact).abs() * 100.0)
        }
    }
}

/// Estimates the area of `problem`.
///
/// # Errors
///
/// Returns `DegenerateInput` if a curve is not finite on the grid or the
/// bounding box has zero height, or the error of [`AreaConfig::validate`].
pub fn estimate<F, G>(problem: &AreaProblem<F, G>, config: &AreaConfig) -> Result<AreaEstimate>
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64,
{
    config.validate()?;
    let (ymin, ymax) = problem.vertical_range(config.grid_points)?;

    let mut rng = config
        .seed
        .map_or_else(TwisterRng::from_entropy, TwisterRng::from_seed);
    let seed = rng.seed();
    let xs = Uniform::new(problem.a, problem.b);
    let ys = Uniform::new(ymin, ymax);

    let mut inside = 0usize;
    for _ in 0..config.points {
        let x = xs.sample(rng.rng_mut());
        let y = ys.sample(rng.rng_mut());
        let (lower, upper) = problem.bounds_at(x);
        if lower <= y && y <= upper {
            inside += 1;
        }
    }

    let n = config.points as f64;
    let hit_rate = inside as f64 / n;
    let bounding_area = (problem.b - problem.a) * (ymax - ymin);
    let area = bounding_area * hit_rate;
    let std_error = bounding_area * (hit_rate * (1.0 - hit_rate) / n).sqrt();

    debug!(
        points = config.points,
        inside,
        area,
        seed,
        "monte carlo area estimate"
    );

    Ok(AreaEstimate {
        area,
        std_error,
        bounding_area,
        inside,
        points: config.points,
        seed,
    })
}
