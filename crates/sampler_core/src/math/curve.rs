//! Piecewise linear curves.

use crate::types::CurveError;
use num_traits::Float;

/// Piecewise linear curve over sorted knots.
///
/// Stores sorted (x, y) knots and evaluates by linear interpolation between
/// adjacent knots. Outside the knot domain the curve is flat at the end
/// values, so evaluation never fails.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f32`, `f64`)
///
/// # Example
///
/// ```
/// use sampler_core::math::LinearCurve;
///
/// let curve = LinearCurve::new(&[0.0, 1.0, 2.0], &[0.0, 2.0, 4.0]).unwrap();
/// assert_eq!(curve.evaluate(0.5), 1.0);
/// assert_eq!(curve.evaluate(5.0), 4.0);
/// assert_eq!(curve.domain(), (0.0, 2.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearCurve<T: Float> {
    /// Sorted x-coordinates
    xs: Vec<T>,
    /// Corresponding y-values (in same order as xs after sorting)
    ys: Vec<T>,
}

impl<T: Float> LinearCurve<T> {
    /// Construct a curve from x and y knots.
    ///
    /// Knots are sorted by x-coordinate. Requires at least 2 knots with
    /// finite, distinct x-coordinates and finite y-values.
    ///
    /// # Errors
    ///
    /// * `CurveError::LengthMismatch` - Slices of different lengths
    /// * `CurveError::InsufficientKnots` - Fewer than 2 knots
    /// * `CurveError::NonFiniteKnot` - NaN or infinite coordinate
    /// * `CurveError::DuplicateKnot` - Two knots share an x-coordinate
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, CurveError> {
        if xs.len() != ys.len() {
            return Err(CurveError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }

        if xs.len() < 2 {
            return Err(CurveError::InsufficientKnots {
                got: xs.len(),
                need: 2,
            });
        }

        if let Some(index) = xs
            .iter()
            .zip(ys)
            .position(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(CurveError::NonFiniteKnot { index });
        }

        let mut pairs: Vec<(T, T)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        if let Some(window) = pairs.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(CurveError::DuplicateKnot {
                x: window[0].0.to_f64().unwrap_or(f64::NAN),
            });
        }

        let (xs, ys): (Vec<T>, Vec<T>) = pairs.into_iter().unzip();
        Ok(Self { xs, ys })
    }

    /// Returns the sorted x-coordinates.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Returns the y-values in sorted x order.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Returns the `(first, last)` x-coordinates.
    #[inline]
    pub fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Returns the largest y-value.
    pub fn max_value(&self) -> T {
        self.ys.iter().copied().fold(T::neg_infinity(), T::max)
    }

    /// Evaluates the curve at `x`, holding the end values outside the domain.
    pub fn evaluate(&self, x: T) -> T {
        let last = self.xs.len() - 1;
        if x <= self.xs[0] {
            return self.ys[0];
        }
        if x >= self.xs[last] {
            return self.ys[last];
        }

        // partition_point gives the first knot strictly right of x
        let i = self.xs.partition_point(|&xi| xi <= x) - 1;

        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }
}

/// Acceptance probability curve for envelope sampling.
///
/// A [`LinearCurve`] whose y-values are clamped into `[0, 1]` at
/// construction. Stands in for a hand-edited curve asset.
///
/// # Example
///
/// ```
/// use sampler_core::math::ProbabilityCurve;
///
/// let tent = ProbabilityCurve::new(&[0.0, 0.5, 1.0], &[0.0, 1.0, 0.0]).unwrap();
/// assert!(tent.is_envelope());
/// assert_eq!(tent.evaluate(0.25), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProbabilityCurve {
    curve: LinearCurve<f32>,
}

impl ProbabilityCurve {
    /// Builds a probability curve, clamping every y-value into `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`LinearCurve::new`].
    pub fn new(xs: &[f32], ys: &[f32]) -> Result<Self, CurveError> {
        let clamped: Vec<f32> = ys.iter().map(|y| y.clamp(0.0, 1.0)).collect();
        let curve = LinearCurve::new(xs, &clamped)?;
        Ok(Self { curve })
    }

    /// Evaluates the acceptance probability at `x`.
    #[inline]
    pub fn evaluate(&self, x: f32) -> f32 {
        self.curve.evaluate(x)
    }

    /// Returns the peak probability.
    pub fn max_probability(&self) -> f32 {
        self.curve.max_value()
    }

    /// True when the peak reaches 1, i.e. the curve is a valid envelope.
    pub fn is_envelope(&self) -> bool {
        self.max_probability() >= 1.0
    }

    /// Returns the underlying linear curve.
    pub fn curve(&self) -> &LinearCurve<f32> {
        &self.curve
    }
}
