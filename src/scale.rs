//! Linear scales from data extents to the graph volume.

use error_stack::Report;

use crate::core::{Axis, DataPoint, DegenerateAxisPolicy, Dimensions};
use crate::error::GraphError;

/// Smallest and largest value of one field over a dataset
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    pub fn of(points: &[DataPoint], axis: Axis) -> crate::Result<Self> {
        let mut values = points.iter().map(|p| p.get(axis));
        let first = values.next().ok_or_else(|| Report::new(GraphError::EmptyDataset))?;
        let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Ok(Self { min, max })
    }

    /// `max - min`. Infinite when the extent is wider than `f64::MAX`.
    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Position of `v` within the extent, 0 at `min` and 1 at `max`.
    /// Works on halved values so that the widest finite extents do not
    /// overflow.
    #[inline]
    pub fn fraction(&self, v: f64) -> f64 {
        (v * 0.5 - self.min * 0.5) / (self.max * 0.5 - self.min * 0.5)
    }

    /// Value at fraction `t` of the extent
    #[inline]
    pub fn lerp(&self, t: f64) -> f64 {
        self.min * (1.0 - t) + self.max * t
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain: Extent,
    pub range: (f64, f64),
    degenerate: bool,
    policy: DegenerateAxisPolicy,
}

impl LinearScale {
    /// Fails only when the domain is constant and `policy` is `Reject`
    pub fn new(
        domain: Extent,
        range: (f64, f64),
        policy: DegenerateAxisPolicy,
        axis: Axis,
    ) -> crate::Result<Self> {
        let degenerate = domain.is_degenerate();
        if degenerate && policy == DegenerateAxisPolicy::Reject {
            return Err(Report::new(GraphError::DegenerateAxis { axis }));
        }
        Ok(Self {
            domain,
            range,
            degenerate,
            policy,
        })
    }

    pub fn apply(&self, v: f64) -> f64 {
        let (lo, hi) = self.range;
        if self.degenerate {
            return match self.policy {
                DegenerateAxisPolicy::Midpoint => (lo + hi) * 0.5,
                _ => lo,
            };
        }
        lo + self.domain.fraction(v) * (hi - lo)
    }

    /// Range value back to data space. `None` for a constant domain.
    pub fn invert(&self, r: f64) -> Option<f64> {
        let (lo, hi) = self.range;
        if self.degenerate || hi == lo {
            return None;
        }
        Some(self.domain.lerp((r - lo) / (hi - lo)))
    }
}

/// The three scales of one graph
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisScales {
    pub x: LinearScale,
    pub y: LinearScale,
    pub z: LinearScale,
}

impl AxisScales {
    /// Ranges are `[0, width]`, `[0, height]` and `[0, -depth]`: z grows away
    /// from the viewer.
    pub fn fit(
        points: &[DataPoint],
        dims: Dimensions,
        policy: DegenerateAxisPolicy,
    ) -> crate::Result<Self> {
        let scale = |axis: Axis, hi: f32| -> crate::Result<LinearScale> {
            LinearScale::new(Extent::of(points, axis)?, (0.0, hi as f64), policy, axis)
        };
        Ok(Self {
            x: scale(Axis::X, dims.width)?,
            y: scale(Axis::Y, dims.height)?,
            z: scale(Axis::Z, -dims.depth)?,
        })
    }

    pub fn get(&self, axis: Axis) -> &LinearScale {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    pub fn apply(&self, p: &DataPoint) -> [f64; 3] {
        [self.x.apply(p.x), self.y.apply(p.y), self.z.apply(p.z)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(min: f64, max: f64, lo: f64, hi: f64) -> LinearScale {
        LinearScale::new(
            Extent { min, max },
            (lo, hi),
            DegenerateAxisPolicy::ClampToLow,
            Axis::X,
        )
        .unwrap()
    }

    #[test]
    fn extent_over_dataset() {
        let pts = [
            DataPoint::new(3.0, 0.0, 0.0),
            DataPoint::new(-1.0, 0.0, 0.0),
            DataPoint::new(7.5, 0.0, 0.0),
        ];
        assert_eq!(
            Extent::of(&pts, Axis::X).unwrap(),
            Extent { min: -1.0, max: 7.5 }
        );
    }

    #[test]
    fn extent_of_empty_dataset_fails() {
        let err = Extent::of(&[], Axis::Y).unwrap_err();
        assert_eq!(err.current_context(), &GraphError::EmptyDataset);
    }

    #[test]
    fn endpoints_map_to_range() {
        let s = scale(2.0, 12.0, 0.0, 3.0);
        assert_eq!(s.apply(2.0), 0.0);
        assert_eq!(s.apply(12.0), 3.0);
        assert_eq!(s.apply(7.0), 1.5);
    }

    #[test]
    fn monotonic_in_sign_of_range() {
        let up = scale(0.0, 10.0, 0.0, 1.0);
        let down = scale(0.0, 10.0, 0.0, -1.0);
        let samples: Vec<f64> = (0..=20).map(|i| i as f64 * 0.5).collect();
        for w in samples.windows(2) {
            assert!(up.apply(w[0]) < up.apply(w[1]));
            assert!(down.apply(w[0]) > down.apply(w[1]));
        }
    }

    #[test]
    fn invert_round_trips_interior_value() {
        let s = scale(-4.0, 4.0, 0.0, -2.0);
        let r = s.apply(1.0);
        assert!((s.invert(r).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_axis_policies() {
        let flat = Extent { min: 5.0, max: 5.0 };
        let low = LinearScale::new(flat, (0.0, 2.0), DegenerateAxisPolicy::ClampToLow, Axis::X)
            .unwrap();
        assert_eq!(low.apply(5.0), 0.0);
        assert_eq!(low.invert(0.0), None);

        let mid = LinearScale::new(flat, (0.0, 2.0), DegenerateAxisPolicy::Midpoint, Axis::X)
            .unwrap();
        assert_eq!(mid.apply(5.0), 1.0);

        let err = LinearScale::new(flat, (0.0, 2.0), DegenerateAxisPolicy::Reject, Axis::Z)
            .unwrap_err();
        assert_eq!(
            err.current_context(),
            &GraphError::DegenerateAxis { axis: Axis::Z }
        );
    }

    #[test]
    fn widest_finite_extent_stays_in_range() {
        let s = scale(-1e308, 1e308, 0.0, 1.0);
        assert_eq!(s.apply(-1e308), 0.0);
        assert_eq!(s.apply(0.0), 0.5);
        assert_eq!(s.apply(1e308), 1.0);
        assert_eq!(s.invert(1.0), Some(1e308));

        let extreme = Extent {
            min: f64::MIN,
            max: f64::MAX,
        };
        assert!(extreme.span().is_infinite());
        assert!(!extreme.is_degenerate());
        assert_eq!(extreme.fraction(f64::MAX), 1.0);
        assert_eq!(extreme.fraction(f64::MIN), 0.0);
    }

    #[test]
    fn z_range_is_inverted() {
        let pts = [DataPoint::new(0.0, 0.0, 0.0), DataPoint::new(10.0, 5.0, 2.0)];
        let dims = Dimensions {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        };
        let scales = AxisScales::fit(&pts, dims, DegenerateAxisPolicy::ClampToLow).unwrap();
        assert_eq!(scales.get(Axis::Z).range, (0.0, -1.0));
        assert_eq!(scales.apply(&pts[1]), [1.0, 1.0, -1.0]);
    }
}
