use std::fmt::{Debug, Display};
pub use num::Float;
use num::traits::float::FloatCore;

/// Coordinate and distance type. Satisfied by `f32` and `f64`.
pub trait Scalar: Float + FloatCore + Debug + Display {}
impl<T: Float + FloatCore + Debug + Display> Scalar for T {}

/// An item that lives in a metric space.
pub trait MetricItem<F: Scalar> {
    /// Distance between two items. Must be symmetric and non-negative.
    fn distance(&self, other: &Self) -> F;
}

/// A (longitude, latitude) pair.
///
/// Equality is exact, with no tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point<F: Scalar = f64> {
    pub lon: F,
    pub lat: F,
}

impl<F: Scalar> Point<F> {
    pub fn new(lon: F, lat: F) -> Self {
        Point { lon, lat }
    }
}

impl<F: Scalar> MetricItem<F> for Point<F> {
    /// Plain euclidean distance on the coordinate plane.
    fn distance(&self, other: &Self) -> F {
        let dlon = self.lon - other.lon;
        let dlat = self.lat - other.lat;
        (dlon * dlon + dlat * dlat).sqrt()
    }
}

impl<F: Scalar> From<(F, F)> for Point<F> {
    fn from((lon, lat): (F, F)) -> Self {
        Point::new(lon, lat)
    }
}

#[cfg(test)]
mod tests {
    use super::{MetricItem, Point};

    #[test]
    fn euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn exact_equality() {
        assert_eq!(Point::new(-2.0f32, -2.5), Point::from((-2.0, -2.5)));
        assert_ne!(Point::new(0.1, 0.2), Point::new(0.1, 0.2 + 1e-12));
    }
}
