use pathetic::{MetricItem, VPTree};

#[derive(Debug, PartialEq, Clone)]
struct Point(f32);

impl MetricItem<f32> for Point {
    fn distance(&self, a: &Self) -> f32 {
        (self.0 - a.0).abs()
    }
}

#[test]
fn test_linear() {
    for n in 10..101 {
        let points: Vec<_> = (0..n + 1).map(|x| Point(x as f32 / n as f32)).collect();

        let vp = VPTree::new(points.clone()).unwrap();
        assert_eq!(vp.len(), points.len());

        for p in &points {
            // each point should be nearest to itself.
            assert_eq!(vp.nearest_neighbor(p), p, "\n{}", vp.dump());
        }
    }
}

#[test]
fn test_harmonic() {
    for n in 10..101 {
        let points: Vec<_> = (1..n + 1).map(|x| Point(1.0 / (x as f32))).collect();

        let vp = VPTree::new(points.clone()).unwrap();

        for p in &points {
            assert_eq!(vp.nearest_neighbor(p), p, "\n{}", vp.dump());
        }
    }
}
