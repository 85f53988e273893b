use super::Point;

/// An infinite, deterministic stream of candidate center points. The
/// layouter walks it outward from the origin and commits the first point
/// whose rectangle fits, so implementations should order points by
/// non-decreasing distance from the origin to keep clouds compact.
pub trait PointSource {
    /// Restart the sequence from its first point.
    fn reset(&mut self);

    /// Produce the next candidate point. Never exhausts.
    fn next_point(&mut self) -> Point;
}

/// Archimedean spiral: radius grows linearly with the accumulated angle,
/// `r = coefficient * theta`. The first point is always the origin.
#[derive(Debug, Clone)]
pub struct ArchimedeanSpiral {
    angle_step: f32,
    radius_coefficient: f32,
    theta: f32,
}

impl ArchimedeanSpiral {
    pub fn new(angle_step: f32, radius_coefficient: f32) -> Self {
        Self {
            angle_step,
            radius_coefficient,
            theta: 0.0,
        }
    }
}

impl PointSource for ArchimedeanSpiral {
    fn reset(&mut self) {
        self.theta = 0.0;
    }

    fn next_point(&mut self) -> Point {
        let radius = self.radius_coefficient * self.theta;
        let point = Point::new(radius * self.theta.cos(), radius * self.theta.sin());
        self.theta += self.angle_step;
        point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_point_is_the_origin() {
        let mut spiral = ArchimedeanSpiral::new(0.3, 1.5);
        assert_eq!(spiral.next_point(), Point::origin());
    }

    #[test]
    fn radius_never_decreases() {
        let mut spiral = ArchimedeanSpiral::new(0.25, 2.0);
        let mut previous = 0.0_f32;
        for _ in 0..500 {
            let radius = spiral.next_point().distance_from_origin();
            assert!(radius >= previous);
            previous = radius;
        }
    }

    #[test]
    fn fresh_instances_yield_the_same_sequence() {
        let mut a = ArchimedeanSpiral::new(0.4, 1.0);
        let mut b = ArchimedeanSpiral::new(0.4, 1.0);
        for _ in 0..100 {
            assert_eq!(a.next_point(), b.next_point());
        }
    }

    #[test]
    fn reset_restarts_from_the_origin() {
        let mut spiral = ArchimedeanSpiral::new(0.4, 1.0);
        let first: Vec<Point> = (0..10).map(|_| spiral.next_point()).collect();
        spiral.reset();
        let second: Vec<Point> = (0..10).map(|_| spiral.next_point()).collect();
        assert_eq!(first, second);
    }
}
