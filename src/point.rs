use std::cmp::Ordering;
use std::ops::Sub;

#[derive(Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The same point with `-0.0` coordinates replaced by `0.0`.
    #[inline]
    pub fn canonical(&self) -> Self {
        Self::new(self.x + 0.0, self.y + 0.0)
    }

    /// Sweep order: by `y`, then by `x`.
    ///
    /// Equal-`y` points are ordered left to right, which makes horizontal
    /// segments behave as if they were rising very slightly. Signed zeros
    /// compare equal, as they do under `==`.
    #[inline]
    pub fn cmp_yx(&self, other: &Point) -> Ordering {
        let (a, b) = (self.canonical(), other.canonical());
        match a.y.total_cmp(&b.y) {
            Ordering::Equal => a.x.total_cmp(&b.x),
            o => o,
        }
    }

    #[inline]
    pub fn is_above(&self, other: &Point) -> bool {
        self.cmp_yx(other) == Ordering::Greater
    }

    /// z-component of the cross product of `self` and `other`, seen as
    /// vectors.
    #[inline]
    pub fn cross(&self, other: &Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn near(&self, other: &Point, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }

    /// Monotone stand-in for the angle of a vector, in `[0, 4)`, increasing
    /// counter-clockwise from the positive x axis. One unit per quadrant.
    pub fn pseudo_angle(&self) -> f64 {
        let Point { x, y } = *self;
        if x == 0.0 && y == 0.0 {
            return 0.0;
        }
        match (x >= 0.0, y >= 0.0) {
            (true, true) => y / (x + y),
            (false, true) => 1.0 + (-x) / (-x + y),
            (false, false) => 2.0 + (-y) / (-x - y),
            (true, false) => 3.0 + x / (x - y),
        }
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Twice the signed area enclosed by `points`, positive when they wind
/// counter-clockwise.
pub fn signed_area2(points: &[Point]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.cross(b))
        .sum()
}
