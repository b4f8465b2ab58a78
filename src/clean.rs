//! Ring cleanup ahead of segment construction.

use tracing::trace;

use crate::point::Point;

/// `b` lies on the line through `a` and `c`, between them.
///
/// Betweenness is checked along x when `a` and `c` share a row, along y
/// otherwise, so a spike that doubles back on itself is not collapsed.
fn collinear_between(a: &Point, b: &Point, c: &Point, epsilon: f64) -> bool {
    if (*b - *a).cross(&(*c - *a)).abs() > epsilon {
        return false;
    }
    let within = |lo: f64, mid: f64, hi: f64| {
        lo.min(hi) - epsilon <= mid && mid <= lo.max(hi) + epsilon
    };
    if (a.y - c.y).abs() <= epsilon {
        within(a.x, b.x, c.x)
    } else {
        within(a.y, b.y, c.y)
    }
}

/// Indices into `points` of the vertices that survive cleanup, in ring
/// order.
///
/// Consecutive near-duplicates are dropped and the middle point of each
/// collinear run of three is removed, wrap-around included.
pub fn surviving_indices(points: &[Point], epsilon: f64) -> Vec<usize> {
    let mut kept: Vec<usize> = Vec::with_capacity(points.len());

    for (ix, p) in points.iter().enumerate() {
        if let Some(&last) = kept.last() {
            if points[last].near(p, epsilon) {
                trace!("dropping duplicate point {} of ring", ix);
                continue;
            }
        }
        if let [.., a, b] = kept[..] {
            if collinear_between(&points[a], &points[b], p, epsilon) {
                trace!("dropping collinear point {} of ring", b);
                kept.pop();
            }
        }
        kept.push(ix);
    }

    if kept.len() >= 2 && points[kept[0]].near(&points[kept[kept.len() - 1]], epsilon) {
        kept.pop();
    }
    if let [first, .., before_last, last] = kept[..] {
        if collinear_between(&points[before_last], &points[last], &points[first], epsilon) {
            kept.pop();
        }
    }
    if let [first, second, .., last] = kept[..] {
        if collinear_between(&points[last], &points[first], &points[second], epsilon) {
            kept.remove(0);
        }
    }

    kept
}
