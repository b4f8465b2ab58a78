// Shared fixtures and checks for the integration tests.

#![allow(dead_code)]

use mono_poly_decomp::{point::signed_area2, Decomposition, Point};

pub fn ring(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

pub fn square() -> Vec<Point> {
    ring(&[(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)])
}

/// Counter-clockwise box with a doubly notched top, area 8.
pub fn crown() -> Vec<Point> {
    ring(&[
        (0.0, 0.0),
        (4.0, 0.0),
        (4.0, 3.0),
        (3.0, 1.0),
        (2.0, 3.0),
        (1.0, 1.0),
        (0.0, 3.0),
    ])
}

/// 4x4 counter-clockwise square around a clockwise diamond hole of area 2.
pub fn framed_hole() -> Vec<Vec<Point>> {
    vec![
        ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]),
        ring(&[(2.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 2.0)]),
    ]
}

/// Rectilinear fixtures, counter-clockwise.
pub fn u_shape() -> Vec<Point> {
    ring(&[
        (0.0, 0.0),
        (3.0, 0.0),
        (3.0, 3.0),
        (2.0, 3.0),
        (2.0, 1.0),
        (1.0, 1.0),
        (1.0, 3.0),
        (0.0, 3.0),
    ])
}

pub fn e_shape() -> Vec<Point> {
    ring(&[
        (0.0, 0.0),
        (3.0, 0.0),
        (3.0, 1.0),
        (1.0, 1.0),
        (1.0, 2.0),
        (3.0, 2.0),
        (3.0, 3.0),
        (1.0, 3.0),
        (1.0, 4.0),
        (3.0, 4.0),
        (3.0, 5.0),
        (0.0, 5.0),
    ])
}

pub fn h_shape() -> Vec<Point> {
    ring(&[
        (0.0, 0.0),
        (1.0, 0.0),
        (1.0, 1.0),
        (2.0, 1.0),
        (2.0, 0.0),
        (3.0, 0.0),
        (3.0, 3.0),
        (2.0, 3.0),
        (2.0, 2.0),
        (1.0, 2.0),
        (1.0, 3.0),
        (0.0, 3.0),
    ])
}

pub fn staircase() -> Vec<Point> {
    ring(&[
        (0.0, 0.0),
        (3.0, 0.0),
        (3.0, 1.0),
        (2.0, 1.0),
        (2.0, 2.0),
        (1.0, 2.0),
        (1.0, 3.0),
        (0.0, 3.0),
    ])
}

pub fn area(points: &[Point]) -> f64 {
    signed_area2(points) / 2.0
}

pub fn total_area(decomposition: &Decomposition) -> f64 {
    decomposition
        .chain_points()
        .iter()
        .map(|chain| area(chain))
        .sum()
}

/// Number of triangles the pieces would triangulate into.
pub fn triangle_count(decomposition: &Decomposition) -> usize {
    decomposition
        .chains()
        .iter()
        .map(|chain| chain.len() - 2)
        .sum()
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64, label: &str) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{}: expected ~{}, got {} (diff={})",
        label,
        expected,
        actual,
        (actual - expected).abs()
    );
}

/// Checks that a counter-clockwise ring is monotone in plain `y`: going
/// around it, `y` rises once and falls once, with any number of
/// horizontal edges in between.
pub fn assert_y_monotone(points: &[Point]) {
    let n = points.len();
    assert!(n >= 3, "piece with {} vertices", n);
    assert!(area(points) > 0.0, "piece is not counter-clockwise");

    let rising: Vec<bool> = (0..n)
        .map(|ix| points[(ix + 1) % n].y - points[ix].y)
        .filter(|&dy| dy != 0.0)
        .map(|dy| dy > 0.0)
        .collect();
    let turns = (0..rising.len())
        .filter(|&ix| rising[ix] != rising[(ix + 1) % rising.len()])
        .count();
    assert_eq!(turns, 2, "piece turns {} times in y: {:?}", turns, points);
}

fn yx_less(a: &Point, b: &Point) -> bool {
    a.cmp_yx(b) == std::cmp::Ordering::Less
}

/// Checks that a counter-clockwise ring is uni-y-monotone in `(y, x)`
/// order: both boundary paths between the lowest and highest vertex are
/// monotone, and one of them is a single edge.
pub fn assert_uni_monotone(points: &[Point]) {
    let n = points.len();
    assert!(n >= 3, "piece with {} vertices", n);
    assert!(area(points) > 0.0, "piece is not counter-clockwise");

    let lowest = (0..n)
        .min_by(|&a, &b| points[a].cmp_yx(&points[b]))
        .unwrap();
    let highest = (0..n)
        .max_by(|&a, &b| points[a].cmp_yx(&points[b]))
        .unwrap();

    let mut rising = 0;
    let mut ix = lowest;
    while ix != highest {
        let next = (ix + 1) % n;
        assert!(yx_less(&points[ix], &points[next]), "right side not rising");
        rising += 1;
        ix = next;
    }
    let mut falling = 0;
    while ix != lowest {
        let next = (ix + 1) % n;
        assert!(yx_less(&points[next], &points[ix]), "left side not falling");
        falling += 1;
        ix = next;
    }
    assert!(
        rising == 1 || falling == 1,
        "neither side is a single edge ({} / {})",
        rising,
        falling
    );
}
