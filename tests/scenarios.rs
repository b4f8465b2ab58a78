// End-to-end decompositions of small fixtures.

mod helpers;

use helpers::{
    assert_close, assert_y_monotone, crown, e_shape, framed_hole, h_shape, ring, square,
    staircase, u_shape,
};
use mono_poly_decomp::{
    segment::{SegmentId, SegmentKind},
    DecompConfig, DecompErr, Decomposer, Point,
};

#[test]
fn square_stays_one_chain() {
    let decomposition = Decomposer::decompose(&[square()]).expect("square");
    assert_eq!(decomposition.nb_chains, 1);
    assert_close(helpers::total_area(&decomposition), 4.0, 1e-12, "square");
    assert!(decomposition
        .geometry
        .iter_segments()
        .all(|s| s.kind == SegmentKind::Ring));
}

#[test]
fn crown_splits_into_three() {
    let decomposition = Decomposer::decompose(&[crown()]).expect("crown");
    assert_eq!(decomposition.nb_chains, 3);
    assert_eq!(helpers::triangle_count(&decomposition), 5);

    let mut areas: Vec<f64> = decomposition
        .chain_points()
        .iter()
        .map(|c| helpers::area(c))
        .collect();
    areas.sort_by(f64::total_cmp);
    assert_eq!(areas, vec![2.0, 2.5, 3.5]);

    let tops: Vec<Point> = decomposition
        .chain_points()
        .iter()
        .map(|c| c[0])
        .collect();
    assert_eq!(
        tops,
        vec![Point::new(0.0, 3.0), Point::new(4.0, 3.0), Point::new(2.0, 3.0)]
    );
    for chain in decomposition.chain_points() {
        assert_y_monotone(&chain);
    }
}

#[test]
fn crown_diagonals_come_in_pairs() {
    let decomposition = Decomposer::decompose(&[crown()]).expect("crown");
    let geometry = &decomposition.geometry;
    let diagonals: Vec<_> = geometry.iter_segments().filter(|s| s.is_diagonal()).collect();
    assert_eq!(diagonals.len(), 4);
    for d in &diagonals {
        let twin = &geometry[d.twin.expect("twin")];
        assert_eq!((twin.from, twin.to), (d.to, d.from));
        assert_eq!(twin.twin, Some(d.id));
    }

    let owner = |seg: SegmentId| {
        (0..decomposition.nb_chains)
            .find(|&ix| {
                geometry
                    .mono_ring_segments(geometry.mono_chains()[ix])
                    .contains(&seg)
            })
            .expect("segment belongs to a chain")
    };
    for d in &diagonals {
        assert_ne!(owner(d.id), owner(d.twin.expect("twin")));
    }
}

#[test]
fn hole_is_stitched_to_its_frame() {
    let decomposition = Decomposer::decompose(&framed_hole()).expect("framed hole");
    assert_eq!(decomposition.nb_chains, 2);
    assert_close(helpers::total_area(&decomposition), 14.0, 1e-12, "frame");
    assert_eq!(helpers::triangle_count(&decomposition), 8);
    assert_eq!(decomposition.geometry.poly_left_flags(), vec![true, true]);
    for chain in decomposition.chain_points() {
        assert_close(helpers::area(&chain), 7.0, 1e-12, "half frame");
        assert_y_monotone(&chain);
    }
}

#[test]
fn clockwise_input_is_rewound() {
    let reversed: Vec<Point> = crown().into_iter().rev().collect();
    let decomposition = Decomposer::decompose(&[reversed]).expect("reversed crown");
    assert_eq!(decomposition.geometry.poly_left_flags(), vec![false]);
    assert_eq!(decomposition.nb_chains, 3);
    assert_close(helpers::total_area(&decomposition), 8.0, 1e-12, "reversed crown");
    for chain in decomposition.chain_points() {
        assert_y_monotone(&chain);
    }
}

#[test]
fn counter_clockwise_hole_is_flagged() {
    let mut rings = framed_hole();
    rings[1].reverse();
    let decomposition = Decomposer::decompose(&rings).expect("framed hole");
    assert_eq!(decomposition.geometry.poly_left_flags(), vec![true, false]);
    assert_close(helpers::total_area(&decomposition), 14.0, 1e-12, "frame");
    assert_eq!(helpers::triangle_count(&decomposition), 8);
}

#[test]
fn degenerate_rings_are_skipped() {
    let sliver = ring(&[(10.0, 10.0), (11.0, 10.0), (12.0, 10.0)]);
    let decomposition = Decomposer::decompose(&[sliver, square()]).expect("square");
    assert_eq!(decomposition.geometry.nb_poly_chains(), 1);
    assert_eq!(decomposition.geometry.nb_vertices(), 7);
    assert_eq!(decomposition.nb_chains, 1);
}

#[test]
fn cleanup_feeds_the_decomposition() {
    // the crown again, with a repeated corner and a midpoint on the floor
    let noisy = ring(&[
        (0.0, 0.0),
        (2.0, 0.0),
        (4.0, 0.0),
        (4.0, 0.0),
        (4.0, 3.0),
        (3.0, 1.0),
        (2.0, 3.0),
        (1.0, 1.0),
        (0.0, 3.0),
        (0.0, 0.0),
    ]);
    let decomposition = Decomposer::decompose(&[noisy]).expect("noisy crown");
    assert_eq!(decomposition.geometry.poly_chain(0).map(|c| c.len), Some(7));
    assert_eq!(decomposition.nb_chains, 3);
}

#[test]
fn crossing_rings_fail_cleanly() {
    let rings = vec![
        ring(&[(0.0, 0.0), (10.0, 0.0), (5.0, 10.0)]),
        ring(&[(4.0, 5.0), (6.0, 5.0), (5.0, 20.0)]),
    ];
    assert!(matches!(
        Decomposer::decompose(&rings),
        Err(DecompErr::InconsistentSweep { .. })
    ));
}

#[test]
fn step_limit_stops_the_walk() {
    let config = DecompConfig::default().with_max_steps(2);
    assert_eq!(
        Decomposer::decompose_with(&[crown()], config).err(),
        Some(DecompErr::StepLimitExceeded { limit: 2 })
    );
}

#[test]
fn normalization_is_stable() {
    let mut decomposition = Decomposer::decompose(&framed_hole()).expect("framed hole");
    let reps = decomposition.geometry.mono_chains().to_vec();
    assert_eq!(decomposition.geometry.normalize_monotone_chains(), 2);
    assert_eq!(decomposition.geometry.mono_chains(), &reps[..]);
}

fn check_rectilinear(points: Vec<Point>, label: &str) -> usize {
    let expected = helpers::area(&points);
    let decomposition = Decomposer::decompose(&[points]).expect(label);
    let cleaned = decomposition.geometry.poly_chain(0).map(|c| c.len).expect(label);
    assert_close(helpers::total_area(&decomposition), expected, 1e-12, label);
    assert_eq!(helpers::triangle_count(&decomposition), cleaned - 2, "{}", label);
    for chain in decomposition.chain_points() {
        assert!(chain.len() >= 3, "{}: {:?}", label, chain);
        assert_y_monotone(&chain);
    }
    decomposition.nb_chains
}

#[test]
fn rectilinear_pieces_are_y_monotone() {
    check_rectilinear(u_shape(), "u");
    check_rectilinear(h_shape(), "h");
    // horizontal edges fold into the side chains: no split is needed
    assert_eq!(check_rectilinear(e_shape(), "e"), 1);
    assert_eq!(check_rectilinear(staircase(), "staircase"), 1);
}

#[test]
fn rectilinear_shapes_turned_clockwise() {
    for (points, label) in [(u_shape(), "u"), (h_shape(), "h"), (e_shape(), "e")] {
        let reversed: Vec<Point> = points.into_iter().rev().collect();
        let decomposition = Decomposer::decompose(&[reversed]).expect(label);
        assert_eq!(decomposition.geometry.poly_left_flags(), vec![false]);
        for chain in decomposition.chain_points() {
            assert_y_monotone(&chain);
        }
    }
}

#[test]
fn negative_zero_matches_zero() {
    let coords = [
        (8.0, 0.0),
        (6.0, 4.0),
        (4.0, 6.0),
        (2.0, 7.0),
        (-0.0, 5.0),
        (-2.0, 5.0),
        (-6.0, 5.0),
        (-5.0, 0.0),
        (-3.0, -0.0),
        (-4.0, -2.0),
        (-4.0, -5.0),
        (-1.0, -5.0),
        (2.0, -8.0),
        (2.0, -4.0),
        (8.0, -5.0),
        (3.0, -0.0),
    ];
    let signed = ring(&coords);
    let unsigned: Vec<Point> = signed
        .iter()
        .map(|p| Point::new(p.x + 0.0, p.y + 0.0))
        .collect();
    let expected = helpers::area(&signed);

    let with_signs = Decomposer::decompose(&[signed]).expect("signed zeros");
    let without = Decomposer::decompose(&[unsigned]).expect("plain zeros");
    assert_eq!(with_signs.nb_chains, without.nb_chains);
    assert_eq!(with_signs.chain_points(), without.chain_points());

    let cleaned = with_signs.geometry.poly_chain(0).map(|c| c.len).expect("ring");
    assert_close(helpers::total_area(&with_signs), expected, 1e-9, "signed zeros");
    assert_eq!(helpers::triangle_count(&with_signs), cleaned - 2);
    for chain in with_signs.chain_points() {
        assert!(chain.len() >= 3, "{:?}", chain);
        assert_y_monotone(&chain);
    }
}
