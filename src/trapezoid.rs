use std::ops::{Index, IndexMut};

use id_arena::{Arena, Id};

use crate::{
    decomposer::DecompErr, geometry::Geometry, segment::SegmentId,
    vertex::VertexId,
};

pub type TrapId = Id<Trapezoid>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A region bounded left and right by segments and below and above by the
/// horizontal lines through `v_low` and `v_high`.
///
/// Up to two neighbours on each of the top and bottom edges. A single
/// upper neighbour that touches the top edge left of `v_high` sits in
/// `u_l`, one that touches it right of `v_high` in `u_r`; likewise below.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trapezoid {
    pub id: TrapId,
    pub lseg: Option<SegmentId>,
    pub rseg: Option<SegmentId>,
    pub v_low: Option<VertexId>,
    pub v_high: Option<VertexId>,
    pub mono_done: bool,
    /// Zero height and bounded by a horizontal segment. Such trapezoids are
    /// bridged over and never visited.
    pub degenerate: bool,
    pub u_l: Option<TrapId>,
    pub u_r: Option<TrapId>,
    pub d_l: Option<TrapId>,
    pub d_r: Option<TrapId>,
}

impl Trapezoid {
    pub fn new(id: TrapId) -> Self {
        Self {
            id,
            lseg: None,
            rseg: None,
            v_low: None,
            v_high: None,
            mono_done: false,
            degenerate: false,
            u_l: None,
            u_r: None,
            d_l: None,
            d_r: None,
        }
    }

    #[inline]
    pub fn ups(&self) -> impl Iterator<Item = TrapId> {
        self.u_l.into_iter().chain(self.u_r)
    }

    #[inline]
    pub fn downs(&self) -> impl Iterator<Item = TrapId> {
        self.d_l.into_iter().chain(self.d_r)
    }

    #[inline]
    pub fn is_triangle(&self) -> bool {
        self.ups().next().is_none() || self.downs().next().is_none()
    }

    /// The four neighbours as seen when entering through `entry`.
    pub fn roles(&self, entry: Entry) -> Roles {
        match (entry.from_up, entry.from_left) {
            (true, true) => Roles {
                inward: self.u_l,
                same_ud: self.u_r,
                same_lr: self.d_l,
                across: self.d_r,
            },
            (true, false) => Roles {
                inward: self.u_r,
                same_ud: self.u_l,
                same_lr: self.d_r,
                across: self.d_l,
            },
            (false, true) => Roles {
                inward: self.d_l,
                same_ud: self.d_r,
                same_lr: self.u_l,
                across: self.u_r,
            },
            (false, false) => Roles {
                inward: self.d_r,
                same_ud: self.d_l,
                same_lr: self.u_r,
                across: self.u_l,
            },
        }
    }

    /// Bounds needed to visit this trapezoid.
    pub fn bounds(
        &self,
    ) -> Result<(SegmentId, SegmentId, VertexId, VertexId), DecompErr> {
        match (self.lseg, self.rseg, self.v_low, self.v_high) {
            (Some(l), Some(r), Some(lo), Some(hi)) => Ok((l, r, lo, hi)),
            _ => Err(DecompErr::StructuralCorruption { trapezoid: self.id }),
        }
    }
}

/// Direction a trapezoid is entered from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    pub from_up: bool,
    pub from_left: bool,
}

impl Entry {
    /// Orientation for a trapezoid visited first: the first present of
    /// `u_l`, `d_l`, `u_r` decides, `(below, right)` otherwise.
    pub fn seed(trap: &Trapezoid) -> Self {
        let (from_up, from_left) = if trap.u_l.is_some() {
            (true, true)
        } else if trap.d_l.is_some() {
            (false, true)
        } else if trap.u_r.is_some() {
            (true, false)
        } else {
            (false, false)
        };
        Self { from_up, from_left }
    }
}

/// Neighbours of a trapezoid relative to the entry direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Roles {
    /// The neighbour on the entry side.
    pub inward: Option<TrapId>,
    /// Same top/bottom edge as `inward`, other side.
    pub same_ud: Option<TrapId>,
    /// Same left/right side as `inward`, other edge.
    pub same_lr: Option<TrapId>,
    /// Diagonally opposite `inward`.
    pub across: Option<TrapId>,
}

#[derive(Clone, Default)]
pub struct TrapezoidGraph {
    traps: Arena<Trapezoid>,
}

impl Index<TrapId> for TrapezoidGraph {
    type Output = Trapezoid;

    #[inline]
    fn index(&self, id: TrapId) -> &Trapezoid {
        &self.traps[id]
    }
}

impl IndexMut<TrapId> for TrapezoidGraph {
    #[inline]
    fn index_mut(&mut self, id: TrapId) -> &mut Trapezoid {
        &mut self.traps[id]
    }
}

impl TrapezoidGraph {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.traps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.traps.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trapezoid> {
        self.traps.iter().map(|(_, t)| t)
    }

    pub fn ids(&self) -> impl Iterator<Item = TrapId> + '_ {
        self.traps.iter().map(|(id, _)| id)
    }

    pub fn add(
        &mut self,
        lseg: SegmentId,
        rseg: SegmentId,
        v_low: VertexId,
    ) -> TrapId {
        self.traps.alloc_with_id(|id| Trapezoid {
            lseg: Some(lseg),
            rseg: Some(rseg),
            v_low: Some(v_low),
            ..Trapezoid::new(id)
        })
    }

    /// Make `upper` the neighbour above `lower` on `side`, and the reverse.
    pub fn link(&mut self, lower: TrapId, upper: TrapId, side: Side) {
        match side {
            Side::Left => {
                self[lower].u_l = Some(upper);
                self[upper].d_l = Some(lower);
            }
            Side::Right => {
                self[lower].u_r = Some(upper);
                self[upper].d_r = Some(lower);
            }
        }
    }

    /// First trapezoid not yet assigned to a monotone chain, preferring
    /// triangles (no neighbour above or no neighbour below).
    pub fn first_inside(&self) -> Option<TrapId> {
        self.iter()
            .find(|t| !t.mono_done && !t.degenerate && t.is_triangle())
            .or_else(|| self.iter().find(|t| !t.mono_done))
            .map(|t| t.id)
    }

    pub fn all_done(&self) -> bool {
        self.iter().all(|t| t.mono_done)
    }
}

/// A trapezoidation engine.
///
/// Implementors build the trapezoid graph of every ring held in a
/// [`Geometry`], flag rings wound with their inside on the right, and hand
/// out trapezoids not yet assigned to a monotone chain.
pub trait Trapezoidation {
    fn trapezoide_polygon(&mut self, geometry: &mut Geometry) -> Result<(), DecompErr>;

    fn graph(&self) -> &TrapezoidGraph;

    fn graph_mut(&mut self) -> &mut TrapezoidGraph;

    fn find_first_inside(&self) -> Option<TrapId> {
        self.graph().first_inside()
    }
}
