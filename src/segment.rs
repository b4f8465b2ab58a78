use id_arena::Id;

use crate::{
    geometry::{GeometricId, Geometry},
    vertex::{Vertex, VertexId},
};

pub type SegmentId = Id<Segment>;
impl GeometricId for SegmentId {
    type Item = Segment;

    #[inline]
    fn get(self, geometry: &Geometry) -> &Segment {
        geometry.segment(self)
    }

    #[inline]
    fn get_mut(self, geometry: &mut Geometry) -> &mut Segment {
        geometry.segment_mut(self)
    }
}

/// Index of an input ring (polygon chain).
pub type ChainId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    /// Edge of an input ring.
    Ring,
    /// One half of a diagonal inserted by a split.
    Diagonal,
}

/// A directed segment from `from` to `to`.
///
/// `sprev`/`snext` link the input ring, `mprev`/`mnext` the monotone ring
/// the segment currently belongs to. Both pairs always describe closed
/// cycles.
#[derive(Clone, Copy)]
pub struct Segment {
    pub id: SegmentId,
    pub from: VertexId,
    pub to: VertexId,
    pub chain: ChainId,
    /// Whether `to` lies above `from` in sweep order.
    pub upward: bool,
    pub kind: SegmentKind,
    /// The opposite half of a diagonal.
    pub twin: Option<SegmentId>,
    pub(crate) sprev: SegmentId,
    pub(crate) snext: SegmentId,
    pub(crate) mprev: SegmentId,
    pub(crate) mnext: SegmentId,
}

impl Segment {
    /// A fresh segment, all of whose links point back at itself.
    pub fn new(
        id: SegmentId,
        from: VertexId,
        to: VertexId,
        chain: ChainId,
        upward: bool,
        kind: SegmentKind,
    ) -> Self {
        Self {
            id,
            from,
            to,
            chain,
            upward,
            kind,
            twin: None,
            sprev: id,
            snext: id,
            mprev: id,
            mnext: id,
        }
    }

    #[inline]
    pub fn sprev(&self) -> SegmentId {
        self.sprev
    }

    #[inline]
    pub fn snext(&self) -> SegmentId {
        self.snext
    }

    #[inline]
    pub fn mprev(&self) -> SegmentId {
        self.mprev
    }

    #[inline]
    pub fn mnext(&self) -> SegmentId {
        self.mnext
    }

    #[inline]
    pub fn is_diagonal(&self) -> bool {
        self.kind == SegmentKind::Diagonal
    }

    #[inline]
    pub fn from<'a>(&self, geometry: &'a Geometry) -> &'a Vertex {
        &geometry[self.from]
    }

    #[inline]
    pub fn to<'a>(&self, geometry: &'a Geometry) -> &'a Vertex {
        &geometry[self.to]
    }

    /// Lower and upper endpoint, in sweep order.
    #[inline]
    pub fn low_high(&self) -> (VertexId, VertexId) {
        if self.upward {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        }
    }

    /// Exact horizontality: both endpoints share a `y`.
    #[inline]
    pub fn is_horizontal(&self, geometry: &Geometry) -> bool {
        self.from(geometry).y() == self.to(geometry).y()
    }

    /// Where the monotone edge carried by this segment ends.
    ///
    /// For rings whose inside lies to the right the monotone ring runs
    /// against the input ring, so this may differ from `to`.
    #[inline]
    pub fn mono_target(&self, geometry: &Geometry) -> VertexId {
        geometry[self.mnext].from
    }
}
