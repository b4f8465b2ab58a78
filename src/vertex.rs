use id_arena::Id;

use crate::{
    geometry::{GeometricId, Geometry},
    point::Point,
    segment::SegmentId,
};

pub type VertexId = Id<Vertex>;
impl GeometricId for VertexId {
    type Item = Vertex;

    #[inline]
    fn get(self, geometry: &Geometry) -> &Vertex {
        geometry.vertex(self)
    }

    #[inline]
    fn get_mut(self, geometry: &mut Geometry) -> &mut Vertex {
        geometry.vertex_mut(self)
    }
}

/// A monotone segment leaving a vertex, with the vertex it heads to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutSegment {
    pub target: VertexId,
    pub segment: SegmentId,
}

#[derive(Clone)]
pub struct Vertex {
    pub id: VertexId,
    pub point: Point,
    out_segments: Vec<OutSegment>,
}

impl Vertex {
    pub fn new(id: VertexId, point: Point) -> Self {
        Self {
            id,
            point,
            out_segments: Vec::new(),
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.point.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.point.y
    }

    /// Outgoing monotone segments, in the order they were recorded.
    #[inline]
    pub fn out_segments(&self) -> &[OutSegment] {
        &self.out_segments
    }

    #[inline]
    pub fn push_out_segment(&mut self, target: VertexId, segment: SegmentId) {
        self.out_segments.push(OutSegment { target, segment });
    }

    #[inline]
    pub fn clear_out_segments(&mut self) {
        self.out_segments.clear();
    }

    /// Sweep order on vertices: `(y, x)`, then creation order.
    #[inline]
    pub fn sweep_cmp(&self, other: &Vertex) -> std::cmp::Ordering {
        self.point
            .cmp_yx(&other.point)
            .then_with(|| self.id.index().cmp(&other.id.index()))
    }
}
