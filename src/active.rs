use std::cmp::Ordering;

use crate::{
    decomposer::DecompErr,
    geometry::Geometry,
    segment::SegmentId,
    trapezoid::TrapId,
    vertex::VertexId,
};

/// Segments crossing the sweep line, left to right, with the open
/// trapezoid of each gap between them.
///
/// Gap `k` lies between `segments[k - 1]` and `segments[k]`; gap `0` and
/// gap `len` are unbounded. Odd gaps are inside the polygon.
#[derive(Clone, Debug)]
pub struct ActiveSegments {
    segments: Vec<SegmentId>,
    gaps: Vec<Option<TrapId>>,
}

impl Default for ActiveSegments {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl ActiveSegments {
    pub fn with_capacity(capacity: usize) -> Self {
        let mut gaps = Vec::with_capacity(capacity + 1);
        gaps.push(None);
        Self {
            segments: Vec::with_capacity(capacity),
            gaps,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn items(&self) -> &[SegmentId] {
        &self.segments
    }

    #[inline]
    pub fn gap(&self, ix: usize) -> Option<TrapId> {
        self.gaps.get(ix).copied().flatten()
    }

    #[inline]
    pub fn set_gap(&mut self, ix: usize, trap: TrapId) {
        self.gaps[ix] = Some(trap);
    }

    #[inline]
    pub fn is_inside(ix: usize) -> bool {
        ix % 2 == 1
    }

    /// Number of active segments passing strictly left of `vertex`.
    ///
    /// Segments through `vertex` do not count, so for a vertex with ending
    /// segments this is where their run starts.
    pub fn insertion_index(&self, geometry: &Geometry, vertex: VertexId) -> usize {
        let p = geometry[vertex].point;
        self.segments.partition_point(|&s| {
            let (lo, hi) = geometry[s].low_high();
            let (lo, hi) = (geometry[lo].point, geometry[hi].point);
            (hi - lo).cross(&(p - lo)) < 0.0
        })
    }

    /// The contiguous run `start..start + ending.len()` holding every segment
    /// of `ending`, located by bisection.
    pub fn ending_run(
        &self,
        geometry: &Geometry,
        ending: &[SegmentId],
        vertex: VertexId,
    ) -> Result<usize, DecompErr> {
        let start = self.insertion_index(geometry, vertex);
        match self.segments.get(start..start + ending.len()) {
            Some(run) if run.iter().all(|s| ending.contains(s)) => Ok(start),
            _ => Err(DecompErr::InconsistentSweep { vertex }),
        }
    }

    /// Replace `count` segments from `start` with `starting`.
    ///
    /// Returns the trapezoids of the gaps that closed, left to right. The new
    /// gaps are left empty.
    pub fn splice(
        &mut self,
        start: usize,
        count: usize,
        starting: &[SegmentId],
    ) -> Vec<Option<TrapId>> {
        self.segments
            .splice(start..start + count, starting.iter().copied());
        self.gaps
            .splice(
                start..=start + count,
                std::iter::repeat(None).take(starting.len() + 1),
            )
            .collect()
    }
}

/// Left-to-right order of segments leaving the same vertex upward.
pub fn direction_cmp(
    geometry: &Geometry,
    origin: VertexId,
    a: SegmentId,
    b: SegmentId,
) -> Ordering {
    let far = |s: SegmentId| {
        let (_, hi) = geometry[s].low_high();
        geometry[hi].point - geometry[origin].point
    };
    let cross = far(a).cross(&far(b));
    if cross > 0.0 {
        Ordering::Greater
    } else if cross < 0.0 {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}
