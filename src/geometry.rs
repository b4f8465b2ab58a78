use std::ops::{Index, IndexMut};

use id_arena::Arena;
use itertools::Itertools;
use tracing::{debug, info, trace, warn};

use crate::{
    clean::surviving_indices,
    config::DecompConfig,
    dbg_segment,
    decomposer::DecompErr,
    point::{signed_area2, Point},
    segment::{ChainId, Segment, SegmentId, SegmentKind},
    vertex::{Vertex, VertexId},
};

/// Handle types that index into [`Geometry`].
pub trait GeometricId: Copy {
    type Item;

    fn get(self, geometry: &Geometry) -> &Self::Item;

    fn get_mut(self, geometry: &mut Geometry) -> &mut Self::Item;
}

impl<I: GeometricId> Index<I> for Geometry {
    type Output = I::Item;

    #[inline]
    fn index(&self, id: I) -> &Self::Output {
        id.get(self)
    }
}

impl<I: GeometricId> IndexMut<I> for Geometry {
    #[inline]
    fn index_mut(&mut self, id: I) -> &mut Self::Output {
        id.get_mut(self)
    }
}

/// Bookkeeping for one input ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolygonChain {
    pub id: ChainId,
    pub inside_is_left: bool,
    pub first: SegmentId,
    pub len: usize,
}

/// Owner of every vertex, segment, input ring and monotone chain of a run.
///
/// Nothing is removed while a decomposition runs; handles stay valid for
/// the lifetime of the store.
#[derive(Clone)]
pub struct Geometry {
    vertices: Arena<Vertex>,
    segments: Arena<Segment>,
    chains: Vec<PolygonChain>,
    mono_chains: Vec<SegmentId>,
    epsilon: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new(&DecompConfig::default())
    }
}

impl Geometry {
    pub fn new(config: &DecompConfig) -> Self {
        Self {
            vertices: Arena::new(),
            segments: Arena::new(),
            chains: Vec::new(),
            mono_chains: Vec::new(),
            epsilon: config.epsilon,
        }
    }

    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id]
    }

    #[inline]
    pub fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        &mut self.vertices[id]
    }

    #[inline]
    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id]
    }

    #[inline]
    pub fn segment_mut(&mut self, id: SegmentId) -> &mut Segment {
        &mut self.segments[id]
    }

    #[inline]
    pub fn nb_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn nb_segments(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn nb_poly_chains(&self) -> usize {
        self.chains.len()
    }

    #[inline]
    pub fn poly_chain(&self, chain: ChainId) -> Option<&PolygonChain> {
        self.chains.get(chain)
    }

    pub fn poly_left_flags(&self) -> Vec<bool> {
        self.chains.iter().map(|c| c.inside_is_left).collect()
    }

    pub fn iter_vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter().map(|(_, v)| v)
    }

    pub fn iter_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().map(|(_, s)| s)
    }

    /// Representative segments of the monotone chains.
    #[inline]
    pub fn mono_chains(&self) -> &[SegmentId] {
        &self.mono_chains
    }

    fn new_vertex(&mut self, point: Point) -> VertexId {
        let point = point.canonical();
        self.vertices.alloc_with_id(|id| Vertex::new(id, point))
    }

    fn new_segment(
        &mut self,
        from: VertexId,
        to: VertexId,
        chain: ChainId,
        kind: SegmentKind,
    ) -> SegmentId {
        let upward = self[to].point.is_above(&self[from].point);
        self.segments
            .alloc_with_id(|id| Segment::new(id, from, to, chain, upward, kind))
    }

    /// Add one closed input ring.
    ///
    /// Every point becomes a vertex, but only the points surviving cleanup
    /// become part of the ring. Returns the number of ring segments built.
    pub fn add_polygon_chain(&mut self, points: &[Point]) -> Result<usize, DecompErr> {
        let ids: Vec<VertexId> = points.iter().map(|&p| self.new_vertex(p)).collect();
        let kept = surviving_indices(points, self.epsilon);
        if kept.len() < 3 {
            warn!(
                "skipping ring of {} points: {} left after cleanup",
                points.len(),
                kept.len()
            );
            return Err(DecompErr::DegenerateInput {
                surviving: kept.len(),
            });
        }

        let chain = self.chains.len();
        let segs: Vec<SegmentId> = kept
            .iter()
            .circular_tuple_windows()
            .map(|(&a, &b)| self.new_segment(ids[a], ids[b], chain, SegmentKind::Ring))
            .collect();
        for (&prev, &next) in segs.iter().circular_tuple_windows() {
            self[prev].snext = next;
            self[next].sprev = prev;
        }

        self.chains.push(PolygonChain {
            id: chain,
            inside_is_left: true,
            first: segs[0],
            len: segs.len(),
        });
        debug!("ring {} built with {} segments", chain, segs.len());
        Ok(segs.len())
    }

    /// Record that ring `chain` winds with its inside on the right.
    pub fn set_poly_left_wrong(&mut self, chain: ChainId) {
        if let Some(c) = self.chains.get_mut(chain) {
            debug!("ring {} has its inside on the right", chain);
            c.inside_is_left = false;
        }
    }

    /// Segments of the input ring through `start`, following `snext`.
    pub fn ring_segments(&self, start: SegmentId) -> Vec<SegmentId> {
        let mut segs = vec![start];
        let mut seg = self[start].snext;
        while seg != start {
            segs.push(seg);
            seg = self[seg].snext;
        }
        segs
    }

    /// Segments of the monotone ring through `start`, following `mnext`.
    pub fn mono_ring_segments(&self, start: SegmentId) -> Vec<SegmentId> {
        let mut segs = vec![start];
        let mut seg = self[start].mnext;
        while seg != start {
            segs.push(seg);
            seg = self[seg].mnext;
        }
        segs
    }

    /// Vertices of monotone chain `index`, starting at its representative.
    pub fn mono_chain_vertices(&self, index: usize) -> Option<Vec<VertexId>> {
        let start = *self.mono_chains.get(index)?;
        Some(
            self.mono_ring_segments(start)
                .into_iter()
                .map(|s| self[s].from)
                .collect(),
        )
    }

    /// Signed area of monotone chain `index`; positive once the chain winds
    /// with its inside on the left.
    pub fn mono_chain_area(&self, index: usize) -> Option<f64> {
        let points: Vec<Point> = self
            .mono_chain_vertices(index)?
            .into_iter()
            .map(|v| self[v].point)
            .collect();
        Some(signed_area2(&points) / 2.0)
    }

    /// Whether the input ring through `start` winds clockwise.
    pub fn is_clockwise(&self, start: SegmentId) -> bool {
        let points: Vec<Point> = self
            .ring_segments(start)
            .into_iter()
            .map(|s| self[self[s].from].point)
            .collect();
        signed_area2(&points) < 0.0
    }

    /// Seed the monotone links from the ring links.
    ///
    /// Rings with their inside on the right are walked backwards: the
    /// segment after `s` carries the reversed edge of `s`. Every vertex's
    /// outgoing list is rebuilt to match.
    pub fn init_mono_chains(&mut self) {
        for vertex in self.vertices.iter_mut().map(|(_, v)| v) {
            vertex.clear_out_segments();
        }
        let flags = self.poly_left_flags();
        let ring_segs: Vec<SegmentId> = self
            .segments
            .iter()
            .filter(|(_, s)| s.kind == SegmentKind::Ring)
            .map(|(id, _)| id)
            .collect();

        for &id in &ring_segs {
            let seg = &mut self[id];
            if flags[seg.chain] {
                seg.mprev = seg.sprev;
                seg.mnext = seg.snext;
            } else {
                seg.mprev = seg.snext;
                seg.mnext = seg.sprev;
            }
        }
        for &id in &ring_segs {
            let from = self[id].from;
            let target = self[id].mono_target(self);
            self[from].push_out_segment(target, id);
        }
        info!(
            "monotone links seeded for {} rings ({} segments)",
            self.chains.len(),
            ring_segs.len()
        );
    }

    /// The monotone segment that carries the edge of ring segment `seg`.
    #[inline]
    pub fn mono_segment_along(&self, seg: SegmentId) -> SegmentId {
        let s = &self[seg];
        if self.chains[s.chain].inside_is_left {
            seg
        } else {
            s.snext
        }
    }

    /// Open a new monotone chain represented by `seg`.
    pub fn new_mono_chain(&mut self, seg: SegmentId) -> usize {
        self.mono_chains.push(seg);
        self.mono_chains.len() - 1
    }

    /// Outgoing segment of `from` reached first when sweeping clockwise from
    /// the ray `from -> to`.
    ///
    /// Equal angles resolve to the most recently recorded segment.
    pub fn out_segment_next_right_of(
        &self,
        from: VertexId,
        to: VertexId,
    ) -> Result<SegmentId, DecompErr> {
        let origin = self[from].point;
        let reference = (self[to].point - origin).pseudo_angle();

        let mut best: Option<(f64, SegmentId)> = None;
        for out in self[from].out_segments() {
            let angle = (self[out.target].point - origin).pseudo_angle();
            let clockwise = (reference - angle).rem_euclid(4.0);
            match best {
                Some((b, _)) if clockwise > b => {}
                Some((b, prev)) if clockwise == b => {
                    debug!(
                        "angular tie at {:?}: {:?} replaces {:?}",
                        from,
                        dbg_segment!(self, &self[out.segment]),
                        dbg_segment!(self, &self[prev])
                    );
                    best = Some((clockwise, out.segment));
                }
                _ => best = Some((clockwise, out.segment)),
            }
        }
        best.map(|(_, seg)| seg)
            .ok_or(DecompErr::DetachedVertex { vertex: from })
    }

    fn new_diagonal(&mut self, from: VertexId, to: VertexId, chain: ChainId) -> SegmentId {
        let id = self.new_segment(from, to, chain, SegmentKind::Diagonal);
        self[from].push_out_segment(to, id);
        id
    }

    /// Cut monotone chain `chain` along the diagonal `low -- high`.
    ///
    /// `chain` keeps the half on the side given by `lies_to_left`, the other
    /// half is appended to the registry and its index returned.
    pub fn split_polygon_chain(
        &mut self,
        chain: usize,
        low: VertexId,
        high: VertexId,
        lies_to_left: bool,
    ) -> Result<usize, DecompErr> {
        if chain >= self.mono_chains.len() {
            return Err(DecompErr::UnknownMonoChain { chain });
        }
        let low_out = self.out_segment_next_right_of(low, high)?;
        let high_out = self.out_segment_next_right_of(high, low)?;
        let low_prev = self[low_out].mprev;
        let high_prev = self[high_out].mprev;
        let ring = self[low_out].chain;

        let l2h = self.new_diagonal(low, high, ring);
        let h2l = self.new_diagonal(high, low, ring);
        self[l2h].twin = Some(h2l);
        self[h2l].twin = Some(l2h);

        self[l2h].mprev = low_prev;
        self[l2h].mnext = high_out;
        self[h2l].mprev = high_prev;
        self[h2l].mnext = low_out;
        self[low_prev].mnext = l2h;
        self[high_prev].mnext = h2l;
        self[low_out].mprev = h2l;
        self[high_out].mprev = l2h;

        let (kept, split) = if lies_to_left { (l2h, h2l) } else { (h2l, l2h) };
        self.mono_chains[chain] = kept;
        let index = self.new_mono_chain(split);
        trace!(
            "split chain {} along {:?}: new chain {}",
            chain,
            dbg_segment!(self, &self[l2h]),
            index
        );
        Ok(index)
    }

    /// Reduce the registry to one representative per distinct monotone ring.
    ///
    /// The representative is the segment leaving the ring's topmost vertex.
    /// Returns the number of distinct rings.
    pub fn normalize_monotone_chains(&mut self) -> usize {
        let mut visited = vec![false; self.segments.len()];
        let mut unique = Vec::with_capacity(self.mono_chains.len());

        'chains: for &start in &self.mono_chains {
            if visited[start.index()] {
                continue;
            }
            let mut best = start;
            let mut seg = start;
            loop {
                visited[seg.index()] = true;
                if self[self[seg].from]
                    .point
                    .is_above(&self[self[best].from].point)
                {
                    best = seg;
                }
                seg = self[seg].mnext;
                if seg == start {
                    break;
                }
                if visited[seg.index()] {
                    continue 'chains;
                }
            }
            unique.push(best);
        }

        debug!(
            "normalized {} registry entries to {} monotone chains",
            self.mono_chains.len(),
            unique.len()
        );
        self.mono_chains = unique;
        self.mono_chains.len()
    }
}
