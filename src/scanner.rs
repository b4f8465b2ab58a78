use tracing::{debug, info, trace};

use crate::{
    active::{direction_cmp, ActiveSegments},
    dbg_trap,
    decomposer::DecompErr,
    geometry::Geometry,
    segment::{SegmentId, SegmentKind},
    trapezoid::{Side, TrapId, Trapezoidation, TrapezoidGraph},
    vertex::VertexId,
};

/// Trapezoidation by a plane sweep over the ring vertices.
///
/// Vertices are swept bottom to top in `(y, x)` order. Every vertex closes
/// the trapezoids of the gaps it touches and opens new ones above it, so
/// each trapezoid ends up bounded by the horizontal lines through two
/// vertices.
#[derive(Clone, Default)]
pub struct SweepTrapezoider {
    graph: TrapezoidGraph,
}

/// Ring segments grouped by their lower and upper endpoint.
struct Incidence {
    starting: Vec<Vec<SegmentId>>,
    ending: Vec<Vec<SegmentId>>,
}

impl Incidence {
    fn new(geometry: &Geometry) -> Self {
        let n = geometry.nb_vertices();
        let mut incidence = Self {
            starting: vec![Vec::new(); n],
            ending: vec![Vec::new(); n],
        };
        for seg in geometry
            .iter_segments()
            .filter(|s| s.kind == SegmentKind::Ring)
        {
            let (lo, hi) = seg.low_high();
            incidence.starting[lo.index()].push(seg.id);
            incidence.ending[hi.index()].push(seg.id);
        }
        incidence
    }

    fn events(&self, geometry: &Geometry) -> Vec<VertexId> {
        let mut events: Vec<VertexId> = geometry
            .iter_vertices()
            .map(|v| v.id)
            .filter(|v| {
                !self.starting[v.index()].is_empty()
                    || !self.ending[v.index()].is_empty()
            })
            .collect();
        events.sort_by(|&a, &b| geometry[a].sweep_cmp(&geometry[b]));
        events
    }
}

impl SweepTrapezoider {
    pub fn new() -> Self {
        Self::default()
    }

    fn sweep_vertex(
        &mut self,
        geometry: &Geometry,
        active: &mut ActiveSegments,
        incidence: &Incidence,
        vertex: VertexId,
    ) -> Result<(), DecompErr> {
        let ending = &incidence.ending[vertex.index()];
        let start = if ending.is_empty() {
            active.insertion_index(geometry, vertex)
        } else {
            active.ending_run(geometry, ending, vertex)?
        };

        let mut starting = incidence.starting[vertex.index()].clone();
        starting.sort_by(|&a, &b| direction_cmp(geometry, vertex, a, b));

        let closed = active.splice(start, ending.len(), &starting);
        for &trap in closed.iter().flatten() {
            self.graph[trap].v_high = Some(vertex);
        }

        for ix in start..=start + starting.len() {
            if !ActiveSegments::is_inside(ix) {
                continue;
            }
            let (Some(&lseg), Some(&rseg)) =
                (active.items().get(ix - 1), active.items().get(ix))
            else {
                return Err(DecompErr::InconsistentSweep { vertex });
            };
            let trap = self.graph.add(lseg, rseg, vertex);
            active.set_gap(ix, trap);
        }

        let first = (closed.first().copied().flatten(), active.gap(start));
        let last = (
            closed.last().copied().flatten(),
            active.gap(start + starting.len()),
        );
        if let (Some(lower), Some(upper)) = first {
            self.graph.link(lower, upper, Side::Left);
        }
        if let (Some(lower), Some(upper)) = last {
            self.graph.link(lower, upper, Side::Right);
        }
        trace!(
            "swept vertex {:?}: {} ending, {} starting, {} active",
            vertex,
            ending.len(),
            starting.len(),
            active.len()
        );
        Ok(())
    }

    fn is_sliver(&self, geometry: &Geometry, trap: TrapId) -> bool {
        let t = &self.graph[trap];
        let (Some(lo), Some(hi)) = (t.v_low, t.v_high) else {
            return false;
        };
        let flat_side = [t.lseg, t.rseg]
            .into_iter()
            .flatten()
            .any(|s| geometry[s].is_horizontal(geometry));
        geometry[lo].y() == geometry[hi].y() && flat_side
    }

    /// Link the neighbours of a zero-height trapezoid bounded by a
    /// horizontal segment straight to each other, and retire it.
    ///
    /// Only slivers with at most one neighbour above and one below are
    /// bridged; the rest stay in the graph as ordinary trapezoids.
    fn bridge_sliver(&mut self, trap: TrapId) -> bool {
        let t = self.graph[trap];
        let downs: Vec<TrapId> = t.downs().collect();
        let ups: Vec<TrapId> = t.ups().collect();
        if downs.len() > 1 || ups.len() > 1 {
            return false;
        }
        let (down, up) = (downs.first().copied(), ups.first().copied());

        if let Some(d) = down {
            let d = &mut self.graph[d];
            for slot in [&mut d.u_l, &mut d.u_r] {
                if *slot == Some(trap) {
                    *slot = up;
                }
            }
        }
        if let Some(u) = up {
            let u = &mut self.graph[u];
            for slot in [&mut u.d_l, &mut u.d_r] {
                if *slot == Some(trap) {
                    *slot = down;
                }
            }
        }

        let t = &mut self.graph[trap];
        t.u_l = None;
        t.u_r = None;
        t.d_l = None;
        t.d_r = None;
        t.degenerate = true;
        t.mono_done = true;
        true
    }

    /// Inside trapezoids see their ring run down on the left and up on the
    /// right when the ring's inside is on its left. The first trapezoid
    /// bordering a ring decides.
    fn detect_winding(&self, geometry: &mut Geometry) {
        let mut decided = vec![false; geometry.nb_poly_chains()];
        for t in self.graph.iter().filter(|t| !t.degenerate) {
            let sides = [(t.lseg, false), (t.rseg, true)];
            for (seg, upward_if_left) in sides {
                let Some(seg) = seg else { continue };
                let (chain, upward) = (geometry[seg].chain, geometry[seg].upward);
                if decided[chain] {
                    continue;
                }
                decided[chain] = true;
                if upward != upward_if_left {
                    geometry.set_poly_left_wrong(chain);
                }
            }
        }
    }
}

impl Trapezoidation for SweepTrapezoider {
    fn trapezoide_polygon(&mut self, geometry: &mut Geometry) -> Result<(), DecompErr> {
        self.graph = TrapezoidGraph::new();
        let incidence = Incidence::new(geometry);
        let events = incidence.events(geometry);
        let mut active = ActiveSegments::with_capacity(geometry.nb_segments());

        for &vertex in &events {
            self.sweep_vertex(geometry, &mut active, &incidence, vertex)?;
        }
        if !active.is_empty() {
            if let Some(&vertex) = events.last() {
                return Err(DecompErr::InconsistentSweep { vertex });
            }
        }

        let slivers: Vec<TrapId> = self
            .graph
            .ids()
            .filter(|&t| self.is_sliver(geometry, t))
            .collect();
        let mut bridged = 0;
        for trap in slivers {
            if self.bridge_sliver(trap) {
                debug!("bridged sliver {:?}", dbg_trap!(geometry, &self.graph[trap]));
                bridged += 1;
            }
        }

        self.detect_winding(geometry);
        info!(
            "trapezoidation: {} trapezoids over {} events, {} slivers bridged",
            self.graph.len(),
            events.len(),
            bridged
        );
        Ok(())
    }

    #[inline]
    fn graph(&self) -> &TrapezoidGraph {
        &self.graph
    }

    #[inline]
    fn graph_mut(&mut self) -> &mut TrapezoidGraph {
        &mut self.graph
    }
}
