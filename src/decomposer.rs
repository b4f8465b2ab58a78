use std::{error::Error, fmt::Display};

use tracing::{debug, error, info, trace, warn};

use crate::{
    config::DecompConfig,
    dbg_trap,
    debug::COLOR_ORANGE,
    emit_info,
    geometry::Geometry,
    point::Point,
    scanner::SweepTrapezoider,
    trapezoid::{Entry, TrapId, Trapezoidation},
    vertex::VertexId,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecompErr {
    /// A ring kept fewer than three vertices after cleanup.
    DegenerateInput { surviving: usize },
    /// A visited trapezoid lacks a bounding segment or vertex.
    StructuralCorruption { trapezoid: TrapId },
    /// A split endpoint has no outgoing monotone segment.
    DetachedVertex { vertex: VertexId },
    /// A split named a registry index past the end of the registry.
    UnknownMonoChain { chain: usize },
    /// Segments ending at a vertex were not neighbours on the sweep line:
    /// the rings cross or touch.
    InconsistentSweep { vertex: VertexId },
    /// The walk popped more visits than the configured limit allows.
    StepLimitExceeded { limit: usize },
}

impl Display for DecompErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for DecompErr {}

/// A pending trapezoid visit: where to go, how it is entered, and which
/// monotone chain it extends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visit {
    pub trap: TrapId,
    pub entry: Entry,
    pub chain: usize,
}

/// Result of [`Decomposer::decompose`].
#[derive(Clone)]
pub struct Decomposition {
    pub geometry: Geometry,
    pub nb_chains: usize,
}

impl Decomposition {
    /// Vertex rings of the monotone pieces, each starting at its topmost
    /// vertex.
    pub fn chains(&self) -> Vec<Vec<VertexId>> {
        (0..self.nb_chains)
            .filter_map(|ix| self.geometry.mono_chain_vertices(ix))
            .collect()
    }

    pub fn chain_points(&self) -> Vec<Vec<Point>> {
        self.chains()
            .into_iter()
            .map(|chain| chain.into_iter().map(|v| self.geometry[v].point).collect())
            .collect()
    }
}

/// Splits the rings of a [`Geometry`] into monotone chains by walking the
/// trapezoid graph produced by `T`.
pub struct Decomposer<T: Trapezoidation> {
    engine: T,
    config: DecompConfig,
    steps: usize,
}

impl Decomposer<SweepTrapezoider> {
    /// Decompose `rings` with the sweep trapezoider and default settings.
    ///
    /// Rings that degenerate during cleanup are skipped.
    pub fn decompose(rings: &[Vec<Point>]) -> Result<Decomposition, DecompErr> {
        Self::decompose_with(rings, DecompConfig::default())
    }

    pub fn decompose_with(
        rings: &[Vec<Point>],
        config: DecompConfig,
    ) -> Result<Decomposition, DecompErr> {
        let mut geometry = Geometry::new(&config);
        for (ix, ring) in rings.iter().enumerate() {
            match geometry.add_polygon_chain(ring) {
                Ok(_) => {}
                Err(DecompErr::DegenerateInput { surviving }) => {
                    warn!("ring {} dropped ({} vertices survive)", ix, surviving);
                }
                Err(e) => return Err(e),
            }
        }
        let mut decomposer = Self::new(SweepTrapezoider::new(), config);
        let nb_chains = decomposer.monotonate_trapezoids(&mut geometry)?;
        Ok(Decomposition {
            geometry,
            nb_chains,
        })
    }
}

impl<T: Trapezoidation> Decomposer<T> {
    pub fn new(engine: T, config: DecompConfig) -> Self {
        Self {
            engine,
            config,
            steps: 0,
        }
    }

    #[inline]
    pub fn engine(&self) -> &T {
        &self.engine
    }

    #[inline]
    pub fn engine_mut(&mut self) -> &mut T {
        &mut self.engine
    }

    /// Trapezoid visits made since the last call to
    /// [`Decomposer::monotonate_trapezoids`].
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Trapezoidate, then grow one monotone chain per unvisited region of
    /// the trapezoid graph, splitting as the walk demands. Returns the number
    /// of distinct monotone chains.
    pub fn monotonate_trapezoids(
        &mut self,
        geometry: &mut Geometry,
    ) -> Result<usize, DecompErr> {
        self.engine.trapezoide_polygon(geometry)?;
        geometry.init_mono_chains();
        self.steps = 0;

        while let Some(trap) = self.engine.find_first_inside() {
            let lseg = self.engine.graph()[trap]
                .lseg
                .ok_or(DecompErr::StructuralCorruption { trapezoid: trap })?;
            let chain = geometry.new_mono_chain(geometry.mono_segment_along(lseg));
            emit_info!(sty:COLOR_ORANGE, fmt:"new monotone chain {} from {:?}" |
                chain,
                dbg_trap!(geometry, &self.engine.graph()[trap])
            );
            self.split_traversal(geometry, chain, trap, None, false)?;
        }

        let nb_chains = geometry.normalize_monotone_chains();
        info!(
            "{} monotone chains after {} trapezoid visits",
            nb_chains, self.steps
        );
        Ok(nb_chains)
    }

    /// Walk the trapezoid graph from `trap` as part of monotone chain
    /// `chain`.
    ///
    /// `entry` defaults to an orientation derived from the trapezoid's
    /// neighbours. With `single_step` set the walk stops after one trapezoid
    /// and the pending visits are returned, to be continued with
    /// [`Decomposer::resume`].
    pub fn split_traversal(
        &mut self,
        geometry: &mut Geometry,
        chain: usize,
        trap: TrapId,
        entry: Option<Entry>,
        single_step: bool,
    ) -> Result<Vec<Visit>, DecompErr> {
        let entry = entry.unwrap_or_else(|| Entry::seed(&self.engine.graph()[trap]));
        self.resume(geometry, vec![Visit { trap, entry, chain }], single_step)
    }

    /// Continue a walk from pending visits; the last one is taken first.
    pub fn resume(
        &mut self,
        geometry: &mut Geometry,
        mut queue: Vec<Visit>,
        single_step: bool,
    ) -> Result<Vec<Visit>, DecompErr> {
        let limit = self.config.step_limit(self.engine.graph().len());

        while let Some(visit) = queue.pop() {
            self.steps += 1;
            if self.steps > limit {
                error!("trapezoid walk exceeded {} steps", limit);
                return Err(DecompErr::StepLimitExceeded { limit });
            }

            let trap = self.engine.graph()[visit.trap];
            if trap.mono_done {
                trace!("skipping visited trapezoid {:?}", visit.trap);
                continue;
            }
            self.engine.graph_mut()[visit.trap].mono_done = true;

            let (_, _, low, high) = trap.bounds().map_err(|e| {
                error!("cannot visit {:?}", dbg_trap!(geometry, &trap));
                e
            })?;

            let Entry { from_up, from_left } = visit.entry;
            let roles = trap.roles(visit.entry);
            let split = if roles.same_ud.is_some() || roles.across.is_some() {
                geometry.split_polygon_chain(visit.chain, low, high, from_left)?
            } else {
                visit.chain
            };
            debug!(
                "visit {:?} entry {:?} chain {} -> {}",
                dbg_trap!(geometry, &trap),
                visit.entry,
                visit.chain,
                split
            );

            if let Some(next) = roles.across {
                queue.push(Visit {
                    trap: next,
                    entry: Entry {
                        from_up,
                        from_left: !from_left,
                    },
                    chain: split,
                });
            }
            if let Some(next) = roles.same_ud {
                queue.push(Visit {
                    trap: next,
                    entry: Entry {
                        from_up: !from_up,
                        from_left: !from_left,
                    },
                    chain: split,
                });
            }
            if let Some(next) = roles.same_lr {
                queue.push(Visit {
                    trap: next,
                    entry: visit.entry,
                    chain: visit.chain,
                });
            }
            if roles.same_lr.is_none() && roles.across.is_none() {
                if let Some(next) = roles.inward {
                    queue.push(Visit {
                        trap: next,
                        entry: Entry {
                            from_up: !from_up,
                            from_left,
                        },
                        chain: visit.chain,
                    });
                }
            }

            if single_step {
                return Ok(queue);
            }
        }
        Ok(queue)
    }
}
