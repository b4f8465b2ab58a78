use itertools::Itertools;
use procr_ansi_term::{Color, Style};
use std::fmt;

use crate::{
    geometry::Geometry,
    point::Point,
    segment::{Segment, SegmentKind},
    trapezoid::Trapezoid,
    vertex::Vertex,
};

pub const STYLE_TYPE_NAME: Style = Style::new().bold().fg(Color::Purple);
pub const STYLE_TYPE_ID: Style = Style::new().fg(Color::White).bold();
pub const STYLE_LABEL: Style = Style::new().fg(Color::Yellow);
pub const STYLE_ITEM: Style = Style::new().fg(Color::Cyan);

pub const COLOR_GREEN: Color = Color::Fixed(40);
pub const COLOR_BLUE: Color = Color::Fixed(27);
pub const COLOR_ORANGE: Color = Color::Fixed(208);

pub const STYLE_DIAGONAL: Style = Style::new().fg(COLOR_GREEN);
pub const STYLE_DONE: Style = Style::new().fg(COLOR_BLUE);

pub fn debug_with(
    f: impl Fn(&mut fmt::Formatter) -> fmt::Result,
) -> impl fmt::Debug {
    struct DebugWith<F>(F);

    impl<F> fmt::Debug for DebugWith<F>
    where
        F: Fn(&mut fmt::Formatter) -> fmt::Result,
    {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            self.0(f)
        }
    }

    DebugWith(f)
}

#[macro_export]
macro_rules! type_id {
    ($label:expr, $id:expr) => {
        format!(
            "{}{}",
            $crate::debug::STYLE_LABEL.paint($label),
            $crate::type_id!(@id_expr $id)
        )
    };
    ($id:expr) => {
        $crate::type_id!(@id_expr $id)
    };
    (@id_expr $id:expr) => {
        $crate::debug::STYLE_TYPE_ID
            .paint(format!("[{}]", $id.index()))
            .to_string()
    };
}

fn opt_index<T>(id: Option<id_arena::Id<T>>) -> String {
    id.map(|i| i.index().to_string())
        .unwrap_or_else(|| "_".to_string())
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("@({},{})", self.x, self.y))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl fmt::Debug for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            STYLE_LABEL.paint(format!("V{}:", self.id.index())),
            STYLE_ITEM.underline().paint(format!("{:?}", self.point))
        )?;
        write!(
            f,
            " out[{}]",
            self.out_segments()
                .iter()
                .map(|o| format!("{}->{}", o.segment.index(), o.target.index()))
                .join(",")
        )
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.kind {
            SegmentKind::Ring => STYLE_TYPE_NAME.paint("S"),
            SegmentKind::Diagonal => STYLE_DIAGONAL.bold().paint("D"),
        };
        write!(
            f,
            "{}{}({}--{}, c{}, m{}<>{})",
            name,
            type_id!(self.id),
            type_id!("f", self.from),
            type_id!("t", self.to),
            self.chain,
            self.mprev.index(),
            self.mnext.index(),
        )
    }
}

#[macro_export]
macro_rules! dbg_segment {
    ($geometry:expr, $segment:expr) => {
        $crate::debug::debug_with($crate::debug::debug_segment($geometry, $segment))
    };
}

pub fn debug_segment<'a>(
    geometry: &'a Geometry,
    segment: &'a Segment,
) -> impl Fn(&mut fmt::Formatter) -> fmt::Result + 'a {
    move |f| {
        let label = match segment.kind {
            SegmentKind::Ring => STYLE_LABEL.paint(format!("S{}", segment.id.index())),
            SegmentKind::Diagonal => {
                STYLE_DIAGONAL.paint(format!("D{}", segment.id.index()))
            }
        };
        write!(
            f,
            "{}:{}->{}",
            label,
            STYLE_ITEM.paint(format!("{:?}", geometry[segment.from].point)),
            STYLE_ITEM.paint(format!("{:?}", geometry[segment.to].point)),
        )
    }
}

#[macro_export]
macro_rules! dbg_trap {
    ($geometry:expr, $trap:expr) => {
        $crate::debug::debug_with($crate::debug::debug_trap($geometry, $trap))
    };
}

pub fn debug_trap<'a>(
    geometry: &'a Geometry,
    trap: &'a Trapezoid,
) -> impl Fn(&mut fmt::Formatter) -> fmt::Result + 'a {
    move |f| {
        let style = if trap.mono_done { STYLE_DONE } else { STYLE_LABEL };
        write!(f, "{}", style.bold().paint(format!("T{}", trap.id.index())))?;
        let y = |v: Option<crate::vertex::VertexId>| {
            v.map(|v| geometry[v].y().to_string())
                .unwrap_or_else(|| "_".to_string())
        };
        write!(
            f,
            "[y {}..{}, l{} r{}] u({},{}) d({},{})",
            y(trap.v_low),
            y(trap.v_high),
            opt_index(trap.lseg),
            opt_index(trap.rseg),
            opt_index(trap.u_l),
            opt_index(trap.u_r),
            opt_index(trap.d_l),
            opt_index(trap.d_r),
        )
    }
}

#[macro_export]
macro_rules! dbg_mono_chain {
    ($geometry:expr, $index:expr) => {
        $crate::debug::debug_with($crate::debug::debug_mono_chain($geometry, $index))
    };
}

pub fn debug_mono_chain(
    geometry: &Geometry,
    index: usize,
) -> impl Fn(&mut fmt::Formatter) -> fmt::Result + '_ {
    move |f| {
        write!(f, "{}", STYLE_LABEL.bold().paint(format!("M{}:", index)))?;
        match geometry.mono_chain_vertices(index) {
            Some(vertices) => write!(
                f,
                " [{}]",
                vertices
                    .into_iter()
                    .map(|v| {
                        STYLE_ITEM
                            .paint(format!("{:?}", geometry[v].point))
                            .to_string()
                    })
                    .join(" ")
            ),
            None => f.write_str(" <none>"),
        }
    }
}

#[macro_export]
macro_rules! info_label {
    ($label:literal) => {
        procr_ansi_term::Style::new()
            .bold()
            .fg(procr_ansi_term::Color::Yellow)
            .paint(format!("({})", $label))
    };
}

#[macro_export]
macro_rules! emit_info {
    (sty:$style:expr, msg:$msg:literal) => {
        tracing::info!("{}", $style.paint($msg));
    };
    (sty:$style:expr, fmt:$fmt:literal | $($rest:tt)+) => {
        tracing::info!("{}", $style.paint(format!($fmt, $($rest)*)));
    };
    (fmt:$fmt:literal | $($rest:tt)+) => {
        tracing::info!($fmt, $($rest)*);
    };
}
