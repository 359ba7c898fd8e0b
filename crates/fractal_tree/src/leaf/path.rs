//! Path commands, leaf outlines and vein polylines.
//!
//! Paths can be replayed into any [`PathBuilder`]; points cross that boundary as
//! [`mint::Point2`] so renderers need not depend on `glam`.

use glam::Vec2;
use mint::Point2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::tree::Bounds;

/// A single path-drawing command in screen space.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Vec2),
    CubicTo { ctrl1: Vec2, ctrl2: Vec2, to: Vec2 },
    QuadTo { ctrl: Vec2, to: Vec2 },
    Close,
}

impl PathCommand {
    /// End point of the command, `None` for [`PathCommand::Close`].
    pub fn end_point(&self) -> Option<Vec2> {
        match *self {
            PathCommand::MoveTo(p) => Some(p),
            PathCommand::CubicTo { to, .. } | PathCommand::QuadTo { to, .. } => Some(to),
            PathCommand::Close => None,
        }
    }

    pub fn is_curve(&self) -> bool {
        matches!(self, PathCommand::CubicTo { .. } | PathCommand::QuadTo { .. })
    }

    /// Applies `f` to every coordinate of the command.
    pub fn map_points(self, mut f: impl FnMut(Vec2) -> Vec2) -> Self {
        match self {
            PathCommand::MoveTo(p) => PathCommand::MoveTo(f(p)),
            PathCommand::CubicTo { ctrl1, ctrl2, to } => PathCommand::CubicTo {
                ctrl1: f(ctrl1),
                ctrl2: f(ctrl2),
                to: f(to),
            },
            PathCommand::QuadTo { ctrl, to } => PathCommand::QuadTo {
                ctrl: f(ctrl),
                to: f(to),
            },
            PathCommand::Close => PathCommand::Close,
        }
    }

    fn points(&self) -> impl Iterator<Item = Vec2> {
        let (buf, len) = match *self {
            PathCommand::MoveTo(p) => ([p, Vec2::ZERO, Vec2::ZERO], 1),
            PathCommand::CubicTo { ctrl1, ctrl2, to } => ([ctrl1, ctrl2, to], 3),
            PathCommand::QuadTo { ctrl, to } => ([ctrl, to, Vec2::ZERO], 2),
            PathCommand::Close => ([Vec2::ZERO; 3], 0),
        };
        buf.into_iter().take(len)
    }
}

/// Receiver for path commands, implemented by renderers and exporters.
pub trait PathBuilder {
    fn move_to(&mut self, to: Point2<f32>);
    fn line_to(&mut self, to: Point2<f32>);
    fn quad_to(&mut self, ctrl: Point2<f32>, to: Point2<f32>);
    fn cubic_to(&mut self, ctrl1: Point2<f32>, ctrl2: Point2<f32>, to: Point2<f32>);
    fn close(&mut self);
}

/// Closed, serrated leaf outline.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeafOutline {
    commands: Vec<PathCommand>,
}

impl LeafOutline {
    pub(crate) fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Every coordinate in emission order, control points included.
    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.commands.iter().flat_map(PathCommand::points)
    }

    pub fn first_point(&self) -> Option<Vec2> {
        self.points().next()
    }

    pub fn last_point(&self) -> Option<Vec2> {
        self.commands.iter().rev().find_map(PathCommand::end_point)
    }

    /// Number of curve commands (cubic and quadratic).
    pub fn curve_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_curve()).count()
    }

    /// True when the path ends with a close command and returns to its start.
    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
            && self.first_point() == self.last_point()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.points();
        let mut bounds = Bounds::from_point(points.next()?);
        for p in points {
            bounds.include(p);
        }
        Some(bounds)
    }

    /// Replays the outline into `builder`.
    pub fn build_into(&self, builder: &mut impl PathBuilder) {
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => builder.move_to(p.into()),
                PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                    builder.cubic_to(ctrl1.into(), ctrl2.into(), to.into())
                }
                PathCommand::QuadTo { ctrl, to } => builder.quad_to(ctrl.into(), to.into()),
                PathCommand::Close => builder.close(),
            }
        }
    }

    /// SVG path data (`d` attribute) for the outline.
    pub fn to_svg_path_data(&self) -> String {
        let mut svg = SvgPathBuilder::new();
        self.build_into(&mut svg);
        svg.into_string()
    }

    /// Approximates the outline with a polygon, sampling each curve `segments_per_curve` times.
    ///
    /// The closing edge is implicit; the returned polygon ends on the last curve end point.
    pub fn flatten(&self, segments_per_curve: usize) -> Vec<Vec2> {
        let n = segments_per_curve.max(1);
        let mut out = Vec::with_capacity(1 + self.curve_count() * n);
        let mut current = Vec2::ZERO;
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => out.push(p),
                PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                    out.extend(
                        (1..=n).map(|k| cubic_point(current, ctrl1, ctrl2, to, k as f32 / n as f32)),
                    );
                }
                PathCommand::QuadTo { ctrl, to } => {
                    out.extend((1..=n).map(|k| quad_point(current, ctrl, to, k as f32 / n as f32)));
                }
                PathCommand::Close => {}
            }
            if let Some(p) = command.end_point() {
                current = p;
            }
        }
        out
    }
}

/// An open polyline, one vein of a leaf.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vein {
    pub points: Vec<Vec2>,
}

impl Vein {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Replays the vein as a move followed by straight lines.
    pub fn build_into(&self, builder: &mut impl PathBuilder) {
        let Some((first, rest)) = self.points.split_first() else {
            return;
        };
        builder.move_to((*first).into());
        for p in rest {
            builder.line_to((*p).into());
        }
    }
}

/// Writes commands as SVG path data.
#[derive(Debug, Clone, Default)]
pub struct SvgPathBuilder {
    data: String,
}

impl SvgPathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.data
    }

    pub fn into_string(self) -> String {
        self.data
    }

    fn push(&mut self, op: char, points: &[Point2<f32>]) {
        if !self.data.is_empty() {
            self.data.push(' ');
        }
        self.data.push(op);
        for p in points {
            self.data.push_str(&format!(" {} {}", p.x, p.y));
        }
    }
}

impl PathBuilder for SvgPathBuilder {
    fn move_to(&mut self, to: Point2<f32>) {
        self.push('M', &[to]);
    }

    fn line_to(&mut self, to: Point2<f32>) {
        self.push('L', &[to]);
    }

    fn quad_to(&mut self, ctrl: Point2<f32>, to: Point2<f32>) {
        self.push('Q', &[ctrl, to]);
    }

    fn cubic_to(&mut self, ctrl1: Point2<f32>, ctrl2: Point2<f32>, to: Point2<f32>) {
        self.push('C', &[ctrl1, ctrl2, to]);
    }

    fn close(&mut self) {
        self.push('Z', &[]);
    }
}

fn quad_point(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    let mt = 1.0 - t;
    p0 * (mt * mt) + p1 * (2.0 * mt * t) + p2 * (t * t)
}

fn cubic_point(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let mt = 1.0 - t;
    p0 * (mt * mt * mt) + p1 * (3.0 * mt * mt * t) + p2 * (3.0 * mt * t * t) + p3 * (t * t * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_ish() -> LeafOutline {
        LeafOutline::from_commands(vec![
            PathCommand::MoveTo(Vec2::ZERO),
            PathCommand::QuadTo {
                ctrl: Vec2::new(1.0, 0.0),
                to: Vec2::new(1.0, 1.0),
            },
            PathCommand::CubicTo {
                ctrl1: Vec2::new(1.0, 2.0),
                ctrl2: Vec2::new(0.0, 2.0),
                to: Vec2::ZERO,
            },
            PathCommand::Close,
        ])
    }

    #[test]
    fn outline_reports_points_and_closure() {
        let outline = square_ish();
        assert_eq!(outline.points().count(), 6);
        assert_eq!(outline.curve_count(), 2);
        assert_eq!(outline.first_point(), Some(Vec2::ZERO));
        assert_eq!(outline.last_point(), Some(Vec2::ZERO));
        assert!(outline.is_closed());
    }

    #[test]
    fn empty_outline_is_not_closed() {
        let outline = LeafOutline::default();
        assert!(!outline.is_closed());
        assert!(outline.bounds().is_none());
        assert!(outline.flatten(4).is_empty());
    }

    #[test]
    fn svg_path_data_lists_commands_in_order() {
        let data = square_ish().to_svg_path_data();
        assert_eq!(data, "M 0 0 Q 1 0 1 1 C 1 2 0 2 0 0 Z");
    }

    #[test]
    fn flatten_hits_curve_end_points() {
        let polygon = square_ish().flatten(4);
        assert_eq!(polygon.len(), 1 + 2 * 4);
        assert_eq!(polygon[0], Vec2::ZERO);
        assert_eq!(polygon[4], Vec2::new(1.0, 1.0));
        assert_eq!(polygon[8], Vec2::ZERO);
        // Midpoint of the quadratic.
        assert!((polygon[2] - Vec2::new(0.75, 0.25)).length() < 1e-6);
    }

    #[test]
    fn map_points_touches_every_coordinate() {
        let moved = PathCommand::CubicTo {
            ctrl1: Vec2::ZERO,
            ctrl2: Vec2::ONE,
            to: Vec2::X,
        }
        .map_points(|p| p + Vec2::Y);
        assert_eq!(
            moved,
            PathCommand::CubicTo {
                ctrl1: Vec2::Y,
                ctrl2: Vec2::new(1.0, 2.0),
                to: Vec2::new(1.0, 1.0),
            }
        );
        assert_eq!(PathCommand::Close.map_points(|p| p * 2.0), PathCommand::Close);
    }

    #[test]
    fn vein_replays_as_lines() {
        let vein = Vein::new(vec![Vec2::ZERO, Vec2::new(0.0, -2.0), Vec2::new(1.0, -2.0)]);
        let mut svg = SvgPathBuilder::new();
        vein.build_into(&mut svg);
        assert_eq!(svg.as_str(), "M 0 0 L 0 -2 L 1 -2");

        let mut empty = SvgPathBuilder::new();
        Vein::default().build_into(&mut empty);
        assert!(empty.as_str().is_empty());
    }
}
