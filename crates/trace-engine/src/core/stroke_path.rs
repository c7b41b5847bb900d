//! Arc-length parameterized stroke paths.
//!
//! A [`StrokePath`] is a lyon path flattened into a polyline with cumulative
//! arc lengths, which gives the two operations tracing needs: the total
//! `length()` and `point_at(distance)` for `0 <= distance <= length`.

use glam::Vec2;
use lyon::path::iterator::PathIterator;
use lyon::path::{Path, PathEvent};

use crate::assets::path_data::{parse_path_data, PathDataError};

/// Default curve flattening tolerance in logical units.
pub const DEFAULT_FLATTEN_TOLERANCE: f32 = 0.1;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokePath {
    points: Vec<Vec2>,
    /// Cumulative arc length at each point.
    lengths: Vec<f32>,
    /// Indices into `points` where a new sub-path begins (excluding 0).
    breaks: Vec<usize>,
}

impl StrokePath {
    /// An empty path (zero length). Tracing treats it as "no stroke".
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse SVG path data and flatten it.
    pub fn parse(data: &str, tolerance: f32) -> Result<Self, PathDataError> {
        let path = parse_path_data(data)?;
        Ok(Self::from_path(&path, tolerance))
    }

    /// Flatten a lyon path. Move-to gaps between sub-paths add no length.
    pub fn from_path(path: &Path, tolerance: f32) -> Self {
        let mut out = Self::default();

        for event in path.iter().flattened(tolerance) {
            match event {
                PathEvent::Begin { at } => {
                    let at = Vec2::new(at.x, at.y);
                    if out.points.is_empty() {
                        out.push_start(at);
                    } else {
                        out.breaks.push(out.points.len());
                        let len = out.length();
                        out.points.push(at);
                        out.lengths.push(len);
                    }
                }
                PathEvent::Line { to, .. } => out.push_line(Vec2::new(to.x, to.y)),
                PathEvent::End { first, close: true, .. } => {
                    out.push_line(Vec2::new(first.x, first.y));
                }
                _ => {}
            }
        }

        out
    }

    /// Build directly from polyline points (single sub-path).
    pub fn from_points(points: &[Vec2]) -> Self {
        let mut out = Self::default();
        if let Some((&first, rest)) = points.split_first() {
            out.push_start(first);
            for &p in rest {
                out.push_line(p);
            }
        }
        out
    }

    fn push_start(&mut self, at: Vec2) {
        self.points.push(at);
        self.lengths.push(0.0);
    }

    fn push_line(&mut self, to: Vec2) {
        let Some(&last) = self.points.last() else {
            self.push_start(to);
            return;
        };
        let len = self.length() + last.distance(to);
        self.points.push(to);
        self.lengths.push(len);
    }

    /// Total arc length.
    pub fn length(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// True when the path has no traversable length.
    pub fn is_empty(&self) -> bool {
        self.length() <= 0.0
    }

    pub fn start(&self) -> Vec2 {
        self.points.first().copied().unwrap_or(Vec2::ZERO)
    }

    pub fn end(&self) -> Vec2 {
        self.points.last().copied().unwrap_or(Vec2::ZERO)
    }

    /// Flattened points, including sub-path starts.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Point at the given arc length, clamped to `[0, length]`.
    pub fn point_at(&self, distance: f32) -> Vec2 {
        if self.points.is_empty() {
            return Vec2::ZERO;
        }
        let d = distance.clamp(0.0, self.length());
        let i = self.lengths.partition_point(|&l| l < d);
        if i == 0 {
            return self.points[0];
        }
        if i >= self.points.len() {
            return self.end();
        }

        let span = self.lengths[i] - self.lengths[i - 1];
        if span <= 0.0 {
            return self.points[i];
        }
        let t = (d - self.lengths[i - 1]) / span;
        self.points[i - 1].lerp(self.points[i], t)
    }

    /// Re-sample `[from, to]` at a granularity of `length / steps`.
    ///
    /// Both range ends are always included, so a fully revealed stroke ends
    /// exactly on the path's last point.
    pub fn resample_range(&self, from: f32, to: f32, steps: usize) -> Vec<Vec2> {
        let length = self.length();
        if length <= 0.0 || steps == 0 {
            return Vec::new();
        }
        let from = from.clamp(0.0, length);
        let to = to.clamp(from, length);
        let step = length / steps as f32;

        let mut out = Vec::with_capacity(((to - from) / step) as usize + 2);
        out.push(self.point_at(from));

        let mut k = (from / step).floor() as usize + 1;
        loop {
            let d = k as f32 * step;
            if d >= to {
                break;
            }
            out.push(self.point_at(d));
            k += 1;
        }

        if to > from {
            out.push(self.point_at(to));
        }
        out
    }

    /// Re-sample from the start up to `up_to`.
    pub fn resample(&self, up_to: f32, steps: usize) -> Vec<Vec2> {
        self.resample_range(0.0, up_to, steps)
    }

    /// The flattened points split into their sub-paths.
    pub fn subpaths(&self) -> Vec<Vec<Vec2>> {
        let mut out = Vec::with_capacity(self.breaks.len() + 1);
        let mut start = 0;
        for &b in self.breaks.iter().chain(std::iter::once(&self.points.len())) {
            if b > start {
                out.push(self.points[start..b].to_vec());
            }
            start = b;
        }
        out
    }
}
