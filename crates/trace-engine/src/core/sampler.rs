use glam::Vec2;

use super::stroke_path::StrokePath;

/// Default number of arc-length intervals used for projection.
pub const DEFAULT_SAMPLES: usize = 100;

/// Result of projecting a pointer sample onto a stroke path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Arc length along the path of the closest sample.
    pub distance: f32,
    /// The closest sample itself.
    pub point: Vec2,
    /// Euclidean distance from the query point to `point`.
    pub offset: f32,
}

/// Coarse nearest-point search over equally arc-length-spaced samples.
///
/// Samples are taken once per stroke so the per-move cost is a linear scan
/// over `samples + 1` points.
#[derive(Debug, Clone)]
pub struct PathSampler {
    samples: Vec<(f32, Vec2)>,
}

impl PathSampler {
    pub fn new(path: &StrokePath, samples: usize) -> Self {
        if path.is_empty() {
            return Self { samples: Vec::new() };
        }
        let n = samples.max(1);
        let length = path.length();
        let samples = (0..=n)
            .map(|i| {
                let d = length * i as f32 / n as f32;
                (d, path.point_at(d))
            })
            .collect();
        Self { samples }
    }

    /// Closest sample to `query`; ties go to the earliest along the path.
    /// Returns `None` for an empty path.
    pub fn project(&self, query: Vec2) -> Option<Projection> {
        let mut best: Option<Projection> = None;
        for &(distance, point) in &self.samples {
            let offset = point.distance(query);
            if best.map_or(true, |b| offset < b.offset) {
                best = Some(Projection { distance, point, offset });
            }
        }
        best
    }
}
