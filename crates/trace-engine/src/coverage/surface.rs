use glam::Vec2;

/// Fixed-size ink mask for free writing.
///
/// Each cell is one pixel; a cell counts as inked once any stamped capsule
/// covers its center. The inked count is maintained incrementally so
/// coverage is O(1) to read.
#[derive(Debug, Clone)]
pub struct CoverageSurface {
    width: u32,
    height: u32,
    cells: Vec<bool>,
    inked: usize,
}

impl CoverageSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
            inked: 0,
        }
    }

    /// Ink every cell whose center lies within `radius` of segment `a`-`b`
    /// (a round-capped line). Returns how many cells were newly inked.
    pub fn stamp_segment(&mut self, a: Vec2, b: Vec2, radius: f32) -> usize {
        if self.cells.is_empty() || radius <= 0.0 {
            return 0;
        }

        let min = a.min(b) - Vec2::splat(radius);
        let max = a.max(b) + Vec2::splat(radius);
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(self.width);
        let y1 = (max.y.ceil().max(0.0) as u32).min(self.height);

        let ab = b - a;
        let len_sq = ab.length_squared();
        let r_sq = radius * radius;
        let mut added = 0;

        for y in y0..y1 {
            for x in x0..x1 {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let t = if len_sq > 0.0 {
                    ((center - a).dot(ab) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                if center.distance_squared(a + ab * t) > r_sq {
                    continue;
                }
                let cell = &mut self.cells[(y * self.width + x) as usize];
                if !*cell {
                    *cell = true;
                    added += 1;
                }
            }
        }

        self.inked += added;
        added
    }

    pub fn is_inked(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.cells[(y * self.width + x) as usize]
    }

    pub fn inked(&self) -> usize {
        self.inked
    }

    pub fn total(&self) -> usize {
        self.cells.len()
    }

    /// Inked fraction of the surface, 0.0 to 1.0.
    pub fn coverage(&self) -> f32 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.inked as f32 / self.cells.len() as f32
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
        self.inked = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_segment_covers_a_band() {
        let mut s = CoverageSurface::new(100, 100);
        let added = s.stamp_segment(Vec2::new(10.0, 50.0), Vec2::new(90.0, 50.0), 5.0);
        assert_eq!(added, s.inked());
        assert!(s.is_inked(50, 50));
        assert!(s.is_inked(50, 46));
        assert!(!s.is_inked(50, 40));
        // Round caps extend past the end points.
        assert!(s.is_inked(7, 50));
        assert!(!s.is_inked(3, 50));
    }

    #[test]
    fn overlapping_stamps_count_once() {
        let mut s = CoverageSurface::new(50, 50);
        let first = s.stamp_segment(Vec2::new(10.0, 10.0), Vec2::new(40.0, 10.0), 3.0);
        let again = s.stamp_segment(Vec2::new(10.0, 10.0), Vec2::new(40.0, 10.0), 3.0);
        assert!(first > 0);
        assert_eq!(again, 0);
        assert_eq!(s.inked(), first);
    }

    #[test]
    fn point_stamp_is_a_disc() {
        let mut s = CoverageSurface::new(20, 20);
        let p = Vec2::new(10.0, 10.0);
        let added = s.stamp_segment(p, p, 2.0);
        // Pixel centers within 2.0 of (10, 10): a 4x4 block.
        assert_eq!(added, 12);
    }

    #[test]
    fn stamps_are_clipped_to_the_surface() {
        let mut s = CoverageSurface::new(10, 10);
        s.stamp_segment(Vec2::new(-50.0, 5.0), Vec2::new(50.0, 5.0), 100.0);
        assert_eq!(s.inked(), s.total());
        assert_eq!(s.coverage(), 1.0);
    }

    #[test]
    fn clear_resets_count() {
        let mut s = CoverageSurface::new(10, 10);
        s.stamp_segment(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0), 1.0);
        s.clear();
        assert_eq!(s.inked(), 0);
        assert_eq!(s.coverage(), 0.0);
        assert!(!s.is_inked(5, 5));
    }
}
