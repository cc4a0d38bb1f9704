/// Per-module masks
///
/// Each module shape is described in normalized cell coordinates
/// (`u`, `v` in `0.0..1.0`) and rasterized once per render into a coverage
/// table for the requested module size.

use crate::style::ModuleShape;

/// Corner radius of rounded modules, as a fraction of the cell
pub const ROUNDED_RADIUS: f32 = 0.3;

/// Inset on every side of gapped modules
pub const GAP_MARGIN: f32 = 0.1;

/// Thickness of the collapsed axis for bar modules
pub const BAR_THICKNESS: f32 = 0.8;

/// Samples per axis when estimating pixel coverage
const SUPERSAMPLE: u32 = 4;

/// Whether a normalized point lies inside the shape
pub fn contains(shape: ModuleShape, u: f32, v: f32) -> bool {
    match shape {
        ModuleShape::Square => (0.0..1.0).contains(&u) && (0.0..1.0).contains(&v),
        ModuleShape::Rounded => {
            let inner = 0.5 - ROUNDED_RADIUS;
            let dx = ((u - 0.5).abs() - inner).max(0.0);
            let dy = ((v - 0.5).abs() - inner).max(0.0);
            (u - 0.5).abs() <= 0.5
                && (v - 0.5).abs() <= 0.5
                && dx * dx + dy * dy <= ROUNDED_RADIUS * ROUNDED_RADIUS
        }
        ModuleShape::Circle => {
            let (dx, dy) = (u - 0.5, v - 0.5);
            dx * dx + dy * dy <= 0.25
        }
        ModuleShape::Gapped => {
            let span = GAP_MARGIN..=(1.0 - GAP_MARGIN);
            span.contains(&u) && span.contains(&v)
        }
        ModuleShape::VBar => (u - 0.5).abs() <= BAR_THICKNESS / 2.0 && (0.0..1.0).contains(&v),
        ModuleShape::HBar => (v - 0.5).abs() <= BAR_THICKNESS / 2.0 && (0.0..1.0).contains(&u),
    }
}

/// Coverage table for one module cell of `size` x `size` pixels
#[derive(Debug, Clone)]
pub struct CellMask {
    size: u32,
    coverage: Vec<f32>,
}

impl CellMask {
    pub fn new(shape: ModuleShape, size: u32) -> Self {
        let mut coverage = Vec::with_capacity((size * size) as usize);

        for py in 0..size {
            for px in 0..size {
                coverage.push(if shape == ModuleShape::Square {
                    1.0
                } else {
                    pixel_coverage(shape, size, px, py)
                });
            }
        }

        Self { size, coverage }
    }

    /// Fraction of pixel (`px`, `py`) inside the shape, `0.0..=1.0`
    pub fn coverage(&self, px: u32, py: u32) -> f32 {
        self.coverage[(py * self.size + px) as usize]
    }
}

fn pixel_coverage(shape: ModuleShape, size: u32, px: u32, py: u32) -> f32 {
    let step = 1.0 / (SUPERSAMPLE as f32 * size as f32);
    let mut hits = 0u32;

    for sy in 0..SUPERSAMPLE {
        for sx in 0..SUPERSAMPLE {
            let u = (px * SUPERSAMPLE + sx) as f32 * step + step / 2.0;
            let v = (py * SUPERSAMPLE + sy) as f32 * step + step / 2.0;
            if contains(shape, u, v) {
                hits += 1;
            }
        }
    }

    hits as f32 / (SUPERSAMPLE * SUPERSAMPLE) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_fills_cell() {
        let mask = CellMask::new(ModuleShape::Square, 6);
        assert!((0..6).all(|y| (0..6).all(|x| mask.coverage(x, y) == 1.0)));
    }

    #[test]
    fn test_circle_clears_corners() {
        let mask = CellMask::new(ModuleShape::Circle, 20);
        assert_eq!(mask.coverage(0, 0), 0.0);
        assert_eq!(mask.coverage(19, 19), 0.0);
        assert_eq!(mask.coverage(10, 10), 1.0);
    }

    #[test]
    fn test_rounded_keeps_edges_but_trims_corners() {
        let mask = CellMask::new(ModuleShape::Rounded, 20);
        assert_eq!(mask.coverage(10, 0), 1.0);
        assert_eq!(mask.coverage(0, 10), 1.0);
        assert!(mask.coverage(0, 0) < 0.5);
    }

    #[test]
    fn test_gapped_leaves_margin() {
        let mask = CellMask::new(ModuleShape::Gapped, 20);
        assert_eq!(mask.coverage(0, 10), 0.0);
        assert_eq!(mask.coverage(10, 19), 0.0);
        assert_eq!(mask.coverage(10, 10), 1.0);
    }

    #[test]
    fn test_bars_run_along_one_axis() {
        let v = CellMask::new(ModuleShape::VBar, 20);
        assert_eq!(v.coverage(10, 0), 1.0);
        assert_eq!(v.coverage(10, 19), 1.0);
        assert_eq!(v.coverage(0, 10), 0.0);

        let h = CellMask::new(ModuleShape::HBar, 20);
        assert_eq!(h.coverage(0, 10), 1.0);
        assert_eq!(h.coverage(10, 0), 0.0);
    }
}
