/// Foreground coloring for rendered modules

use crate::color::{sample_stops, Rgba};
use crate::style::FillKind;

/// Color source for one render, bound to the output edge length
#[derive(Debug, Clone, Copy)]
pub struct Fill<'a> {
    kind: FillKind,
    stops: &'a [Rgba],
    edge: f32,
}

impl<'a> Fill<'a> {
    /// `stops` must hold at least `kind.required_stops()` colors
    pub fn new(kind: FillKind, stops: &'a [Rgba], edge: u32) -> Self {
        Self {
            kind,
            stops,
            edge: edge.max(1) as f32,
        }
    }

    /// Position along the gradient axis for the center of pixel (`x`, `y`)
    pub fn position(&self, x: u32, y: u32) -> f32 {
        let cx = x as f32 + 0.5;
        let cy = y as f32 + 0.5;

        match self.kind {
            FillKind::Solid => 0.0,
            FillKind::HorizontalGradient => cx / self.edge,
            FillKind::VerticalGradient => cy / self.edge,
            FillKind::RadialGradient => {
                let half = self.edge / 2.0;
                let distance = ((cx - half).powi(2) + (cy - half).powi(2)).sqrt();
                distance / (std::f32::consts::SQRT_2 * half)
            }
        }
    }

    pub fn color_at(&self, x: u32, y: u32) -> Rgba {
        match self.kind {
            FillKind::Solid => self.stops[0],
            _ => sample_stops(self.stops, self.position(x, y)).unwrap_or(Rgba::BLACK),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::opaque(255, 0, 0);
    const BLUE: Rgba = Rgba::opaque(0, 0, 255);

    #[test]
    fn test_solid_ignores_position() {
        let fill = Fill::new(FillKind::Solid, &[RED], 100);
        assert_eq!(fill.color_at(0, 0), RED);
        assert_eq!(fill.color_at(99, 99), RED);
    }

    #[test]
    fn test_horizontal_runs_left_to_right() {
        let stops = [RED, BLUE];
        let fill = Fill::new(FillKind::HorizontalGradient, &stops, 100);
        assert!(fill.color_at(0, 50).r > 250);
        assert!(fill.color_at(99, 50).b > 250);
        assert_eq!(fill.color_at(10, 0), fill.color_at(10, 99));
    }

    #[test]
    fn test_vertical_runs_top_to_bottom() {
        let stops = [RED, BLUE];
        let fill = Fill::new(FillKind::VerticalGradient, &stops, 100);
        assert!(fill.color_at(50, 0).r > 250);
        assert!(fill.color_at(50, 99).b > 250);
        assert_eq!(fill.color_at(0, 10), fill.color_at(99, 10));
    }

    #[test]
    fn test_radial_center_and_corner() {
        let stops = [RED, BLUE];
        let fill = Fill::new(FillKind::RadialGradient, &stops, 100);
        assert!(fill.position(50, 50) < 0.02);
        assert!(fill.position(0, 0) > 0.97);
        assert_eq!(fill.color_at(10, 10), fill.color_at(89, 89));
    }
}
