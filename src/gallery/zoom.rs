/// Zoom percentage to pixel size mapping
///
/// The controller clamps every request into its range before mapping, so
/// no out-of-range size can reach the renderer. Size changes are debounced:
/// a burst of zoom steps only commits the last size.

use std::time::{Duration, Instant};

use log::debug;

use super::debounce::Debouncer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomRange {
    pub min: u32,
    pub max: u32,
    pub default: u32,
    /// Increment for one zoom in / zoom out step
    pub step: u32,
    /// Edge length in pixels at 100%
    pub base_edge: u32,
}

impl ZoomRange {
    /// Style gallery thumbnails: 1% per pixel, 60 to 200 px
    pub const GALLERY: ZoomRange = ZoomRange {
        min: 60,
        max: 200,
        default: 160,
        step: 20,
        base_edge: 100,
    };

    /// Single preview: share of a canvas edge
    pub const fn preview(canvas_edge: u32) -> ZoomRange {
        ZoomRange {
            min: 50,
            max: 100,
            default: 90,
            step: 10,
            base_edge: canvas_edge,
        }
    }

    pub fn clamp(&self, percent: i64) -> u32 {
        percent.clamp(self.min as i64, self.max as i64) as u32
    }

    /// Linear map from a clamped percentage to an edge length
    pub fn edge_for(&self, percent: u32) -> u32 {
        (self.base_edge as u64 * self.clamp(percent as i64) as u64 / 100).max(1) as u32
    }
}

#[derive(Debug, Clone)]
pub struct ZoomController {
    range: ZoomRange,
    percent: u32,
    /// Edge the consumers are currently rendering at
    active_edge: u32,
    pending: Debouncer<u32>,
}

impl ZoomController {
    pub fn new(range: ZoomRange, debounce: Duration) -> Self {
        Self {
            range,
            percent: range.default,
            active_edge: range.edge_for(range.default),
            pending: Debouncer::new(debounce),
        }
    }

    pub fn percent(&self) -> u32 {
        self.percent
    }

    /// Edge currently committed to consumers
    pub fn active_edge(&self) -> u32 {
        self.active_edge
    }

    /// Set the zoom and return the pixel size it maps to
    ///
    /// A restart is scheduled only when the mapped size differs from the
    /// active one. Returning to the active size cancels a pending restart.
    pub fn set_zoom(&mut self, percent: i64, now: Instant) -> u32 {
        self.percent = self.range.clamp(percent);
        let edge = self.range.edge_for(self.percent);

        if edge == self.active_edge {
            self.pending.cancel();
        } else {
            debug!("Zoom {}% -> {} px (pending)", self.percent, edge);
            self.pending.arm(edge, now);
        }
        edge
    }

    /// Step by `steps` increments (negative zooms out)
    pub fn step(&mut self, steps: i64, now: Instant) -> u32 {
        self.set_zoom(self.percent as i64 + steps * self.range.step as i64, now)
    }

    pub fn reset(&mut self, now: Instant) -> u32 {
        self.set_zoom(self.range.default as i64, now)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_armed()
    }

    /// Commit the debounced size once quiet; `Some(edge)` means restart
    pub fn poll(&mut self, now: Instant) -> Option<u32> {
        let edge = self.pending.poll(now)?;
        if edge == self.active_edge {
            return None;
        }
        self.active_edge = edge;
        Some(edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEBOUNCE: Duration = Duration::from_millis(200);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_gallery_zoom_is_clamped() {
        let t0 = Instant::now();
        let mut zoom = ZoomController::new(ZoomRange::GALLERY, DEBOUNCE);

        assert_eq!(zoom.set_zoom(250, t0), 200);
        assert_eq!(zoom.percent(), 200);
        assert_eq!(zoom.set_zoom(10, t0), 60);
        assert_eq!(zoom.set_zoom(-40, t0), 60);
    }

    #[test]
    fn test_preview_zoom_maps_to_canvas_share() {
        let range = ZoomRange::preview(480);
        assert_eq!(range.edge_for(100), 480);
        assert_eq!(range.edge_for(50), 240);
        assert_eq!(range.edge_for(30), 240);
        assert_eq!(range.edge_for(90), 432);
    }

    #[test]
    fn test_burst_of_steps_commits_final_size_once() {
        let t0 = Instant::now();
        let mut zoom = ZoomController::new(ZoomRange::GALLERY, DEBOUNCE);
        assert_eq!(zoom.active_edge(), 160);

        zoom.step(-1, t0);
        zoom.step(-1, t0 + ms(50));
        zoom.step(-1, t0 + ms(100));
        assert_eq!(zoom.poll(t0 + ms(200)), None);
        assert_eq!(zoom.poll(t0 + ms(300)), Some(100));
        assert_eq!(zoom.poll(t0 + ms(900)), None);
        assert_eq!(zoom.active_edge(), 100);
    }

    #[test]
    fn test_returning_to_active_size_cancels_restart() {
        let t0 = Instant::now();
        let mut zoom = ZoomController::new(ZoomRange::GALLERY, DEBOUNCE);
        zoom.step(1, t0);
        zoom.step(-1, t0 + ms(20));
        assert!(!zoom.is_pending());
        assert_eq!(zoom.poll(t0 + ms(1000)), None);
    }

    #[test]
    fn test_clamped_request_at_the_bound_is_a_no_op() {
        let t0 = Instant::now();
        let mut zoom = ZoomController::new(ZoomRange::GALLERY, DEBOUNCE);
        zoom.set_zoom(200, t0);
        assert_eq!(zoom.poll(t0 + DEBOUNCE), Some(200));
        zoom.set_zoom(260, t0 + ms(300));
        assert!(!zoom.is_pending());
    }
}
