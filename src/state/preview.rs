/// Live preview of the selected style
///
/// Edits arm a debouncer instead of rendering; only the request that is
/// still pending after the quiet period gets rendered. A committed request
/// equal to the one last rendered is skipped.
///
/// The transparent render is kept as-is for export. What the preview pane
/// shows is that render scaled to the zoomed pane size and composited over
/// the chosen backdrop, so checkerboards are only ever built per zoom level.

use std::time::{Duration, Instant};

use image::imageops::{self, FilterType};
use log::{debug, warn};

use super::input::InputKind;
use super::settings::RenderSettings;
use crate::gallery::debounce::Debouncer;
use crate::gallery::ZoomRange;
use crate::render::checkerboard::preview_square;
use crate::render::{BackdropSpec, Compositor, RenderRequest, RenderedImage, Target};
use crate::style::StyleDescriptor;

/// Build the request the settings panel describes
pub fn build_request(
    raw: &str,
    kind: InputKind,
    style: &StyleDescriptor,
    settings: &RenderSettings,
) -> RenderRequest {
    let settings = settings.clamped();
    RenderRequest {
        data: kind.format_data(raw),
        style: style.clone(),
        module_size: settings.module_size,
        border: settings.border,
        error_correction: settings.error_correction,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewEvent {
    /// Nothing pending, or still inside the quiet period
    Waiting,
    /// Committed request matched the last render
    Unchanged,
    Rendered,
    /// The render failed; the message is meant for the status line
    Failed(String),
}

#[derive(Debug)]
pub struct LivePreview {
    pending: Debouncer<RenderRequest>,
    last_request: Option<RenderRequest>,
    image: Option<RenderedImage>,
    error: Option<String>,
    compositor: Compositor,
    zoom_range: ZoomRange,
    zoom: u32,
    renders: usize,
}

impl LivePreview {
    /// `canvas_edge` is the preview pane size at 100% zoom
    pub fn new(delay: Duration, canvas_edge: u32) -> Self {
        let zoom_range = ZoomRange::preview(canvas_edge);
        Self {
            pending: Debouncer::new(delay),
            last_request: None,
            image: None,
            error: None,
            compositor: Compositor::new(),
            zoom_range,
            zoom: zoom_range.default,
            renders: 0,
        }
    }

    /// Schedule `request`, restarting the quiet period
    pub fn request(&mut self, request: RenderRequest, now: Instant) {
        self.pending.arm(request, now);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_armed()
    }

    /// Render the pending request once its quiet period has elapsed
    pub fn tick(&mut self, now: Instant) -> PreviewEvent {
        match self.pending.poll(now) {
            Some(request) => self.commit(request),
            None => PreviewEvent::Waiting,
        }
    }

    /// Render whatever is pending right away (before an export)
    pub fn flush(&mut self) -> PreviewEvent {
        match self.pending.cancel() {
            Some(request) => self.commit(request),
            None => PreviewEvent::Waiting,
        }
    }

    fn commit(&mut self, request: RenderRequest) -> PreviewEvent {
        if self.last_request.as_ref() == Some(&request) {
            debug!("Preview unchanged, skipping render");
            return PreviewEvent::Unchanged;
        }

        self.renders += 1;
        let result = request.render();
        self.last_request = Some(request);

        match result {
            Ok(image) => {
                debug!("Preview render #{} at {}x{}", self.renders, image.width(), image.height());
                self.image = Some(image);
                self.error = None;
                PreviewEvent::Rendered
            }
            Err(e) => {
                warn!("⚠️  Preview failed: {}", e);
                let message = e.to_string();
                self.image = None;
                self.error = Some(message.clone());
                PreviewEvent::Failed(message)
            }
        }
    }

    /// The untouched transparent render, for export
    pub fn image(&self) -> Option<&RenderedImage> {
        self.image.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[cfg(test)]
    pub fn last_request(&self) -> Option<&RenderRequest> {
        self.last_request.as_ref()
    }

    /// Render calls made so far
    #[cfg(test)]
    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// The render at the pane's zoomed size over `backdrop`
    pub fn composited(&mut self, backdrop: BackdropSpec) -> Option<RenderedImage> {
        let image = self.image.as_ref()?;
        let edge = self.display_edge();
        let scaled = if image.width() == edge && image.height() == edge {
            image.clone()
        } else {
            RenderedImage::new(imageops::resize(image.pixels(), edge, edge, FilterType::Lanczos3))
        };

        let target = Target::Preview { square: preview_square(edge) };
        Some(self.compositor.composite(&scaled, backdrop, target))
    }

    pub fn zoom_percent(&self) -> u32 {
        self.zoom
    }

    /// Set the preview zoom and return the display edge in pixels
    pub fn set_zoom(&mut self, percent: i64) -> u32 {
        self.zoom = self.zoom_range.clamp(percent);
        self.display_edge()
    }

    pub fn zoom_step(&mut self, steps: i64) -> u32 {
        self.set_zoom(self.zoom as i64 + steps * self.zoom_range.step as i64)
    }

    pub fn display_edge(&self) -> u32 {
        self.zoom_range.edge_for(self.zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::style::{catalog, ModuleShape};

    const DELAY: Duration = Duration::from_millis(250);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn request(data: &str) -> RenderRequest {
        let style = catalog::find("Classic Black", ModuleShape::Square).unwrap();
        build_request(data, InputKind::Url, style, &RenderSettings::default())
    }

    #[test]
    fn test_typing_burst_renders_once() {
        let t0 = Instant::now();
        let mut preview = LivePreview::new(DELAY, 480);

        let typed = "https://github.com";
        for (i, at) in (0..typed.len()).zip((0..).step_by(12)) {
            preview.request(request(&typed[..=i]), t0 + ms(at));
            assert_eq!(preview.tick(t0 + ms(at)), PreviewEvent::Waiting);
        }
        assert_eq!(preview.render_count(), 0);

        let last = t0 + ms(12 * (typed.len() as u64 - 1));
        assert_eq!(preview.tick(last + DELAY), PreviewEvent::Rendered);
        assert_eq!(preview.tick(last + ms(1000)), PreviewEvent::Waiting);
        assert_eq!(preview.render_count(), 1);
        assert_eq!(preview.last_request().unwrap().data, typed);
    }

    #[test]
    fn test_edit_after_pause_renders_again() {
        let t0 = Instant::now();
        let mut preview = LivePreview::new(DELAY, 480);

        preview.request(request("first"), t0);
        assert_eq!(preview.tick(t0 + ms(300)), PreviewEvent::Rendered);
        preview.request(request("second"), t0 + ms(400));
        assert_eq!(preview.tick(t0 + ms(700)), PreviewEvent::Rendered);
        assert_eq!(preview.render_count(), 2);
    }

    #[test]
    fn test_identical_request_is_not_rerendered() {
        let t0 = Instant::now();
        let mut preview = LivePreview::new(DELAY, 480);

        preview.request(request("same"), t0);
        preview.tick(t0 + ms(300));
        let first = preview.image().unwrap().clone();

        // Typed a character then deleted it
        preview.request(request("samex"), t0 + ms(400));
        preview.request(request("same"), t0 + ms(450));
        assert_eq!(preview.tick(t0 + ms(800)), PreviewEvent::Unchanged);
        assert_eq!(preview.render_count(), 1);
        assert!(preview.image().unwrap().same_buffer(&first));
    }

    #[test_log::test]
    fn test_empty_data_is_surfaced() {
        let t0 = Instant::now();
        let mut preview = LivePreview::new(DELAY, 480);

        preview.request(request(""), t0);
        let event = preview.tick(t0 + DELAY);
        assert!(matches!(event, PreviewEvent::Failed(_)));
        assert!(preview.image().is_none());
        assert!(preview.error().is_some());

        preview.request(request("ok"), t0 + ms(500));
        assert_eq!(preview.flush(), PreviewEvent::Rendered);
        assert!(preview.error().is_none());
    }

    #[test]
    fn test_composite_keeps_export_image_transparent() {
        let t0 = Instant::now();
        let mut preview = LivePreview::new(DELAY, 480);
        let style = catalog::find("Transparent Red", ModuleShape::Circle).unwrap();
        preview.request(build_request("hello", InputKind::Text, style, &RenderSettings::default()), t0);
        preview.flush();

        let shown = preview.composited(BackdropSpec::CustomColor(Rgba::opaque(10, 200, 30))).unwrap();
        assert!(!shown.has_transparency());
        assert!(preview.image().unwrap().has_transparency());
    }

    #[test]
    fn test_pane_checkerboard_only_depends_on_zoom() {
        let t0 = Instant::now();
        let mut preview = LivePreview::new(DELAY, 400);
        let style = catalog::find("Transparent Black", ModuleShape::Rounded).unwrap();

        for module_size in (5..=25).step_by(5) {
            for border in [0, 4, 10] {
                let settings = RenderSettings { module_size, border, ..Default::default() };
                preview.request(build_request("https://github.com", InputKind::Url, style, &settings), t0);
                assert_eq!(preview.flush(), PreviewEvent::Rendered);

                let shown = preview.composited(BackdropSpec::Transparent).unwrap();
                assert_eq!((shown.width(), shown.height()), (360, 360));
                assert_eq!(preview.image().unwrap().width() % module_size, 0);
            }
        }
        assert_eq!(preview.compositor.checkerboards().len(), 1);
        assert_eq!(preview.compositor.checkerboards().builds(), 1);

        preview.zoom_step(-1);
        preview.composited(BackdropSpec::Transparent).unwrap();
        assert_eq!(preview.compositor.checkerboards().len(), 2);
    }

    #[test]
    fn test_phone_entry_is_encoded_as_tel_uri() {
        let style = catalog::find("Classic Black", ModuleShape::Square).unwrap();
        let request = build_request("(555) 123-4567", InputKind::Phone, style, &RenderSettings::default());
        assert_eq!(request.data, "tel:+5551234567");
    }

    #[test]
    fn test_preview_zoom_range() {
        let mut preview = LivePreview::new(DELAY, 400);
        assert_eq!(preview.display_edge(), 360);
        assert_eq!(preview.set_zoom(30), 200);
        assert_eq!(preview.zoom_step(10), 400);
        assert_eq!(preview.zoom_percent(), 100);
    }
}
