/// Style gallery module
///
/// This module handles:
/// - Batched population of the thumbnail grid (loader.rs)
/// - Per-style thumbnail rendering and caching (thumbnail.rs)
/// - Zoom to thumbnail size mapping (zoom.rs)
/// - Quiet-period timers shared with the live preview (debounce.rs)
///
/// `Gallery` ties them together. The host calls `tick` from its event loop;
/// each call commits any settled zoom change and runs at most one batch.

pub mod debounce;
pub mod loader;
pub mod thumbnail;
pub mod zoom;

use std::time::Instant;

use log::info;

use crate::error::RenderError;
use crate::render::BackdropSpec;
use crate::state::settings::GalleryConfig;
use crate::style::{catalog, StyleDescriptor, StyleId};

pub use loader::{GalleryEntry, GalleryLoader, GalleryParams, GridSlot, LoaderState, StepOutcome, Thumbnail};
pub use thumbnail::ThumbnailPipeline;
pub use zoom::{ZoomController, ZoomRange};

#[derive(Debug)]
pub struct Gallery {
    loader: GalleryLoader,
    zoom: ZoomController,
    pipeline: ThumbnailPipeline,
    backdrop: BackdropSpec,
    selected: Option<StyleId>,
    failure: Option<String>,
}

impl Gallery {
    pub fn new(config: &GalleryConfig) -> Self {
        let zoom = ZoomController::new(ZoomRange::GALLERY, config.zoom_debounce);
        let backdrop = BackdropSpec::Transparent;
        let params = GalleryParams {
            edge: zoom.active_edge(),
            backdrop,
        };

        Self {
            loader: GalleryLoader::new(catalog::shared(), config.batch_size, params),
            zoom,
            pipeline: ThumbnailPipeline::new(config.sample_data.clone(), config.thumbnail_border),
            backdrop,
            selected: None,
            failure: None,
        }
    }

    /// Parameters every displayed thumbnail must match
    pub fn params(&self) -> GalleryParams {
        GalleryParams {
            edge: self.zoom.active_edge(),
            backdrop: self.backdrop,
        }
    }

    /// Start (or reload) the gallery from the first style
    pub fn open(&mut self) {
        self.failure = None;
        let params = self.params();
        self.loader.start(params);
    }

    fn is_open(&self) -> bool {
        self.loader.generation() > 0
    }

    fn restart(&mut self) {
        if self.is_open() {
            self.open();
        }
    }

    pub fn zoom_percent(&self) -> u32 {
        self.zoom.percent()
    }

    pub fn zoom_step(&mut self, steps: i64, now: Instant) -> u32 {
        self.zoom.step(steps, now)
    }

    pub fn reset_zoom(&mut self, now: Instant) -> u32 {
        self.zoom.reset(now)
    }

    /// Change the backdrop and restart right away
    ///
    /// Transparent renders stay cached, so the restart only recomposites.
    pub fn set_backdrop(&mut self, backdrop: BackdropSpec) {
        if backdrop == self.backdrop {
            return;
        }
        info!("🎨 Gallery backdrop: {:?}", backdrop);
        self.backdrop = backdrop;
        self.restart();
    }

    /// Advance the gallery by one slice of work
    ///
    /// A zoom change that has settled restarts the load at the new size
    /// before the next batch runs. Only fatal render errors are returned.
    pub fn tick(&mut self, now: Instant) -> Result<StepOutcome, RenderError> {
        if let Some(edge) = self.zoom.poll(now) {
            info!("🔍 Gallery zoom {}% ({} px)", self.zoom.percent(), edge);
            self.pipeline.retain_edge(edge);
            self.restart();
        }

        let outcome = self.loader.step(&mut self.pipeline);
        if let Err(e) = &outcome {
            self.failure = Some(e.to_string());
        }
        outcome
    }

    /// True while the host should keep ticking
    pub fn is_busy(&self) -> bool {
        self.loader.is_batching() || self.zoom.is_pending()
    }

    pub fn entries(&self) -> &[GalleryEntry] {
        self.loader.entries()
    }

    /// Identifies the current run; changes on every restart
    pub fn generation(&self) -> u64 {
        self.loader.generation()
    }

    /// Batches committed in the current run
    #[cfg(test)]
    pub fn batches(&self) -> usize {
        self.loader.batches()
    }

    #[cfg(test)]
    pub fn pipeline(&self) -> &ThumbnailPipeline {
        &self.pipeline
    }

    pub fn select(&mut self, id: StyleId) -> Option<&'static StyleDescriptor> {
        let style = catalog::get(id)?;
        self.selected = Some(id);
        Some(style)
    }

    pub fn selected(&self) -> Option<&'static StyleDescriptor> {
        self.selected.and_then(catalog::get)
    }

    /// Status line for the gallery window
    pub fn status(&self) -> String {
        if let Some(failure) = &self.failure {
            return format!("Gallery stopped: {}", failure);
        }
        match self.loader.state() {
            LoaderState::Batching { .. } => "Loading styles...".to_string(),
            LoaderState::Idle => String::new(),
            LoaderState::Complete => match self.selected() {
                Some(style) => format!("Selected: {} - {}", style.family, style.shape.label()),
                None => format!("Ready - {} style families", catalog::family_count()),
            },
        }
    }
}
