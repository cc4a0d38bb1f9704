use std::ops::Range;
use std::sync::Arc;

use log::{error, info, warn};

use super::thumbnail::ThumbnailPipeline;
use crate::error::RenderError;
use crate::render::{BackdropSpec, RenderedImage};
use crate::style::{StyleDescriptor, StyleId};

/// Size and backdrop every displayed thumbnail must match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryParams {
    pub edge: u32,
    pub backdrop: BackdropSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    Idle,
    Batching { next: usize },
    Complete,
}

/// Where an entry sits in the grid: one row per family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSlot {
    pub row: usize,
    pub column: usize,
}

#[derive(Debug, Clone)]
pub enum Thumbnail {
    Ready(RenderedImage),
    /// Rendering failed; the slot is kept so the grid does not shift
    Placeholder { reason: String },
}

#[derive(Debug, Clone)]
pub struct GalleryEntry {
    pub style: StyleId,
    pub slot: GridSlot,
    pub thumbnail: Thumbnail,
    /// Parameters the thumbnail was produced with
    pub params: GalleryParams,
}

#[cfg(test)]
impl GalleryEntry {
    /// Pixel edge of what is displayed, if anything is
    pub fn displayed_edge(&self) -> Option<u32> {
        match &self.thumbnail {
            Thumbnail::Ready(image) => Some(image.width()),
            Thumbnail::Placeholder { .. } => None,
        }
    }
}

/// One unit of work: a slice of the catalog under one generation
#[derive(Debug, Clone)]
pub struct BatchJob {
    generation: u64,
    range: Range<usize>,
    params: GalleryParams,
    catalog: Arc<[StyleDescriptor]>,
    slots: Arc<[GridSlot]>,
}

/// Results of a job, committed back to the loader that issued it
#[derive(Debug)]
pub struct BatchOutput {
    generation: u64,
    range: Range<usize>,
    entries: Vec<GalleryEntry>,
}

impl BatchJob {
    /// Render and composite every style in the job
    ///
    /// Per-style failures become placeholders. Only a fatal error (buffer
    /// allocation) aborts the batch.
    pub fn run(self, pipeline: &mut ThumbnailPipeline) -> Result<BatchOutput, RenderError> {
        let mut entries = Vec::with_capacity(self.range.len());

        for index in self.range.clone() {
            let style = &self.catalog[index];
            let thumbnail = match pipeline.preview(style, self.params) {
                Ok(image) => Thumbnail::Ready(image),
                Err(e) if e.is_fatal() => {
                    error!("❌ Gallery aborted at {}: {}", style.key(), e);
                    return Err(e);
                }
                Err(e) => {
                    warn!("⚠️  Skipping {}: {}", style.key(), e);
                    Thumbnail::Placeholder { reason: e.to_string() }
                }
            };

            entries.push(GalleryEntry {
                style: style.id,
                slot: self.slots[index],
                thumbnail,
                params: self.params,
            });
        }

        Ok(BatchOutput {
            generation: self.generation,
            range: self.range,
            entries,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing to do
    Idle,
    /// A batch was appended and more remain
    Progress { appended: usize, remaining: usize },
    /// The last batch was appended
    Complete { appended: usize },
}

/// Populates the gallery a bounded batch at a time
///
/// Between batches control returns to the host loop. A restart bumps the
/// generation; output from an older generation is discarded on commit,
/// never displayed.
#[derive(Debug)]
pub struct GalleryLoader {
    catalog: Arc<[StyleDescriptor]>,
    slots: Arc<[GridSlot]>,
    batch_size: usize,
    params: GalleryParams,
    generation: u64,
    state: LoaderState,
    entries: Vec<GalleryEntry>,
    batches: usize,
}

impl GalleryLoader {
    pub fn new(catalog: Arc<[StyleDescriptor]>, batch_size: usize, params: GalleryParams) -> Self {
        let slots = grid_slots(&catalog).into();
        Self {
            catalog,
            slots,
            batch_size: batch_size.max(1),
            params,
            generation: 0,
            state: LoaderState::Idle,
            entries: Vec::new(),
            batches: 0,
        }
    }

    /// Begin (or restart) population from the first style
    ///
    /// Entries from the previous run are dropped immediately.
    pub fn start(&mut self, params: GalleryParams) -> u64 {
        self.generation += 1;
        self.params = params;
        self.entries.clear();
        self.batches = 0;
        self.state = if self.catalog.is_empty() {
            LoaderState::Complete
        } else {
            LoaderState::Batching { next: 0 }
        };
        info!(
            "🖼️  Loading {} styles at {} px (run {})",
            self.catalog.len(),
            params.edge,
            self.generation
        );
        self.generation
    }

    pub fn state(&self) -> LoaderState {
        self.state
    }

    pub fn is_batching(&self) -> bool {
        matches!(self.state, LoaderState::Batching { .. })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Batches committed during the current run
    #[cfg(test)]
    pub fn batches(&self) -> usize {
        self.batches
    }

    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    /// The next slice of work, if a run is in progress
    pub fn next_job(&self) -> Option<BatchJob> {
        let LoaderState::Batching { next } = self.state else {
            return None;
        };
        let end = (next + self.batch_size).min(self.catalog.len());
        Some(BatchJob {
            generation: self.generation,
            range: next..end,
            params: self.params,
            catalog: Arc::clone(&self.catalog),
            slots: Arc::clone(&self.slots),
        })
    }

    /// Append a finished batch; `None` if it was superseded
    pub fn commit(&mut self, output: BatchOutput) -> Option<StepOutcome> {
        let LoaderState::Batching { next } = self.state else {
            return None;
        };
        if output.generation != self.generation || output.range.start != next {
            return None;
        }

        let appended = output.entries.len();
        self.entries.extend(output.entries);
        self.batches += 1;

        let remaining = self.catalog.len() - output.range.end;
        if remaining == 0 {
            self.state = LoaderState::Complete;
            info!("✅ Gallery complete: {} styles in {} batches", self.entries.len(), self.batches);
            Some(StepOutcome::Complete { appended })
        } else {
            self.state = LoaderState::Batching { next: output.range.end };
            Some(StepOutcome::Progress { appended, remaining })
        }
    }

    /// Run and commit one batch synchronously
    ///
    /// A fatal render error stops the run and leaves the loader idle.
    pub fn step(&mut self, pipeline: &mut ThumbnailPipeline) -> Result<StepOutcome, RenderError> {
        let Some(job) = self.next_job() else {
            return Ok(StepOutcome::Idle);
        };

        match job.run(pipeline) {
            Ok(output) => Ok(self.commit(output).unwrap_or(StepOutcome::Idle)),
            Err(e) => {
                self.state = LoaderState::Idle;
                Err(e)
            }
        }
    }

    /// True when every displayed entry matches `params`
    #[cfg(test)]
    pub fn is_consistent_with(&self, params: GalleryParams) -> bool {
        self.entries.iter().all(|entry| {
            entry.params == params
                && entry.displayed_edge().map_or(true, |edge| edge == params.edge)
        })
    }
}

/// Assign grid positions: a new row whenever the family changes
pub fn grid_slots(catalog: &[StyleDescriptor]) -> Vec<GridSlot> {
    let mut slots = Vec::with_capacity(catalog.len());
    let mut row = 0;
    let mut column = 0;

    for (i, style) in catalog.iter().enumerate() {
        if i > 0 {
            if style.family == catalog[i - 1].family {
                column += 1;
            } else {
                row += 1;
                column = 0;
            }
        }
        slots.push(GridSlot { row, column });
    }

    slots
}
