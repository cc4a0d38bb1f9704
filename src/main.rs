use iced::widget::image::Handle;
use iced::widget::{
    button, column, container, pick_list, row, scrollable, slider, text, text_input, tooltip,
    Column, Image,
};
use iced::{keyboard, time, Alignment, Element, Length, Subscription, Task, Theme};
use iced_aw::Wrap;
use log::{error, info};
use std::path::PathBuf;
use std::time::{Duration, Instant};

mod color;
mod error;
mod gallery;
mod render;
mod state;
mod style;

use color::Rgba;
use gallery::{Gallery, GridSlot, StepOutcome, Thumbnail};
use render::export;
use render::{BackdropPreset, BackdropSpec, RenderedImage};
use state::input::InputKind;
use state::preview::{build_request, LivePreview, PreviewEvent};
use state::settings::{
    ErrorCorrection, ExportFormat, GalleryConfig, RenderSettings, BORDER_RANGE, MODULE_SIZE_RANGE,
};
use style::{catalog, StyleDescriptor, StyleId};

/// Host tick while the gallery or a debouncer has work
const TICK: Duration = Duration::from_millis(16);

/// Preview pane edge at 100% zoom
const PREVIEW_CANVAS: u32 = 400;

/// Style selected at startup
const DEFAULT_STYLE: &str = "Classic Black|square";

/// A gallery thumbnail ready for the view
struct GridCell {
    style: StyleId,
    slot: GridSlot,
    edge: u32,
    handle: Option<Handle>,
    /// Why the style could not be drawn
    reason: Option<String>,
}

/// Main application state
struct Studio {
    /// Text, URL or phone number to encode
    data: String,
    input_kind: InputKind,
    settings: RenderSettings,
    style: &'static StyleDescriptor,
    preview: LivePreview,
    preview_handle: Option<Handle>,
    gallery: Gallery,
    gallery_visible: bool,
    /// Display handles for the current gallery run
    cells: Vec<GridCell>,
    cells_generation: u64,
    backdrop: BackdropPreset,
    custom_hex: String,
    custom_color: Rgba,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    DataChanged(String),
    InputKindSelected(InputKind),
    ModuleSizeChanged(u32),
    BorderChanged(u32),
    ErrorCorrectionSelected(ErrorCorrection),
    FormatSelected(ExportFormat),
    ToggleGallery,
    StyleSelected(StyleId),
    BackdropSelected(BackdropPreset),
    CustomColorChanged(String),
    GalleryZoom(i64),
    GalleryZoomReset,
    PreviewZoom(i64),
    Tick(Instant),
    Export,
    /// Background save finished
    Exported(Result<PathBuf, String>),
}

impl Studio {
    fn new() -> (Self, Task<Message>) {
        let config = GalleryConfig::default();
        let style = catalog::find_by_key(DEFAULT_STYLE).unwrap_or(&catalog::all()[0]);
        info!("🎨 QR Style Studio initialized with {} styles", catalog::all().len());

        let mut studio = Studio {
            data: "https://github.com".to_string(),
            input_kind: InputKind::default(),
            settings: RenderSettings::default(),
            style,
            preview: LivePreview::new(config.preview_debounce, PREVIEW_CANVAS),
            preview_handle: None,
            gallery: Gallery::new(&config),
            gallery_visible: false,
            cells: Vec::new(),
            cells_generation: 0,
            backdrop: BackdropPreset::Transparent,
            custom_hex: "#FFFFFF".to_string(),
            custom_color: Rgba::WHITE,
            status: "Ready".to_string(),
        };
        studio.schedule_preview();

        (studio, Task::none())
    }

    fn backdrop_spec(&self) -> BackdropSpec {
        self.backdrop.spec(self.custom_color)
    }

    fn schedule_preview(&mut self) {
        let request = build_request(&self.data, self.input_kind, self.style, &self.settings);
        self.preview.request(request, Instant::now());
    }

    fn refresh_preview(&mut self) {
        let backdrop = self.backdrop_spec();
        self.preview_handle = self.preview.composited(backdrop).map(|image| to_handle(&image));
    }

    fn apply_backdrop(&mut self) {
        self.gallery.set_backdrop(self.backdrop_spec());
        self.refresh_preview();
        self.sync_cells();
    }

    /// Mirror gallery entries into display handles
    ///
    /// Handles are only built for entries added since the last sync; a new
    /// run drops everything first.
    fn sync_cells(&mut self) {
        if self.cells_generation != self.gallery.generation() {
            self.cells.clear();
            self.cells_generation = self.gallery.generation();
        }

        let entries = self.gallery.entries();
        if entries.len() < self.cells.len() {
            self.cells.clear();
        }
        for entry in &entries[self.cells.len()..] {
            let (handle, reason) = match &entry.thumbnail {
                Thumbnail::Ready(image) => (Some(to_handle(image)), None),
                Thumbnail::Placeholder { reason } => (None, Some(reason.clone())),
            };
            self.cells.push(GridCell {
                style: entry.style,
                slot: entry.slot,
                edge: entry.params.edge,
                handle,
                reason,
            });
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::DataChanged(data) => {
                self.data = data;
                self.schedule_preview();
            }
            Message::InputKindSelected(kind) => {
                self.input_kind = kind;
                self.schedule_preview();
            }
            Message::ModuleSizeChanged(size) => {
                self.settings.module_size = size;
                self.schedule_preview();
            }
            Message::BorderChanged(border) => {
                self.settings.border = border;
                self.schedule_preview();
            }
            Message::ErrorCorrectionSelected(level) => {
                self.settings.error_correction = level;
                self.schedule_preview();
            }
            Message::FormatSelected(format) => {
                self.settings.format = format;
            }
            Message::ToggleGallery => {
                self.gallery_visible = !self.gallery_visible;
                if self.gallery_visible && self.gallery.generation() == 0 {
                    self.gallery.open();
                    self.status = self.gallery.status();
                }
            }
            Message::StyleSelected(id) => {
                if let Some(style) = self.gallery.select(id) {
                    self.style = style;
                    self.status = self.gallery.status();
                    self.schedule_preview();
                }
            }
            Message::BackdropSelected(preset) => {
                self.backdrop = preset;
                self.apply_backdrop();
            }
            Message::CustomColorChanged(hex) => {
                if let Ok(color) = Rgba::from_hex(&hex) {
                    self.custom_color = color;
                    if self.backdrop == BackdropPreset::Custom {
                        self.apply_backdrop();
                    }
                }
                self.custom_hex = hex;
            }
            Message::GalleryZoom(steps) => {
                self.gallery.zoom_step(steps, Instant::now());
            }
            Message::GalleryZoomReset => {
                self.gallery.reset_zoom(Instant::now());
            }
            Message::PreviewZoom(steps) => {
                self.preview.zoom_step(steps);
                self.refresh_preview();
            }
            Message::Tick(now) => {
                match self.preview.tick(now) {
                    PreviewEvent::Rendered => self.refresh_preview(),
                    PreviewEvent::Failed(message) => {
                        self.preview_handle = None;
                        self.status = message;
                    }
                    PreviewEvent::Waiting | PreviewEvent::Unchanged => {}
                }

                match self.gallery.tick(now) {
                    Ok(StepOutcome::Idle) => {}
                    Ok(_) => {
                        self.sync_cells();
                        self.status = self.gallery.status();
                    }
                    Err(e) => {
                        error!("❌ Gallery load failed: {}", e);
                        self.status = self.gallery.status();
                    }
                }
            }
            Message::Export => {
                if self.preview.flush() == PreviewEvent::Rendered {
                    self.refresh_preview();
                }
                let Some(image) = self.preview.image().cloned() else {
                    self.status = self
                        .preview
                        .error()
                        .map_or_else(|| "Nothing to export".to_string(), |e| e.to_string());
                    return Task::none();
                };

                self.status = "Saving...".to_string();
                return Task::perform(
                    export::save_async(
                        image,
                        self.settings.format,
                        export::flatten_color(self.backdrop_spec(), self.style),
                        export::default_export_dir(),
                    ),
                    Message::Exported,
                );
            }
            Message::Exported(result) => {
                self.status = match result {
                    Ok(path) => format!("✅ Saved to {}", path.display()),
                    Err(e) => {
                        error!("❌ Export failed: {}", e);
                        format!("Export failed: {}", e)
                    }
                };
            }
        }

        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let controls: Column<Message> = column![
            text("QR Style Studio").size(32),
            row![
                pick_list(&InputKind::ALL[..], Some(self.input_kind), Message::InputKindSelected),
                text_input("Text, URL or phone number", &self.data)
                    .on_input(Message::DataChanged)
                    .padding(8),
            ]
            .spacing(10),
            text(format!("Module size: {} px", self.settings.module_size)),
            slider(MODULE_SIZE_RANGE, self.settings.module_size, Message::ModuleSizeChanged),
            text(format!("Border: {} modules", self.settings.border)),
            slider(BORDER_RANGE, self.settings.border, Message::BorderChanged),
            row![
                pick_list(
                    &ErrorCorrection::ALL[..],
                    Some(self.settings.error_correction),
                    Message::ErrorCorrectionSelected
                ),
                pick_list(&ExportFormat::ALL[..], Some(self.settings.format), Message::FormatSelected),
            ]
            .spacing(10),
            row![
                pick_list(&BackdropPreset::ALL[..], Some(self.backdrop), Message::BackdropSelected),
                text_input("#RRGGBB", &self.custom_hex)
                    .on_input(Message::CustomColorChanged)
                    .width(Length::Fixed(100.0)),
            ]
            .spacing(10),
            text(format!("Style: {}", self.style.display_name())),
            self.preview_pane(),
            row![
                button("-").on_press(Message::PreviewZoom(-1)),
                text(format!("{}%", self.preview.zoom_percent())),
                button("+").on_press(Message::PreviewZoom(1)),
            ]
            .spacing(10)
            .align_y(Alignment::Center),
            row![
                button("Export").on_press(Message::Export).padding(10),
                button(if self.gallery_visible { "Hide Gallery" } else { "Style Gallery" })
                    .on_press(Message::ToggleGallery)
                    .padding(10),
            ]
            .spacing(10),
            text(&self.status).size(14),
        ]
        .spacing(12)
        .padding(20)
        .width(Length::Fixed(PREVIEW_CANVAS as f32 + 40.0));

        let mut layout = row![controls];
        if self.gallery_visible {
            layout = layout.push(self.gallery_pane());
        }

        container(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn preview_pane(&self) -> Element<'_, Message> {
        let edge = self.preview.display_edge() as f32;
        let content: Element<'_, Message> = match &self.preview_handle {
            Some(handle) => Image::new(handle.clone())
                .width(Length::Fixed(edge))
                .height(Length::Fixed(edge))
                .into(),
            None => text(self.preview.error().unwrap_or("Rendering...")).into(),
        };

        container(content)
            .width(Length::Fixed(PREVIEW_CANVAS as f32))
            .height(Length::Fixed(PREVIEW_CANVAS as f32))
            .center_x(Length::Fixed(PREVIEW_CANVAS as f32))
            .center_y(Length::Fixed(PREVIEW_CANVAS as f32))
            .into()
    }

    fn gallery_pane(&self) -> Element<'_, Message> {
        let toolbar = row![
            button("-").on_press(Message::GalleryZoom(-1)),
            text(format!("{}%", self.gallery.zoom_percent())),
            button("+").on_press(Message::GalleryZoom(1)),
            button("Reset").on_press(Message::GalleryZoomReset),
            text(self.gallery.status()),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let selected = self.gallery.selected().map(|s| s.id);
        let mut families: Column<Message> = column![].spacing(16);
        let mut start = 0;
        while start < self.cells.len() {
            let family_row = self.cells[start].slot.row;
            let end = self.cells[start..]
                .iter()
                .position(|cell| cell.slot.row != family_row)
                .map_or(self.cells.len(), |n| start + n);

            let title = catalog::get(self.cells[start].style)
                .map_or_else(String::new, |s| format!("{} · {}", s.family, s.category.title()));
            let thumbnails = self.cells[start..end]
                .iter()
                .map(|cell| thumbnail_button(cell, selected == Some(cell.style)))
                .collect();

            families = families.push(column![
                text(title).size(14),
                Wrap::with_elements(thumbnails).spacing(6.0_f32).line_spacing(6.0_f32),
            ]);
            start = end;
        }

        column![toolbar, scrollable(families).height(Length::Fill)]
            .spacing(12)
            .padding(20)
            .width(Length::Fill)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let keys = keyboard::on_key_press(shortcut);
        if self.gallery.is_busy() || self.preview.is_pending() {
            Subscription::batch([keys, time::every(TICK).map(Message::Tick)])
        } else {
            keys
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn thumbnail_button(cell: &GridCell, selected: bool) -> Element<'_, Message> {
    let edge = Length::Fixed(cell.edge as f32);
    let content: Element<'_, Message> = match &cell.handle {
        Some(handle) => Image::new(handle.clone()).width(edge).height(edge).into(),
        None => {
            let reason = cell.reason.as_deref().unwrap_or("Not rendered");
            let marker = container(text("!").size(24))
                .width(edge)
                .height(edge)
                .center_x(edge)
                .center_y(edge);
            tooltip(marker, text(reason).size(12), tooltip::Position::Bottom)
                .style(container::rounded_box)
                .into()
        }
    };

    let style = if selected { button::primary } else { button::text };
    button(content)
        .padding(2)
        .style(style)
        .on_press(Message::StyleSelected(cell.style))
        .into()
}

fn shortcut(key: keyboard::Key, modifiers: keyboard::Modifiers) -> Option<Message> {
    if !modifiers.command() {
        return None;
    }
    match key.as_ref() {
        keyboard::Key::Character("+") | keyboard::Key::Character("=") => Some(Message::GalleryZoom(1)),
        keyboard::Key::Character("-") => Some(Message::GalleryZoom(-1)),
        keyboard::Key::Character("0") => Some(Message::GalleryZoomReset),
        keyboard::Key::Character("s") => Some(Message::Export),
        _ => None,
    }
}

fn to_handle(image: &RenderedImage) -> Handle {
    Handle::from_rgba(image.width(), image.height(), image.as_raw().to_vec())
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    iced::application("QR Style Studio", Studio::update, Studio::view)
        .subscription(Studio::subscription)
        .theme(Studio::theme)
        .centered()
        .run_with(Studio::new)
}
