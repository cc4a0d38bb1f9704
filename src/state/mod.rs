/// State management module
///
/// This module handles the non-visual application state:
/// - What kind of data is being encoded (input.rs)
/// - Render and export settings (settings.rs)
/// - The debounced live preview of the selected style (preview.rs)

pub mod input;
pub mod preview;
pub mod settings;
