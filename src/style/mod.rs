/// Style catalog module
///
/// This module handles:
/// - The immutable style descriptor model (descriptor.rs)
/// - The compiled-in catalog of families and shape variants (catalog.rs)

pub mod catalog;
pub mod descriptor;

pub use descriptor::{FillKind, ModuleShape, StyleDescriptor, StyleId};
