//! The compiled-in style catalog
//!
//! 98 color families, each instantiated with a family specific list of
//! module shapes, for 344 styles in total. The catalog is built lazily on
//! first access and is read-only for the rest of the process.

use std::sync::Arc;

use log::warn;
use once_cell::sync::Lazy;

use super::descriptor::{Category, FillKind, ModuleShape, StyleDescriptor, StyleId};
use crate::color::Rgba;

/// Declarative family entry as written in the table below
#[derive(Debug, Clone, Copy)]
pub struct FamilySpec {
    pub name: &'static str,
    pub category: Category,
    pub fill: FillKind,
    pub stops: &'static [&'static str],
    pub background: Option<&'static str>,
    pub shapes: &'static [ModuleShape],
}

const fn family(
    name: &'static str,
    category: Category,
    fill: FillKind,
    stops: &'static [&'static str],
    background: Option<&'static str>,
    shapes: &'static [ModuleShape],
) -> FamilySpec {
    FamilySpec { name, category, fill, stops, background, shapes }
}

use Category::*;
use FillKind::{HorizontalGradient as HGrad, RadialGradient as RGrad, Solid, VerticalGradient as VGrad};
use ModuleShape::*;

pub const FAMILIES: &[FamilySpec] = &[
    // Transparent series
    family("Transparent Black", Transparent, Solid, &["#000000"], None, &[Square, Rounded, Circle, Gapped, VBar]),
    family("Transparent White", Transparent, Solid, &["#FFFFFF"], None, &[Square, Rounded, Circle, Gapped, VBar]),
    family("Transparent Gray", Transparent, Solid, &["#6B7280"], None, &[Square, Rounded, Circle, Gapped]),
    family("Transparent Navy", Transparent, Solid, &["#1e3a5f"], None, &[Square, Rounded, Circle, Gapped]),
    family("Transparent Red", Transparent, Solid, &["#DC2626"], None, &[Square, Rounded, Circle, Gapped]),
    family("Transparent Blue", Transparent, Solid, &["#2563EB"], None, &[Square, Rounded, Circle, Gapped]),
    family("Transparent Green", Transparent, Solid, &["#16A34A"], None, &[Square, Rounded, Circle, Gapped]),
    family("Transparent Purple", Transparent, Solid, &["#7C3AED"], None, &[Square, Rounded, Circle, Gapped]),
    family("Transparent Orange", Transparent, Solid, &["#EA580C"], None, &[Square, Rounded, Circle, Gapped]),
    family("Transparent Teal", Transparent, Solid, &["#0D9488"], None, &[Square, Rounded, Circle, Gapped]),
    family("Transparent Pink", Transparent, Solid, &["#EC4899"], None, &[Square, Rounded, Circle, Gapped]),
    family("Transparent Gold", Transparent, Solid, &["#D4AF37"], None, &[Square, Rounded, Circle, Gapped]),
    // Classic
    family("Classic Black", Classic, Solid, &["#000000"], Some("#FFFFFF"), &[Square, Rounded, Circle, Gapped, VBar, HBar]),
    family("Inverted Classic", Classic, Solid, &["#FFFFFF"], Some("#000000"), &[Square, Rounded, Circle, Gapped]),
    // Corporate
    family("Corporate Navy", Corporate, Solid, &["#1e3a5f"], Some("#FFFFFF"), &[Square, Rounded, Circle, Gapped]),
    family("Corporate Blue", Corporate, Solid, &["#1E40AF"], Some("#FFFFFF"), &[Square, Rounded, Circle, Gapped]),
    family("Corporate Gray", Corporate, Solid, &["#374151"], Some("#FFFFFF"), &[Square, Rounded, Circle, Gapped]),
    family("Corporate Charcoal", Corporate, Solid, &["#1F2937"], Some("#FFFFFF"), &[Square, Rounded, Circle, Gapped]),
    family("Corporate Teal", Corporate, Solid, &["#0F766E"], Some("#FFFFFF"), &[Square, Rounded, Circle, Gapped]),
    family("Corporate Slate", Corporate, Solid, &["#475569"], Some("#FFFFFF"), &[Square, Rounded, Circle, Gapped]),
    family("Corporate Indigo", Corporate, Solid, &["#4338CA"], Some("#FFFFFF"), &[Square, Rounded, Circle, Gapped]),
    family("Corporate Forest", Corporate, Solid, &["#166534"], Some("#FFFFFF"), &[Square, Rounded, Circle, Gapped]),
    // Horizontal gradients
    family("Gradient Blue Purple", HorizontalGradient, HGrad, &["#667eea", "#764ba2"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Gradient Pink Orange", HorizontalGradient, HGrad, &["#f093fb", "#f5576c"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Gradient Teal Green", HorizontalGradient, HGrad, &["#11998e", "#38ef7d"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Gradient Ocean", HorizontalGradient, HGrad, &["#2193b0", "#6dd5ed"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Gradient Sunset", HorizontalGradient, HGrad, &["#f12711", "#f5af19"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Gradient Forest", HorizontalGradient, HGrad, &["#134e5e", "#71b280"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Gradient Candy", HorizontalGradient, HGrad, &["#fc466b", "#3f5efb"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Gradient Mint", HorizontalGradient, HGrad, &["#0cebeb", "#20e3b2"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Gradient Peach", HorizontalGradient, HGrad, &["#ed6ea0", "#ec8c69"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Gradient Aurora", HorizontalGradient, HGrad, &["#7f7fd5", "#91eae4"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Gradient Royal", HorizontalGradient, HGrad, &["#141e30", "#243b55"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Gradient Cherry", HorizontalGradient, HGrad, &["#eb3349", "#f45c43"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Gradient Aqua", HorizontalGradient, HGrad, &["#13547a", "#80d0c7"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Gradient Mango", HorizontalGradient, HGrad, &["#ffe259", "#ffa751"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Gradient Grape", HorizontalGradient, HGrad, &["#5b247a", "#1bcedf"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Gradient Lush", HorizontalGradient, HGrad, &["#56ab2f", "#a8e063"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Gradient Velvet", HorizontalGradient, HGrad, &["#DA4453", "#89216B"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Gradient Cosmic", HorizontalGradient, HGrad, &["#ff00cc", "#333399"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    // Radial gradients
    family("Radial Fire", RadialGradient, RGrad, &["#ff416c", "#ff4b2b"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Radial Sunset", RadialGradient, RGrad, &["#f5576c", "#f093fb"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Radial Ocean", RadialGradient, RGrad, &["#0052D4", "#6FB1FC"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Radial Earth", RadialGradient, RGrad, &["#403B4A", "#E7E9BB"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Radial Neon", RadialGradient, RGrad, &["#00F260", "#0575E6"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Radial Berry", RadialGradient, RGrad, &["#8E2DE2", "#4A00E0"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    // Vertical gradients
    family("Vertical Sky", VerticalGradient, VGrad, &["#2980B9", "#6DD5FA"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Vertical Dusk", VerticalGradient, VGrad, &["#2c3e50", "#bdc3c7"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Vertical Spring", VerticalGradient, VGrad, &["#00b09b", "#96c93d"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Vertical Twilight", VerticalGradient, VGrad, &["#0f0c29", "#302b63"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Vertical Sunrise", VerticalGradient, VGrad, &["#ff512f", "#f09819"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Vertical Lavender", VerticalGradient, VGrad, &["#834d9b", "#d04ed6"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    // Neon
    family("Neon Pink", Neon, Solid, &["#ff006e"], Some("#0a0a0f"), &[Square, Rounded, Circle, Gapped]),
    family("Neon Cyan", Neon, Solid, &["#00f5d4"], Some("#0a0a0f"), &[Square, Rounded, Circle, Gapped]),
    family("Neon Green", Neon, Solid, &["#39ff14"], Some("#0a0a0f"), &[Square, Rounded, Circle, Gapped]),
    family("Neon Purple", Neon, Solid, &["#bf00ff"], Some("#0a0a0f"), &[Square, Rounded, Circle, Gapped]),
    family("Neon Orange", Neon, Solid, &["#ff9500"], Some("#0a0a0f"), &[Square, Rounded, Circle, Gapped]),
    family("Neon Yellow", Neon, Solid, &["#fff01f"], Some("#0a0a0f"), &[Square, Rounded, Circle, Gapped]),
    family("Neon Red", Neon, Solid, &["#ff073a"], Some("#0a0a0f"), &[Square, Rounded, Circle, Gapped]),
    family("Neon Blue", Neon, Solid, &["#00b4ff"], Some("#0a0a0f"), &[Square, Rounded, Circle, Gapped]),
    // Retro
    family("Retro Terminal", Retro, Solid, &["#00ff41"], Some("#0d0208"), &[Square, Rounded, Gapped]),
    family("Retro Amber", Retro, Solid, &["#ffb000"], Some("#1a1100"), &[Square, Rounded, Gapped]),
    family("Retro Blue CRT", Retro, Solid, &["#00b4d8"], Some("#03071e"), &[Square, Rounded, Gapped]),
    family("Retro Sepia", Retro, Solid, &["#704214"], Some("#f5e6c8"), &[Square, Rounded, Gapped]),
    family("Retro Cream", Retro, Solid, &["#5c4033"], Some("#fffdd0"), &[Square, Rounded, Gapped]),
    // Elegant
    family("Elegant Gold", Elegant, Solid, &["#d4af37"], Some("#1a1a1a"), &[Square, Rounded, Circle]),
    family("Elegant Silver", Elegant, Solid, &["#c0c0c0"], Some("#1a1a1a"), &[Square, Rounded, Circle]),
    family("Elegant Rose Gold", Elegant, Solid, &["#b76e79"], Some("#1a1a1a"), &[Square, Rounded, Circle]),
    family("Elegant Bronze", Elegant, Solid, &["#cd7f32"], Some("#1a1a1a"), &[Square, Rounded, Circle]),
    family("Elegant Platinum", Elegant, Solid, &["#e5e4e2"], Some("#1a1a1a"), &[Square, Rounded, Circle]),
    family("Elegant Copper", Elegant, Solid, &["#b87333"], Some("#1a1a1a"), &[Square, Rounded, Circle]),
    family("Elegant Champagne", Elegant, Solid, &["#f7e7ce"], Some("#2d2d2d"), &[Square, Rounded, Circle]),
    // Soft / pastel
    family("Soft Purple", Soft, Solid, &["#a78bfa"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Soft Blue", Soft, Solid, &["#93c5fd"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Soft Pink", Soft, Solid, &["#f9a8d4"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Soft Mint", Soft, Solid, &["#6ee7b7"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Soft Coral", Soft, Solid, &["#fca5a5"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Soft Lavender", Soft, Solid, &["#c4b5fd"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Soft Peach", Soft, Solid, &["#fdba74"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Soft Sky", Soft, Solid, &["#7dd3fc"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Soft Rose", Soft, Solid, &["#fda4af"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    family("Soft Lime", Soft, Solid, &["#bef264"], Some("#FFFFFF"), &[Square, Rounded, Circle]),
    // Dark mode
    family("Dark Slate", DarkMode, Solid, &["#94a3b8"], Some("#0f172a"), &[Square, Rounded, Circle, Gapped]),
    family("Dark Teal", DarkMode, Solid, &["#2dd4bf"], Some("#0f172a"), &[Square, Rounded, Circle, Gapped]),
    family("Dark Berry", DarkMode, Solid, &["#f472b6"], Some("#0f172a"), &[Square, Rounded, Circle, Gapped]),
    family("Dark Sky", DarkMode, Solid, &["#38bdf8"], Some("#0f172a"), &[Square, Rounded, Circle, Gapped]),
    family("Dark Amber", DarkMode, Solid, &["#fbbf24"], Some("#0f172a"), &[Square, Rounded, Circle, Gapped]),
    family("Dark Emerald", DarkMode, Solid, &["#34d399"], Some("#0f172a"), &[Square, Rounded, Circle, Gapped]),
    family("Dark Violet", DarkMode, Solid, &["#a78bfa"], Some("#0f172a"), &[Square, Rounded, Circle, Gapped]),
    family("Dark Rose", DarkMode, Solid, &["#fb7185"], Some("#0f172a"), &[Square, Rounded, Circle, Gapped]),
    // Vibrant
    family("Vibrant Red", Vibrant, Solid, &["#ef4444"], Some("#FFFFFF"), &[Square, Rounded, Circle, Gapped]),
    family("Vibrant Blue", Vibrant, Solid, &["#3b82f6"], Some("#FFFFFF"), &[Square, Rounded, Circle, Gapped]),
    family("Vibrant Green", Vibrant, Solid, &["#22c55e"], Some("#FFFFFF"), &[Square, Rounded, Circle, Gapped]),
    family("Vibrant Yellow", Vibrant, Solid, &["#eab308"], Some("#FFFFFF"), &[Square, Rounded, Circle, Gapped]),
    family("Vibrant Purple", Vibrant, Solid, &["#8b5cf6"], Some("#FFFFFF"), &[Square, Rounded, Circle, Gapped]),
    family("Vibrant Orange", Vibrant, Solid, &["#f97316"], Some("#FFFFFF"), &[Square, Rounded, Circle, Gapped]),
    family("Vibrant Cyan", Vibrant, Solid, &["#06b6d4"], Some("#FFFFFF"), &[Square, Rounded, Circle, Gapped]),
    family("Vibrant Fuchsia", Vibrant, Solid, &["#d946ef"], Some("#FFFFFF"), &[Square, Rounded, Circle, Gapped]),
];

static CATALOG: Lazy<Arc<[StyleDescriptor]>> = Lazy::new(|| expand(FAMILIES).into());

/// All styles in gallery order
pub fn all() -> &'static [StyleDescriptor] {
    &CATALOG
}

/// Shared handle for owners that outlive a borrow (the gallery loader)
pub fn shared() -> Arc<[StyleDescriptor]> {
    Arc::clone(&CATALOG)
}

pub fn family_count() -> usize {
    FAMILIES.len()
}

pub fn get(id: StyleId) -> Option<&'static StyleDescriptor> {
    all().get(id.0 as usize)
}

pub fn find(family: &str, shape: ModuleShape) -> Option<&'static StyleDescriptor> {
    all().iter().find(|s| s.family == family && s.shape == shape)
}

/// Look up a style by its `"<family>|<shape>"` key
pub fn find_by_key(key: &str) -> Option<&'static StyleDescriptor> {
    let (family, shape) = key.split_once('|')?;
    find(family, ModuleShape::from_key(shape)?)
}

/// Expand family specs into one descriptor per (family, shape)
///
/// A color that fails to parse is dropped and logged. The descriptor is
/// still emitted so the renderer can report it and the gallery can show a
/// placeholder in its slot.
pub fn expand(families: &[FamilySpec]) -> Vec<StyleDescriptor> {
    let mut styles = Vec::with_capacity(families.iter().map(|f| f.shapes.len()).sum());

    for spec in families {
        let stops: Vec<Rgba> = spec
            .stops
            .iter()
            .filter_map(|hex| match Rgba::from_hex(hex) {
                Ok(color) => Some(color),
                Err(e) => {
                    warn!("⚠️  Family {:?}: {}", spec.name, e);
                    None
                }
            })
            .collect();

        let background = spec.background.and_then(|hex| Rgba::from_hex(hex).ok());

        for &shape in spec.shapes {
            styles.push(StyleDescriptor {
                id: StyleId(styles.len() as u16),
                family: spec.name,
                category: spec.category,
                fill: spec.fill,
                stops: stops.clone(),
                shape,
                background,
            });
        }
    }

    styles
}
