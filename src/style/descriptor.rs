use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// Index of a descriptor in the catalog, stable for the process lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StyleId(pub u16);

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How foreground modules are colored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FillKind {
    Solid,
    /// Left to right across the image width
    HorizontalGradient,
    /// Top to bottom across the image height
    VerticalGradient,
    /// Center outwards, normalized to the corner distance
    RadialGradient,
}

impl FillKind {
    /// Minimum number of color stops this fill needs
    pub fn required_stops(self) -> usize {
        match self {
            FillKind::Solid => 1,
            _ => 2,
        }
    }
}

/// The mark drawn for every dark module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleShape {
    Square,
    Rounded,
    Circle,
    Gapped,
    VBar,
    HBar,
}

impl ModuleShape {
    pub const ALL: [ModuleShape; 6] = [
        ModuleShape::Square,
        ModuleShape::Rounded,
        ModuleShape::Circle,
        ModuleShape::Gapped,
        ModuleShape::VBar,
        ModuleShape::HBar,
    ];

    /// Label shown under gallery thumbnails
    pub fn label(self) -> &'static str {
        match self {
            ModuleShape::Square => "Square",
            ModuleShape::Rounded => "Rounded",
            ModuleShape::Circle => "Circle",
            ModuleShape::Gapped => "Gapped",
            ModuleShape::VBar => "V-Bars",
            ModuleShape::HBar => "H-Bars",
        }
    }

    /// Machine key used in `"<family>|<shape>"` style keys
    pub fn key(self) -> &'static str {
        match self {
            ModuleShape::Square => "square",
            ModuleShape::Rounded => "rounded",
            ModuleShape::Circle => "circle",
            ModuleShape::Gapped => "gapped",
            ModuleShape::VBar => "vertical_bars",
            ModuleShape::HBar => "horizontal_bars",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|shape| shape.key() == key)
    }
}

impl fmt::Display for ModuleShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Gallery section a family belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Transparent,
    Classic,
    Corporate,
    HorizontalGradient,
    RadialGradient,
    VerticalGradient,
    Neon,
    Retro,
    Elegant,
    Soft,
    DarkMode,
    Vibrant,
}

impl Category {
    pub fn title(self) -> &'static str {
        match self {
            Category::Transparent => "Transparent",
            Category::Classic => "Classic",
            Category::Corporate => "Corporate",
            Category::HorizontalGradient => "Horizontal Gradients",
            Category::RadialGradient => "Radial Gradients",
            Category::VerticalGradient => "Vertical Gradients",
            Category::Neon => "Neon",
            Category::Retro => "Retro",
            Category::Elegant => "Elegant",
            Category::Soft => "Soft / Pastel",
            Category::DarkMode => "Dark Mode",
            Category::Vibrant => "Vibrant",
        }
    }
}

/// One gallery style: a family's colors instantiated with one module shape
///
/// Descriptors are built once when the catalog is first touched and are
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDescriptor {
    pub id: StyleId,
    pub family: &'static str,
    pub category: Category,
    pub fill: FillKind,
    /// Ordered, evenly spaced along the gradient axis
    pub stops: Vec<Rgba>,
    pub shape: ModuleShape,
    /// Suggested backdrop for opaque exports; renders stay transparent
    pub background: Option<Rgba>,
}

impl StyleDescriptor {
    /// Stable `"<family>|<shape>"` key
    pub fn key(&self) -> String {
        format!("{}|{}", self.family, self.shape.key())
    }

    /// Human readable name, e.g. `Classic Black - Square`
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.family, self.shape.label())
    }

    /// Color used when opaque export needs a flat backdrop
    pub fn flatten_color(&self) -> Rgba {
        self.background.unwrap_or(Rgba::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_keys_round_trip() {
        for shape in ModuleShape::ALL {
            assert_eq!(ModuleShape::from_key(shape.key()), Some(shape));
        }
        assert_eq!(ModuleShape::from_key("hexagon"), None);
    }

    #[test]
    fn test_required_stops() {
        assert_eq!(FillKind::Solid.required_stops(), 1);
        assert_eq!(FillKind::RadialGradient.required_stops(), 2);
    }
}
