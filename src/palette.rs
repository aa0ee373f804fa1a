//! Component-library presets.
//!
//! Each preset is a kind plus the overrides the palette passes to
//! [`ElementStore::add`](crate::doc::ElementStore::add).

#[cfg(test)]
#[path = "palette_test.rs"]
mod palette_test;

use serde::{Deserialize, Serialize};

use crate::doc::{ElementKind, ElementPatch, ShapeVariant, Style};

const PARAGRAPH_COPY: &str = "This is a paragraph of text. Click to edit and enter your own content.";

/// Named entries offered by the palette and the insert toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Text,
    Heading,
    Subheading,
    Paragraph,
    List,
    Image,
    Rectangle,
    Circle,
}

impl Preset {
    pub const ALL: [Preset; 8] = [
        Self::Text,
        Self::Heading,
        Self::Subheading,
        Self::Paragraph,
        Self::List,
        Self::Image,
        Self::Rectangle,
        Self::Circle,
    ];

    #[must_use]
    pub fn kind(self) -> ElementKind {
        match self {
            Self::Text | Self::Heading | Self::Subheading | Self::Paragraph | Self::List => ElementKind::Text,
            Self::Image => ElementKind::Image,
            Self::Rectangle | Self::Circle => ElementKind::Shape,
        }
    }

    /// Overrides applied on top of the kind defaults.
    #[must_use]
    pub fn overrides(self) -> ElementPatch {
        match self {
            Self::Text | Self::List | Self::Image => ElementPatch::default(),
            Self::Heading => ElementPatch {
                content: Some("Heading Text".into()),
                style: Some(Style {
                    font_size: Some("28px".into()),
                    font_weight: Some("bold".into()),
                    ..Style::default()
                }),
                ..ElementPatch::default()
            },
            Self::Subheading => ElementPatch {
                content: Some("Subheading Text".into()),
                style: Some(Style {
                    font_size: Some("20px".into()),
                    font_weight: Some("500".into()),
                    ..Style::default()
                }),
                ..ElementPatch::default()
            },
            Self::Paragraph => ElementPatch {
                content: Some(PARAGRAPH_COPY.into()),
                width: Some(400.0),
                height: Some(100.0),
                style: Some(Style {
                    font_size: Some("16px".into()),
                    line_height: Some("1.5".into()),
                    ..Style::default()
                }),
                ..ElementPatch::default()
            },
            Self::Rectangle => ElementPatch::content(ShapeVariant::Rectangle.as_str()),
            Self::Circle => ElementPatch {
                content: Some(ShapeVariant::Circle.as_str().into()),
                style: Some(Style { corner_radius: Some("50%".into()), ..Style::default() }),
                ..ElementPatch::default()
            },
        }
    }
}
