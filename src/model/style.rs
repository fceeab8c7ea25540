//! Cell style model.
//!
//! Every field is optional: `None` means "unset, use the document default".
//! A default style supplied by the caller is combined with per-cell CSS
//! through [`Style::union`].

use serde::{Deserialize, Serialize};

/// Border line weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderWeight {
    Thin,
    Medium,
}

impl BorderWeight {
    /// The SpreadsheetML `style` attribute value.
    pub fn as_str(&self) -> &'static str {
        match self {
            BorderWeight::Thin => "thin",
            BorderWeight::Medium => "medium",
        }
    }
}

/// One side of a cell border.
///
/// A side may be present without a weight: the CSS declared a border the
/// weight rules don't recognise, which renders as an unstyled edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Side {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<BorderWeight>,
}

impl Side {
    /// A side with the given weight.
    pub fn new(weight: BorderWeight) -> Self {
        Self {
            weight: Some(weight),
        }
    }

    /// A present side with no weight.
    pub fn plain() -> Self {
        Self { weight: None }
    }

    pub fn thin() -> Self {
        Self::new(BorderWeight::Thin)
    }

    pub fn medium() -> Self {
        Self::new(BorderWeight::Medium)
    }
}

/// Four independent border sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Border {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Side>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Side>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<Side>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Side>,
}

impl Border {
    /// A border with all four sides set to `side`.
    pub fn all(side: Side) -> Self {
        Self {
            left: Some(side),
            right: Some(side),
            top: Some(side),
            bottom: Some(side),
        }
    }

    pub fn left(side: Side) -> Self {
        Self {
            left: Some(side),
            ..Default::default()
        }
    }

    pub fn right(side: Side) -> Self {
        Self {
            right: Some(side),
            ..Default::default()
        }
    }

    pub fn top(side: Side) -> Self {
        Self {
            top: Some(side),
            ..Default::default()
        }
    }

    pub fn bottom(side: Side) -> Self {
        Self {
            bottom: Some(side),
            ..Default::default()
        }
    }

    /// Stack `other` on top of this border: sides present in `other` win,
    /// the rest are kept.
    pub fn combine(&self, other: &Border) -> Border {
        Border {
            left: other.left.or(self.left),
            right: other.right.or(self.right),
            top: other.top.or(self.top),
            bottom: other.bottom.or(self.bottom),
        }
    }

    /// Check if no side is set.
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none() && self.top.is_none() && self.bottom.is_none()
    }
}

/// Text alignment within a cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Alignment {
    /// Horizontal alignment keyword, copied verbatim from `text-align`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<String>,

    /// Wrap text (`word-wrap`); `None` leaves it unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap_text: Option<bool>,
}

impl Alignment {
    /// Alignment with only the horizontal keyword set.
    pub fn horizontal(keyword: impl Into<String>) -> Self {
        Self {
            horizontal: Some(keyword.into()),
            wrap_text: None,
        }
    }

    /// Check if neither field is set.
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_none() && self.wrap_text.is_none()
    }
}

/// Font settings. Only weight is modelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Font {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
}

impl Font {
    pub fn bold() -> Self {
        Self { bold: true }
    }
}

/// Border, alignment and font of a cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

impl Style {
    /// Create an empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the border.
    pub fn with_border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    /// Set the alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Set the font.
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    /// Field-wise merge where `other` wins wherever it sets a field.
    ///
    /// Fields are replaced whole: a present `other.border` replaces
    /// `self.border` entirely rather than side by side.
    pub fn union(&self, other: &Style) -> Style {
        Style {
            border: other.border.or(self.border),
            alignment: other.alignment.clone().or_else(|| self.alignment.clone()),
            font: other.font.or(self.font),
        }
    }

    /// Check if no field is set.
    pub fn is_empty(&self) -> bool {
        self.border.is_none() && self.alignment.is_none() && self.font.is_none()
    }
}
