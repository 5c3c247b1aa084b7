use serde::{Deserialize, Serialize};

/// Font weight requested by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weight {
    Regular,
    Bold,
}

/// Text scale tier, used by header rules. The presentation layer maps this
/// to concrete font metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextScale {
    Body,
    Title1,
    Title2,
    Title3,
}

/// Semantic color token. The engine never resolves these to concrete colors;
/// the presentation layer does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tint {
    /// Default text color.
    Label,
    /// Muted gray, used for spoiler covers and quote insets.
    Gray,
    /// Lighter gray, used for revealed spoiler backgrounds.
    GrayLight,
    /// Warning color.
    Red,
    /// Secondary surface background, used behind inline code.
    Surface,
}

/// One style attribute with a typed payload.
///
/// This is a closed set: rules can only request attributes the presentation
/// layer knows how to render. Each variant occupies one [`AttrKey`] slot in
/// an [`AttrSet`]; writing a variant replaces any earlier write of the same
/// key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attr {
    /// Font weight.
    Weight(Weight),
    /// Italic slant amount, 0.0 = upright.
    Oblique(f32),
    Underline(bool),
    Strikethrough(bool),
    /// Render in a monospaced font.
    Monospace(bool),
    /// Text scale tier (headers).
    Scale(TextScale),
    /// Point size override.
    Size(f32),
    Foreground(Tint),
    Background(Tint),
    /// Marker for an inset bar beside the content (block quotes). Carries
    /// the bar color; the presentation layer draws the inset itself.
    Inset(Tint),
}

/// Attribute key, one per [`Attr`] variant. Used for last-write-wins merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKey {
    Weight,
    Oblique,
    Underline,
    Strikethrough,
    Monospace,
    Scale,
    Size,
    Foreground,
    Background,
    Inset,
}

impl Attr {
    pub fn key(&self) -> AttrKey {
        match self {
            Attr::Weight(_) => AttrKey::Weight,
            Attr::Oblique(_) => AttrKey::Oblique,
            Attr::Underline(_) => AttrKey::Underline,
            Attr::Strikethrough(_) => AttrKey::Strikethrough,
            Attr::Monospace(_) => AttrKey::Monospace,
            Attr::Scale(_) => AttrKey::Scale,
            Attr::Size(_) => AttrKey::Size,
            Attr::Foreground(_) => AttrKey::Foreground,
            Attr::Background(_) => AttrKey::Background,
            Attr::Inset(_) => AttrKey::Inset,
        }
    }
}

/// An ordered set of style attributes, at most one per [`AttrKey`].
///
/// Writing an attribute whose key is already present replaces the earlier
/// value (last write wins). Iteration order is insertion order of the
/// surviving writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttrSet(Vec<Attr>);

impl AttrSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `attr`, replacing any existing attribute with the same key.
    pub fn set(&mut self, attr: Attr) {
        if let Some(existing) = self.0.iter_mut().find(|a| a.key() == attr.key()) {
            *existing = attr;
        } else {
            self.0.push(attr);
        }
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, attr: Attr) -> Self {
        self.set(attr);
        self
    }

    pub fn get(&self, key: AttrKey) -> Option<Attr> {
        self.0.iter().copied().find(|a| a.key() == key)
    }

    /// Writes every attribute of `other` into `self`; `other` wins on
    /// conflicting keys.
    pub fn merge(&mut self, other: &AttrSet) {
        for attr in other.iter() {
            self.set(attr);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Attr> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
