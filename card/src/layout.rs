//! Card layout: a pure projection from a [`CardDoc`] to card geometry.
//!
//! The projection decides everything a painter needs: card size, title
//! placement, and one cell per field in sequence order. Painters
//! ([`crate::render`], [`crate::svg`]) only translate this into their output
//! format, so the preview, the exported bitmap, and the CLI's SVG all agree.
//!
//! Text is not measured; widths are estimated from character counts with the
//! per-font advances in [`crate::consts`]. All units are CSS pixels.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use crate::consts::{
    CARD_PADDING, CELL_HEIGHT, CELL_PADDING, GRID_GAP, LABEL_CHAR_WIDTH, MAX_CELL_WIDTH, MIN_CELL_WIDTH,
    TITLE_CHAR_WIDTH, TITLE_GAP, TITLE_HEIGHT, VALUE_CHAR_WIDTH,
};
use crate::doc::{CardDoc, FieldId, FieldRecord};

/// A point in card or viewport space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`.
    #[must_use]
    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Axis-aligned rectangle with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Grid layout class selected by the column setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridClass {
    One,
    Two,
    Three,
    Four,
}

impl GridClass {
    /// Map a column setting to a layout class. Anything outside 1–3 draws as
    /// four columns.
    #[must_use]
    pub fn from_columns(columns: u32) -> Self {
        match columns {
            1 => Self::One,
            2 => Self::Two,
            3 => Self::Three,
            _ => Self::Four,
        }
    }

    #[must_use]
    pub fn columns(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }

    /// Utility class name used by the DOM preview.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::One => "grid-cols-1",
            Self::Two => "grid-cols-2",
            Self::Three => "grid-cols-3",
            Self::Four => "grid-cols-4",
        }
    }
}

/// Title block above the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleLayout {
    pub text: String,
    pub color: String,
    pub glow: String,
    /// Horizontal center and text baseline.
    pub anchor: Point,
}

/// One field cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellLayout {
    pub id: FieldId,
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
    pub label: String,
    pub value: String,
    /// Border and label glow.
    pub color: String,
    /// Value-text glow.
    pub glow: String,
}

impl CellLayout {
    /// Baseline position of the label text.
    #[must_use]
    pub fn label_origin(&self) -> Point {
        Point::new(self.rect.x + CELL_PADDING, self.rect.y + CELL_PADDING + 12.0)
    }

    /// Baseline position of the value text.
    #[must_use]
    pub fn value_origin(&self) -> Point {
        Point::new(self.rect.x + CELL_PADDING, self.rect.bottom() - CELL_PADDING - 4.0)
    }

    /// Width available to text inside the cell.
    #[must_use]
    pub fn text_width(&self) -> f64 {
        (self.rect.width - 2.0 * CELL_PADDING).max(0.0)
    }
}

/// Complete card geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub width: f64,
    pub height: f64,
    pub grid: GridClass,
    pub rows: usize,
    pub cell_width: f64,
    pub title: TitleLayout,
    pub cells: Vec<CellLayout>,
}

impl CardLayout {
    /// The cell drawn for `id`, if the field is on the card.
    #[must_use]
    pub fn cell(&self, id: &FieldId) -> Option<&CellLayout> {
        self.cells.iter().find(|c| c.id == *id)
    }
}

/// Project a document into card geometry.
#[must_use]
pub fn project(doc: &CardDoc) -> CardLayout {
    let settings = &doc.settings;
    let grid = GridClass::from_columns(settings.columns);
    let cols = grid.columns();
    let count = doc.fields.len();
    let rows = count.div_ceil(cols);

    let cell_width = cell_width_for(doc.fields.fields());
    let grid_width = track_span(cols, cell_width);
    let title_width = estimate(&settings.title, TITLE_CHAR_WIDTH);
    let width = 2.0 * CARD_PADDING + grid_width.max(title_width);

    let grid_top = CARD_PADDING + TITLE_HEIGHT + TITLE_GAP;
    let grid_height = track_span(rows, CELL_HEIGHT);
    let height = if rows == 0 {
        CARD_PADDING + TITLE_HEIGHT + CARD_PADDING
    } else {
        grid_top + grid_height + CARD_PADDING
    };

    // The grid is centered when the title is wider than the tracks.
    let grid_left = (width - grid_width) * 0.5;

    let cells = doc
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let row = index / cols;
            let col = index % cols;
            let rect = Rect::new(
                grid_left + to_f64(col) * (cell_width + GRID_GAP),
                grid_top + to_f64(row) * (CELL_HEIGHT + GRID_GAP),
                cell_width,
                CELL_HEIGHT,
            );
            CellLayout {
                id: field.id,
                row,
                col,
                rect,
                label: field.label.clone(),
                value: field.value.clone(),
                color: field.color.clone(),
                glow: field.shadow_color_or_default().to_owned(),
            }
        })
        .collect();

    CardLayout {
        width,
        height,
        grid,
        rows,
        cell_width,
        title: TitleLayout {
            text: settings.title.clone(),
            color: settings.title_color.clone(),
            glow: settings.glow_color.clone(),
            anchor: Point::new(width * 0.5, CARD_PADDING + TITLE_HEIGHT * 0.7),
        },
        cells,
    }
}

/// Uniform track width wide enough for the longest label or value.
fn cell_width_for(fields: &[FieldRecord]) -> f64 {
    let widest = fields
        .iter()
        .map(|f| estimate(&f.label, LABEL_CHAR_WIDTH).max(estimate(&f.value, VALUE_CHAR_WIDTH)))
        .fold(0.0, f64::max);
    (widest + 2.0 * CELL_PADDING).clamp(MIN_CELL_WIDTH, MAX_CELL_WIDTH)
}

fn estimate(text: &str, advance: f64) -> f64 {
    to_f64(text.chars().count()) * advance
}

/// Total extent of `n` tracks of `size` separated by the grid gap.
fn track_span(n: usize, size: f64) -> f64 {
    if n == 0 {
        return 0.0;
    }
    to_f64(n) * size + to_f64(n - 1) * GRID_GAP
}

#[allow(clippy::cast_precision_loss)]
fn to_f64(n: usize) -> f64 {
    n as f64
}
