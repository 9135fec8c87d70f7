//! Shared constants for the card crate.

// ── Field defaults ──────────────────────────────────────────────

/// Label given to a freshly added field.
pub const NEW_FIELD_LABEL: &str = "Nuevo";

/// Value given to a freshly added field.
pub const NEW_FIELD_VALUE: &str = "Valor";

/// Primary color given to a freshly added field.
pub const NEW_FIELD_COLOR: &str = "#ffe600";

/// Value-glow color used for new fields and backfilled into older records.
pub const DEFAULT_SHADOW_COLOR: &str = "#0080ff";

// ── Card settings defaults ──────────────────────────────────────

pub const DEFAULT_TITLE: &str = "Retroid Pocket Classic";
pub const DEFAULT_TITLE_COLOR: &str = "#ff00ff";
pub const DEFAULT_GLOW_COLOR: &str = "#0080ff";
pub const DEFAULT_COLUMNS: u32 = 3;

/// Column counts offered by the column selector.
pub const COLUMN_CHOICES: [u32; 4] = [1, 2, 3, 4];

// ── Storage keys ────────────────────────────────────────────────

pub const FIELDS_KEY: &str = "fields";
pub const COLUMNS_KEY: &str = "columns";
pub const REMEMBER_KEY: &str = "rememberSettings";

// ── Palette ─────────────────────────────────────────────────────

pub const CARD_BACKGROUND: &str = "#0d0d26";
pub const CARD_BORDER: &str = "#1f1f3d";
pub const CELL_BACKGROUND: &str = "#141432";
pub const VALUE_TEXT_COLOR: &str = "#ffffff";

// ── Layout metrics (CSS pixels) ─────────────────────────────────

/// Inner padding of the card on every side.
pub const CARD_PADDING: f64 = 24.0;

/// Corner radius of the card background.
pub const CARD_RADIUS: f64 = 16.0;

/// Height reserved for the title line.
pub const TITLE_HEIGHT: f64 = 28.0;

/// Space between the title and the first grid row.
pub const TITLE_GAP: f64 = 16.0;

/// Gap between grid tracks, both directions.
pub const GRID_GAP: f64 = 24.0;

/// Inner padding of a field cell.
pub const CELL_PADDING: f64 = 12.0;

/// Corner radius of a field cell.
pub const CELL_RADIUS: f64 = 12.0;

/// Fixed height of a field cell (label line + value line).
pub const CELL_HEIGHT: f64 = 72.0;

/// Narrowest and widest a grid track may get.
pub const MIN_CELL_WIDTH: f64 = 140.0;
pub const MAX_CELL_WIDTH: f64 = 360.0;

/// Estimated advance per character for the bold 12px label font.
pub const LABEL_CHAR_WIDTH: f64 = 7.5;

/// Estimated advance per character for the 14px monospace value font.
pub const VALUE_CHAR_WIDTH: f64 = 8.4;

/// Estimated advance per character for the bold 18px title font.
pub const TITLE_CHAR_WIDTH: f64 = 10.8;

pub const LABEL_FONT: &str = "bold 12px sans-serif";
pub const VALUE_FONT: &str = "14px monospace";
pub const TITLE_FONT: &str = "bold 18px sans-serif";

/// Blur radius used for every text glow.
pub const GLOW_BLUR: f64 = 5.0;
