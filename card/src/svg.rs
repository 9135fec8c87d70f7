//! SVG writer: serializes a [`CardLayout`] as a standalone SVG document.
//!
//! Glows become `feDropShadow` filters, one per distinct glow color.

#[cfg(test)]
#[path = "svg_test.rs"]
mod svg_test;

use std::fmt::Write;

use crate::consts::{CARD_BACKGROUND, CARD_BORDER, CARD_RADIUS, CELL_BACKGROUND, CELL_RADIUS, GLOW_BLUR, VALUE_TEXT_COLOR};
use crate::layout::CardLayout;

/// Render `layout` as SVG markup.
#[must_use]
pub fn to_svg(layout: &CardLayout) -> String {
    let mut glows = GlowTable::default();
    let title_glow = glows.id_for(&layout.title.glow);
    let cell_glows: Vec<(usize, usize)> = layout
        .cells
        .iter()
        .map(|cell| (glows.id_for(&cell.color), glows.id_for(&cell.glow)))
        .collect();

    let mut out = String::new();
    if let Err(err) = write_document(&mut out, layout, &glows, title_glow, &cell_glows) {
        log::error!("svg serialization failed: {err}");
    }
    out
}

fn write_document(
    out: &mut String,
    layout: &CardLayout,
    glows: &GlowTable,
    title_glow: usize,
    cell_glows: &[(usize, usize)],
) -> std::fmt::Result {
    let (w, h) = (layout.width, layout.height);
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.1}" height="{h:.1}" viewBox="0 0 {w:.1} {h:.1}">"#
    )?;

    writeln!(out, "  <defs>")?;
    for (i, color) in glows.colors.iter().enumerate() {
        writeln!(
            out,
            r#"    <filter id="glow-{i}" x="-50%" y="-50%" width="200%" height="200%"><feDropShadow dx="0" dy="0" stdDeviation="{:.1}" flood-color="{}"/></filter>"#,
            GLOW_BLUR * 0.5,
            escape(color)
        )?;
    }
    writeln!(out, "  </defs>")?;

    writeln!(
        out,
        r#"  <rect x="0.5" y="0.5" width="{:.1}" height="{:.1}" rx="{CARD_RADIUS}" fill="{CARD_BACKGROUND}" stroke="{CARD_BORDER}"/>"#,
        (w - 1.0).max(0.0),
        (h - 1.0).max(0.0),
    )?;

    let title = &layout.title;
    writeln!(
        out,
        r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle" font-family="sans-serif" font-size="18" font-weight="bold" fill="{}" filter="url(#glow-{title_glow})">{}</text>"#,
        title.anchor.x,
        title.anchor.y,
        escape(&title.color),
        escape(&title.text)
    )?;

    for (cell, (label_glow, value_glow)) in layout.cells.iter().zip(cell_glows) {
        let r = cell.rect;
        let label = cell.label_origin();
        let value = cell.value_origin();
        writeln!(out, r#"  <g data-field-id="{}">"#, cell.id)?;
        writeln!(
            out,
            r#"    <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="{CELL_RADIUS}" fill="{CELL_BACKGROUND}" stroke="{}"/>"#,
            r.x,
            r.y,
            r.width,
            r.height,
            escape(&cell.color)
        )?;
        writeln!(
            out,
            r#"    <text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="12" font-weight="bold" fill="{}" filter="url(#glow-{label_glow})">{}</text>"#,
            label.x,
            label.y,
            escape(&cell.color),
            escape(&cell.label)
        )?;
        writeln!(
            out,
            r#"    <text x="{:.1}" y="{:.1}" font-family="monospace" font-size="14" fill="{VALUE_TEXT_COLOR}" filter="url(#glow-{value_glow})">{}</text>"#,
            value.x,
            value.y,
            escape(&cell.value)
        )?;
        writeln!(out, "  </g>")?;
    }

    writeln!(out, "</svg>")
}

/// Distinct glow colors in first-seen order.
#[derive(Default)]
struct GlowTable {
    colors: Vec<String>,
}

impl GlowTable {
    fn id_for(&mut self, color: &str) -> usize {
        if let Some(i) = self.colors.iter().position(|c| c == color) {
            return i;
        }
        self.colors.push(color.to_owned());
        self.colors.len() - 1
    }
}

/// Escape text for use in element content and double-quoted attributes.
fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
