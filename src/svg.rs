//! SVG and PNG previews of laid-out pages.

use std::fmt::Write as _;

use resvg::usvg;
use resvg::usvg::fontdb::Database;
use tiny_skia::{Pixmap, Transform};

use crate::document::{DrawCommand, Page};
use crate::error::{Error, Result};

const PAGE_BACKGROUND: &str = "#ffffff";

/// Appends `text` as SVG character data. Laid-out text is WinAnsi only, so
/// no control characters reach this point.
fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn write_text(out: &mut String, cmd: &DrawCommand) {
    let weight_attr = if cmd.face.style.is_bold() {
        " font-weight=\"700\""
    } else {
        ""
    };
    let style_attr = if cmd.face.style.is_italic() {
        " font-style=\"italic\""
    } else {
        ""
    };
    let baseline = cmd.y + cmd.size * cmd.face.ascent();

    // Writing into a String cannot fail.
    let _ = write!(
        out,
        r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.2}" fill="{}" xml:space="preserve"{}{}>"#,
        cmd.x,
        baseline,
        cmd.face.css_family(),
        cmd.size,
        cmd.color.to_hex(),
        weight_attr,
        style_attr,
    );
    push_escaped(out, &cmd.text);
    out.push_str("</text>");
}

/// Renders one page at its size in points.
pub fn render_page(page: &Page, width: f32, height: f32) -> String {
    let mut content = String::new();
    for cmd in page.commands.iter().filter(|cmd| !cmd.text.is_empty()) {
        write_text(&mut content, cmd);
    }

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}"><rect width="100%" height="100%" fill="{bg}" />{content}</svg>"#,
        w = width,
        h = height,
        bg = PAGE_BACKGROUND,
        content = content,
    )
}

/// Rasterizes a page SVG to PNG at `scale` pixels per point.
pub fn rasterize_png(svg: &str, scale: f32) -> Result<Vec<u8>> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(Error::Raster(format!("invalid scale {}", scale)));
    }

    let mut opts = usvg::Options::default();
    let fontdb = opts.fontdb_mut();
    fontdb.load_system_fonts();
    map_generic_families(fontdb);

    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| Error::Raster(format!("Failed to parse SVG: {}", e)))?;

    let width = (tree.size().width() * scale).ceil() as u32;
    let height = (tree.size().height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| Error::Raster(format!("cannot allocate {}x{} pixmap", width, height)))?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| Error::Raster(format!("Failed to encode PNG: {}", e)))
}

/// Installed stand-ins for the PDF base fonts, closest metrics first.
const SANS_CANDIDATES: &[&str] = &["helvetica", "arial", "liberation sans", "nimbus sans", "sans"];
const MONO_CANDIDATES: &[&str] = &["courier", "liberation mono", "nimbus mono", "mono"];

/// First installed family whose name contains a candidate, trying candidates
/// in order.
fn closest_family(fontdb: &Database, candidates: &[&str]) -> Option<String> {
    let families: Vec<&str> = fontdb
        .faces()
        .flat_map(|face| face.families.iter().map(|(name, _)| name.as_str()))
        .collect();

    candidates.iter().find_map(|wanted| {
        families
            .iter()
            .find(|name| name.to_ascii_lowercase().contains(*wanted))
            .map(|name| name.to_string())
    })
}

/// Resolves the generic `sans-serif` and `monospace` fallbacks of the page
/// SVG to Helvetica and Courier look-alikes when the originals are missing.
fn map_generic_families(fontdb: &mut Database) {
    if let Some(family) = closest_family(fontdb, SANS_CANDIDATES) {
        fontdb.set_sans_serif_family(family);
    }
    if let Some(family) = closest_family(fontdb, MONO_CANDIDATES) {
        fontdb.set_monospace_family(family);
    }
}
