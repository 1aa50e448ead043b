//! ID card renderer
//!
//! Produces the printable membership card as a PDF byte stream on a fixed
//! CR80-proportioned canvas (85.6 × 54 mm). The member photo is embedded
//! best-effort: a missing or unreadable photo never fails the render, the
//! card simply goes out without it. Rendered cards are cached on disk keyed
//! by mobile number and reused on later downloads; there is no automatic
//! regeneration when the underlying record changes.

use std::path::Path;

use printpdf::{
    BuiltinFont, Color, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Line, Mm,
    PdfDocument, PdfLayerReference, Point, Px, Rgb,
    path::PaintMode,
};

use crate::db::members::{self, Member};
use crate::error::{AppError, AppResult};
use crate::photos;
use crate::state::AppState;

/// Card dimensions (CR80)
const CARD_W: f32 = 85.6;
const CARD_H: f32 = 54.0;

/// Header band height
const BAND_H: f32 = 12.0;

fn dark_green() -> Color {
    Color::Rgb(Rgb::new(0.106, 0.369, 0.125, None))
}

fn light_green() -> Color {
    Color::Rgb(Rgb::new(0.910, 0.961, 0.914, None))
}

fn white() -> Color {
    Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None))
}

/// Cached PDF file name for a member
pub fn card_file_name(mobile: &str) -> String {
    format!("{mobile}.pdf")
}

/// Identifier printed on the card: membership number when present, legacy
/// mobile-based ID for old records that never got one
fn card_identifier(member: &Member) -> String {
    if member.membership_no.is_empty() {
        format!("ID: PB-{}", member.mobile)
    } else {
        format!("ID: {}", member.membership_no)
    }
}

fn filled_rect(layer: &PdfLayerReference, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
    layer.set_fill_color(color);
    let rect = printpdf::Rect::new(Mm(x0), Mm(y0), Mm(x1), Mm(y1)).with_mode(PaintMode::Fill);
    layer.add_rect(rect);
}

fn outline_rect(layer: &PdfLayerReference, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
    layer.set_outline_color(color);
    layer.set_outline_thickness(0.8);
    let rect = printpdf::Rect::new(Mm(x0), Mm(y0), Mm(x1), Mm(y1)).with_mode(PaintMode::Stroke);
    layer.add_rect(rect);
}

/// Best-effort photo embed inside the frame box. Decode failures were
/// already logged by the photo store; nothing propagates from here.
fn embed_photo(layer: &PdfLayerReference, img: image::DynamicImage) {
    let rgb = img.to_rgb8();
    let (px_w, px_h) = rgb.dimensions();
    if px_w == 0 || px_h == 0 {
        return;
    }

    let xobject = ImageXObject {
        width: Px(px_w as usize),
        height: Px(px_h as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: rgb.into_raw(),
        image_filter: None,
        smask: None,
        clipping_bbox: None,
    };

    // Frame interior is 20.5 × 24.5 mm at (4.75, 12.75); scale to fit
    const DPI: f32 = 300.0;
    let natural_w = px_w as f32 * 25.4 / DPI;
    let natural_h = px_h as f32 * 25.4 / DPI;
    let scale = (20.5 / natural_w).min(24.5 / natural_h);

    Image::from(xobject).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(4.75)),
            translate_y: Some(Mm(12.75)),
            scale_x: Some(scale),
            scale_y: Some(scale),
            dpi: Some(DPI),
            ..Default::default()
        },
    );
}

/// Render a member's card to PDF bytes
pub fn render_card(member: &Member, upload_dir: &Path) -> AppResult<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        "Membership ID Card",
        Mm(CARD_W),
        Mm(CARD_H),
        "card",
    );
    let layer = doc.get_page(page).get_layer(layer);

    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::Render(e.to_string()))?;
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::Render(e.to_string()))?;
    let oblique = doc
        .add_builtin_font(BuiltinFont::HelveticaOblique)
        .map_err(|e| AppError::Render(e.to_string()))?;

    // Background and header band
    filled_rect(&layer, 0.0, 0.0, CARD_W, CARD_H, light_green());
    filled_rect(&layer, 0.0, CARD_H - BAND_H, CARD_W, CARD_H, dark_green());

    layer.set_fill_color(white());
    layer.use_text("PASUMAI BHARATAM", 11.0, Mm(20.0), Mm(47.5), &bold);
    layer.use_text("MEMBERSHIP ID CARD", 6.5, Mm(29.5), Mm(43.5), &regular);

    // Photo frame, best-effort photo
    outline_rect(&layer, 4.0, 12.0, 26.0, 38.0, dark_green());
    if let Some(ref file_name) = member.photo
        && let Some(img) = photos::load_photo(upload_dir, file_name)
    {
        embed_photo(&layer, img);
    }

    // Details
    let rows = [
        ("Name:", member.name.to_uppercase()),
        ("Mobile:", member.mobile.clone()),
        ("District:", member.district.clone()),
        ("State:", member.state.clone()),
    ];
    let mut y = 34.0;
    for (label, value) in rows {
        layer.set_fill_color(dark_green());
        layer.use_text(label, 7.0, Mm(30.0), Mm(y), &bold);
        layer.use_text(value, 7.0, Mm(47.0), Mm(y), &regular);
        y -= 5.5;
    }

    // Identifier and footer
    layer.use_text(card_identifier(member), 8.0, Mm(4.0), Mm(7.0), &bold);

    layer.set_outline_color(dark_green());
    layer.set_outline_thickness(0.5);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(4.0), Mm(5.0)), false),
            (Point::new(Mm(CARD_W - 4.0), Mm(5.0)), false),
        ],
        is_closed: false,
    });
    layer.use_text(
        "Service • Integrity • Growth",
        6.0,
        Mm(28.0),
        Mm(2.0),
        &oblique,
    );

    doc.save_to_bytes()
        .map_err(|e| AppError::Render(e.to_string()))
}

/// Fetch the card for a mobile number, rendering and caching on first use.
///
/// Fails with NotFound when no member record matches; a cache write failure
/// is logged but the freshly rendered bytes are still returned.
pub async fn get_or_render(state: &AppState, mobile: &str) -> AppResult<Vec<u8>> {
    let member = members::find_by_mobile(&state.pool, mobile)
        .await?
        .ok_or_else(|| AppError::not_found(format!("No member with mobile {mobile}")))?;

    let cache_path = state.idcard_dir.join(card_file_name(mobile));
    if let Ok(cached) = std::fs::read(&cache_path) {
        return Ok(cached);
    }

    let bytes = render_card(&member, &state.upload_dir)?;
    if let Err(e) = std::fs::write(&cache_path, &bytes) {
        tracing::warn!(path = %cache_path.display(), error = %e, "Failed to cache rendered card");
    }
    Ok(bytes)
}

/// Drop the cached card for a mobile number, if any (used on delete)
pub fn remove_cached_card(idcard_dir: &Path, mobile: &str) {
    let path = idcard_dir.join(card_file_name(mobile));
    match std::fs::remove_file(&path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove cached card");
        }
    }
}
