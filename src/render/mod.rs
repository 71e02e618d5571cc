//! Card rendering: lays out a [`CardRecord`] on a pixel canvas at the exact
//! output geometry and paints it with imageproc primitives.

mod font;

use anyhow::Result;
use image::imageops::FilterType;
use image::{DynamicImage, ImageBuffer, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::card::{AspectMode, CardRecord, Emphasis, Theme};

// Layout constants in base pixels, multiplied by the render scale.
const AVATAR_SIZE: u32 = 100;
const AVATAR_TOP_OFFSET: u32 = 18;
const PROFILE_GAP: u32 = 20;
const PROFILE_BOTTOM_MARGIN: u32 = 40;
const NAME_PX: u32 = 33;
const NAME_HANDLE_GAP: u32 = 4;
const HANDLE_PX: u32 = 29;
const QUOTE_LINE_HEIGHT: f32 = 1.4;
const STATS_TOP_MARGIN: u32 = 70;
const STATS_GROUP_GAP: u32 = 40;
const ICON_SIZE: u32 = 34;
const ICON_TEXT_GAP: u32 = 20;
const STAT_PX: u32 = 30;
const INITIAL_PX: u32 = 32;

const NAME_PLACEHOLDER: &str = "Tu Nombre";
const HANDLE_PLACEHOLDER: &str = "usuario";
const QUOTE_PLACEHOLDER: &str = "Escribe tu frase inspiradora aquí...";

/// Options controlling rasterization.
#[derive(Debug, Clone, Copy)]
pub struct CardRenderOptions {
    pub mode: AspectMode,
    /// Integer resolution multiplier applied to every layout constant.
    pub scale: u32,
    /// Canvas fill override; defaults to the theme background.
    pub background: Option<Rgba<u8>>,
}

impl CardRenderOptions {
    pub fn new(mode: AspectMode) -> Self {
        Self {
            mode,
            scale: 1,
            background: None,
        }
    }
}

struct Palette {
    bg: Rgba<u8>,
    fg: Rgba<u8>,
    muted: Rgba<u8>,
    stat: Rgba<u8>,
    avatar_bg: Rgba<u8>,
    avatar_placeholder_bg: Rgba<u8>,
    avatar_placeholder_fg: Rgba<u8>,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            bg: rgba(0xff, 0xff, 0xff, 0xff),
            fg: rgba(0x00, 0x00, 0x00, 0xff),
            muted: rgba(0x5b, 0x70, 0x83, 0xff),
            stat: rgba(0x53, 0x64, 0x71, 0xff),
            avatar_bg: rgba(0xf0, 0xf0, 0xf0, 0xff),
            avatar_placeholder_bg: rgba(0xe0, 0xe0, 0xe0, 0xff),
            avatar_placeholder_fg: rgba(0x99, 0x99, 0x99, 0xff),
        },
        Theme::Dark => Palette {
            bg: rgba(0x00, 0x00, 0x00, 0xff),
            fg: rgba(0xff, 0xff, 0xff, 0xff),
            muted: rgba(0x8b, 0x98, 0xa5, 0xff),
            stat: rgba(0x8b, 0x98, 0xa5, 0xff),
            avatar_bg: rgba(0x1a, 0x1a, 0x1a, 0xff),
            avatar_placeholder_bg: rgba(0x33, 0x33, 0x33, 0xff),
            avatar_placeholder_fg: rgba(0x99, 0x99, 0x99, 0xff),
        },
    }
}

/// Canvas fill color for a theme, exposed for rasterizer callers.
pub fn theme_background(theme: Theme) -> Rgba<u8> {
    palette(theme).bg
}

fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba<u8> {
    Rgba([r, g, b, a])
}

/// Render a card into an RGBA canvas at exactly the mode's dimensions times
/// the scale factor. The whole content block is centered vertically; a quote
/// taller than the canvas overflows symmetrically rather than reflowing.
pub fn render_card(record: &CardRecord, options: &CardRenderOptions) -> Result<DynamicImage> {
    let s = options.scale.clamp(1, 4);
    let pal = palette(record.theme);
    let (base_w, base_h) = options.mode.dimensions();
    let (width, height) = (base_w * s, base_h * s);

    let background = options.background.unwrap_or(pal.bg);
    let mut canvas = ImageBuffer::from_pixel(width, height, background);

    let pad = (options.mode.padding() * s) as i32;
    let content_w = width - 2 * pad as u32;

    let name_scale = font::scale_for_px(NAME_PX * s);
    let handle_scale = font::scale_for_px(HANDLE_PX * s);
    let quote_scale = font::scale_for_px(options.mode.quote_px() * s);
    let stat_scale = font::scale_for_px(STAT_PX * s);

    let name = if record.name.is_empty() {
        NAME_PLACEHOLDER
    } else {
        record.name.as_str()
    };
    let handle = if record.handle.is_empty() {
        format!("@{HANDLE_PLACEHOLDER}")
    } else {
        format!("@{}", record.handle)
    };

    let quote = if record.quote.is_empty() {
        QUOTE_PLACEHOLDER
    } else {
        record.quote.as_str()
    };
    let max_cols = (content_w / (font::GLYPH_ADVANCE * quote_scale)).max(1) as usize;
    let lines = font::wrap_text(quote, max_cols);
    let quote_advance = (font::line_height(quote_scale) as f32 * QUOTE_LINE_HEIGHT).round() as u32;
    let quote_h = lines.len() as u32 * quote_advance;

    let profile_h = (AVATAR_TOP_OFFSET + AVATAR_SIZE) * s;
    let stats_h = if record.stats.is_some() {
        STATS_TOP_MARGIN * s + (ICON_SIZE * s).max(font::line_height(stat_scale))
    } else {
        0
    };
    let total_h = profile_h + PROFILE_BOTTOM_MARGIN * s + quote_h + stats_h;
    let top = (height as i32 - total_h as i32) / 2;

    // Profile row: avatar disc, then name over handle.
    let avatar_px = AVATAR_SIZE * s;
    draw_avatar(&mut canvas, record, &pal, pad, top + (AVATAR_TOP_OFFSET * s) as i32, avatar_px);

    let text_x = pad + (avatar_px + PROFILE_GAP * s) as i32;
    draw_text(&mut canvas, text_x, top, name, pal.fg, name_scale);
    let handle_y = top + (font::line_height(name_scale) + NAME_HANDLE_GAP * s) as i32;
    draw_text(&mut canvas, text_x, handle_y, &handle, pal.muted, handle_scale);

    // Quote block, one wrapped line per advance with the glyph box centered
    // inside its line height.
    let quote_top = top + (profile_h + PROFILE_BOTTOM_MARGIN * s) as i32;
    let leading = ((quote_advance - font::line_height(quote_scale)) / 2) as i32;
    for (idx, line) in lines.iter().enumerate() {
        let y = quote_top + (idx as u32 * quote_advance) as i32 + leading;
        font::draw_text(
            &mut canvas,
            pad,
            y,
            line,
            pal.fg,
            quote_scale,
            record.emphasis,
        );
    }

    if let Some(stats) = &record.stats {
        let row_y = quote_top + (quote_h + STATS_TOP_MARGIN * s) as i32;
        draw_stats_row(&mut canvas, &pal, pad, row_y, s, stat_scale, stats);
    }

    Ok(DynamicImage::ImageRgba8(canvas))
}

fn draw_text(canvas: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>, scale: u32) {
    font::draw_text(canvas, x, y, text, color, scale, Emphasis::default());
}

fn draw_avatar(
    canvas: &mut RgbaImage,
    record: &CardRecord,
    pal: &Palette,
    x: i32,
    y: i32,
    size: u32,
) {
    let radius = (size / 2) as i32;
    let center = (x + radius, y + radius);

    match &record.avatar {
        Some(avatar) => {
            draw_filled_circle_mut(canvas, center, radius, pal.avatar_bg);
            let resized = avatar
                .resize_to_fill(size, size, FilterType::CatmullRom)
                .to_rgba8();
            let r = size as f32 / 2.0;
            for (px, py, pixel) in resized.enumerate_pixels() {
                let dx = px as f32 + 0.5 - r;
                let dy = py as f32 + 0.5 - r;
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                let (cx, cy) = (x + px as i32, y + py as i32);
                if cx >= 0 && cy >= 0 && (cx as u32) < canvas.width() && (cy as u32) < canvas.height()
                {
                    canvas.put_pixel(cx as u32, cy as u32, *pixel);
                }
            }
        }
        None => {
            draw_filled_circle_mut(canvas, center, radius, pal.avatar_placeholder_bg);
            let initial = record
                .name
                .chars()
                .next()
                .map(|ch| ch.to_uppercase().next().unwrap_or(ch))
                .unwrap_or('?');
            let scale = font::scale_for_px(INITIAL_PX * (size / AVATAR_SIZE).max(1));
            let text = initial.to_string();
            let tx = center.0 - (font::measure_text(&text, scale) / 2) as i32;
            let ty = center.1 - (font::line_height(scale) / 2) as i32;
            draw_text(canvas, tx, ty, &text, pal.avatar_placeholder_fg, scale);
        }
    }
}

fn draw_stats_row(
    canvas: &mut RgbaImage,
    pal: &Palette,
    x: i32,
    y: i32,
    s: u32,
    stat_scale: u32,
    stats: &crate::stats::EngagementStats,
) {
    let icon = ICON_SIZE * s;
    let icons: [(&str, fn(&mut RgbaImage, i32, i32, u32, u32, Rgba<u8>)); 4] = [
        (stats.comments.as_str(), draw_comment_icon),
        (stats.retweets.as_str(), draw_retweet_icon),
        (stats.likes.as_str(), draw_heart_icon),
        (stats.views.as_str(), draw_bars_icon),
    ];

    let mut cursor = x;
    for (value, draw_icon) in icons {
        draw_icon(canvas, cursor, y, icon, s, pal.stat);
        let text_x = cursor + (icon + ICON_TEXT_GAP * s) as i32;
        let text_y = y + ((icon - font::line_height(stat_scale)) / 2) as i32;
        draw_text(canvas, text_x, text_y, value, pal.stat, stat_scale);
        cursor = text_x
            + (font::measure_text(value, stat_scale) + STATS_GROUP_GAP * s) as i32;
    }
}

// Stylised engagement icons. Stroke thickness tracks the render scale.

fn stroke(canvas: &mut RgbaImage, from: (f32, f32), to: (f32, f32), width: u32, color: Rgba<u8>) {
    let horizontal = (to.0 - from.0).abs() >= (to.1 - from.1).abs();
    for o in 0..width.max(1) {
        let o = o as f32;
        if horizontal {
            draw_line_segment_mut(canvas, (from.0, from.1 + o), (to.0, to.1 + o), color);
        } else {
            draw_line_segment_mut(canvas, (from.0 + o, from.1), (to.0 + o, to.1), color);
        }
    }
}

fn draw_comment_icon(canvas: &mut RgbaImage, x: i32, y: i32, size: u32, s: u32, color: Rgba<u8>) {
    let (x, y, size) = (x as f32, y as f32, size as f32);
    let w = (2 * s).max(2);
    let bottom = y + size * 0.72;
    stroke(canvas, (x, y), (x + size, y), w, color);
    stroke(canvas, (x, bottom), (x + size, bottom), w, color);
    stroke(canvas, (x, y), (x, bottom), w, color);
    stroke(canvas, (x + size, y), (x + size, bottom), w, color);
    // Tail towards the speaker.
    stroke(
        canvas,
        (x + size * 0.2, bottom),
        (x + size * 0.08, y + size * 0.95),
        w,
        color,
    );
}

fn draw_retweet_icon(canvas: &mut RgbaImage, x: i32, y: i32, size: u32, s: u32, color: Rgba<u8>) {
    let (x, y, size) = (x as f32, y as f32, size as f32);
    let w = (2 * s).max(2);
    let top = y + size * 0.28;
    let bottom = y + size * 0.72;
    // Upper arrow pointing right.
    stroke(canvas, (x + size * 0.1, top), (x + size * 0.82, top), w, color);
    stroke(canvas, (x + size * 0.62, y + size * 0.08), (x + size * 0.85, top), w, color);
    stroke(canvas, (x + size * 0.62, y + size * 0.48), (x + size * 0.85, top), w, color);
    // Lower arrow pointing left.
    stroke(canvas, (x + size * 0.18, bottom), (x + size * 0.9, bottom), w, color);
    stroke(canvas, (x + size * 0.38, y + size * 0.52), (x + size * 0.15, bottom), w, color);
    stroke(canvas, (x + size * 0.38, y + size * 0.92), (x + size * 0.15, bottom), w, color);
}

fn draw_heart_icon(canvas: &mut RgbaImage, x: i32, y: i32, size: u32, _s: u32, color: Rgba<u8>) {
    let r = (size as f32 * 0.24) as i32;
    let lobe_y = y + (size as f32 * 0.32) as i32;
    draw_filled_circle_mut(canvas, (x + (size as f32 * 0.3) as i32, lobe_y), r, color);
    draw_filled_circle_mut(canvas, (x + (size as f32 * 0.7) as i32, lobe_y), r, color);
    // Lower wedge, drawn as shrinking horizontal spans.
    let wedge_top = lobe_y;
    let wedge_bottom = y + (size as f32 * 0.95) as i32;
    let half = size as f32 * 0.44;
    let rows = (wedge_bottom - wedge_top).max(1);
    for row in 0..rows {
        let t = row as f32 / rows as f32;
        let span = half * (1.0 - t);
        let cx = x as f32 + size as f32 / 2.0;
        let yy = (wedge_top + row) as f32;
        draw_line_segment_mut(canvas, (cx - span, yy), (cx + span, yy), color);
    }
}

fn draw_bars_icon(canvas: &mut RgbaImage, x: i32, y: i32, size: u32, s: u32, color: Rgba<u8>) {
    let bar_w = (3 * s).max(3);
    let bottom = y + size as i32;
    let heights = [0.35f32, 0.85, 0.55];
    for (idx, h) in heights.iter().enumerate() {
        let bx = x + (size as f32 * (0.12 + idx as f32 * 0.34)) as i32;
        let bar_h = (size as f32 * h) as u32;
        draw_filled_rect_mut(
            canvas,
            Rect::at(bx, bottom - bar_h as i32).of_size(bar_w, bar_h),
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardRecord, Emphasis, Theme};
    use pretty_assertions::assert_eq;

    fn record(theme: Theme) -> CardRecord {
        CardRecord {
            avatar: None,
            name: "Ada".to_string(),
            handle: "ada".to_string(),
            quote: "Una frase corta".to_string(),
            emphasis: Emphasis::default(),
            theme,
            stats: None,
        }
    }

    #[test]
    fn canvas_matches_mode_dimensions() {
        for mode in [AspectMode::Square, AspectMode::Vertical] {
            let image = render_card(&record(Theme::Light), &CardRenderOptions::new(mode))
                .unwrap()
                .to_rgba8();
            assert_eq!(image.dimensions(), mode.dimensions());
        }
    }

    #[test]
    fn scale_multiplies_dimensions() {
        let options = CardRenderOptions {
            scale: 2,
            ..CardRenderOptions::new(AspectMode::Square)
        };
        let image = render_card(&record(Theme::Light), &options).unwrap().to_rgba8();
        assert_eq!(image.dimensions(), (2160, 2160));
    }

    #[test]
    fn theme_sets_background_corners() {
        let light = render_card(
            &record(Theme::Light),
            &CardRenderOptions::new(AspectMode::Square),
        )
        .unwrap()
        .to_rgba8();
        let dark = render_card(
            &record(Theme::Dark),
            &CardRenderOptions::new(AspectMode::Square),
        )
        .unwrap()
        .to_rgba8();
        assert_eq!(light.get_pixel(0, 0), &Rgba([0xff, 0xff, 0xff, 0xff]));
        assert_eq!(dark.get_pixel(0, 0), &Rgba([0x00, 0x00, 0x00, 0xff]));
    }

    #[test]
    fn background_override_wins() {
        let options = CardRenderOptions {
            background: Some(Rgba([1, 2, 3, 255])),
            ..CardRenderOptions::new(AspectMode::Square)
        };
        let image = render_card(&record(Theme::Light), &options).unwrap().to_rgba8();
        assert_eq!(image.get_pixel(5, 5), &Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn quote_text_marks_the_canvas() {
        let blank = CardRecord {
            quote: String::new(),
            name: String::new(),
            ..record(Theme::Light)
        };
        let with_text = record(Theme::Light);
        let a = render_card(&blank, &CardRenderOptions::new(AspectMode::Square)).unwrap();
        let b = render_card(&with_text, &CardRenderOptions::new(AspectMode::Square)).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn stats_row_changes_the_canvas() {
        let plain = record(Theme::Dark);
        let with_stats = CardRecord {
            stats: Some(crate::stats::EngagementStats {
                comments: "12".into(),
                retweets: "34".into(),
                likes: "1.2K".into(),
                views: "45.6K".into(),
            }),
            ..record(Theme::Dark)
        };
        let a = render_card(&plain, &CardRenderOptions::new(AspectMode::Square)).unwrap();
        let b = render_card(&with_stats, &CardRenderOptions::new(AspectMode::Square)).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }
}
