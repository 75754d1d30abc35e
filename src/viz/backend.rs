//! Paint a [`Surface`] onto any Plotters backend.
//!
//! Plotters cannot stroke text, so an outline-only text node is approximated
//! by stamping it at eight small offsets around its anchor; the fill copy on
//! top then reads as haloed text.
//!
//! Text metrics follow the SVG backend, which shrinks font sizes by 1.24 and
//! offsets each anchor by a fixed em fraction; both are undone here.
use super::surface::{Placed, Shape, Surface, TextAnchor, TextSpec};
use crate::error::{ChartError, Result};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_svg::SVGBackend;

use std::path::Path;

fn render_err<E: std::fmt::Debug>(e: E) -> ChartError {
    ChartError::Render(format!("{e:?}"))
}

fn px(v: f64) -> i32 {
    v.round() as i32
}

/// Paint every visible node, background first, in tree order.
pub fn paint<DB>(surface: &Surface, area: &DrawingArea<DB, Shift>) -> Result<()>
where
    DB: DrawingBackend,
{
    if let Some(bg) = surface.background {
        area.fill(&bg).map_err(render_err)?;
    }
    let font_px = surface.font_px();
    let mut failure: Option<ChartError> = None;
    surface.walk(|placed, _| {
        if failure.is_none()
            && let Err(e) = paint_node(area, placed, font_px)
        {
            failure = Some(e);
        }
    });
    failure.map_or(Ok(()), Err)
}

fn paint_node<DB>(area: &DrawingArea<DB, Shift>, placed: Placed<'_>, font_px: f64) -> Result<()>
where
    DB: DrawingBackend,
{
    let style = &placed.node.style;
    let (ox, oy) = placed.origin;
    let stroke = style.stroke.map(|c| {
        c.mix(style.opacity)
            .stroke_width(style.stroke_width.round().max(1.0) as u32)
    });
    let fill = style.fill.map(|c| c.mix(style.opacity).filled());

    match &placed.node.shape {
        Shape::Group => {}
        Shape::Polyline(points) => {
            if let Some(st) = stroke {
                let pts: Vec<(i32, i32)> = points
                    .iter()
                    .map(|(x, y)| (px(ox + x), px(oy + y)))
                    .collect();
                area.draw(&PathElement::new(pts, st)).map_err(render_err)?;
            }
        }
        Shape::Circle { cx, cy, r } => {
            let center = (px(ox + cx), px(oy + cy));
            if let Some(st) = fill {
                area.draw(&Circle::new(center, px(*r), st)).map_err(render_err)?;
            }
            if let Some(st) = stroke {
                area.draw(&Circle::new(center, px(*r), st)).map_err(render_err)?;
            }
        }
        Shape::Rect {
            x,
            y,
            width,
            height,
        } => {
            let corners = [
                (px(ox + x), px(oy + y)),
                (px(ox + x + width), px(oy + y + height)),
            ];
            if let Some(st) = fill {
                area.draw(&Rectangle::new(corners, st)).map_err(render_err)?;
            }
            if let Some(st) = stroke {
                area.draw(&Rectangle::new(corners, st)).map_err(render_err)?;
            }
        }
        Shape::Text(spec) => {
            if spec.content.is_empty() {
                return Ok(());
            }
            let size = font_px * spec.font_scale;
            let (ax, ay) = text_anchor_point(spec, (ox, oy), size);
            let at = top_anchor(spec, (ax, ay), size);
            if let Some(c) = style.fill {
                draw_text(area, spec, at, size, c.mix(style.opacity))?;
            } else if let Some(c) = style.stroke {
                let r = (style.stroke_width / 2.0).max(1.0).round() as i32;
                for (dx, dy) in HALO {
                    let stamp = (at.0 + dx * r, at.1 + dy * r);
                    draw_text(area, spec, stamp, size, c.mix(style.opacity))?;
                }
            }
        }
    }
    Ok(())
}

/// Unit offsets used to stamp outline-only text.
pub const HALO: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// The SVG backend writes `font-size = size / 1.24`.
const SVG_FONT_SCALE: f64 = 1.24;
/// The SVG backend shifts `VPos::Top` text down by this many em.
const SVG_TOP_DY_EM: f64 = 0.76;

/// Rounded drawing position that puts the baseline back on `(ax, ay)` once
/// the backend applies its `VPos::Top` shift, which runs across the text.
fn top_anchor(spec: &TextSpec, (ax, ay): (f64, f64), size: f64) -> (i32, i32) {
    let shift = SVG_TOP_DY_EM * size;
    if spec.rotated {
        (px(ax - shift), px(ay))
    } else {
        (px(ax), px(ay - shift))
    }
}

/// Baseline anchor of a text node in surface pixels.
///
/// `dx` runs along the text and `dy` across it, so for rotated text they map
/// to screen -y and +x respectively.
pub fn text_anchor_point(spec: &TextSpec, origin: (f64, f64), font_size: f64) -> (f64, f64) {
    let dy = spec.dy_em * font_size;
    let (x, y) = (origin.0 + spec.x, origin.1 + spec.y);
    if spec.rotated {
        (x + dy, y - spec.dx)
    } else {
        (x + spec.dx, y + dy)
    }
}

fn draw_text<DB>(
    area: &DrawingArea<DB, Shift>,
    spec: &TextSpec,
    at: (i32, i32),
    size: f64,
    color: RGBAColor,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let h = match spec.anchor {
        TextAnchor::Start => HPos::Left,
        TextAnchor::Middle => HPos::Center,
        TextAnchor::End => HPos::Right,
    };
    let mut style = ("sans-serif", size * SVG_FONT_SCALE)
        .into_font()
        .color(&color)
        .pos(Pos::new(h, VPos::Top));
    if spec.rotated {
        style = style.transform(FontTransform::Rotate270);
    }
    area.draw(&Text::new(spec.content.as_str(), at, style))
        .map_err(render_err)?;
    Ok(())
}

/// Escape text for use inside XML/HTML attributes and content.
pub(crate) fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the surface as a standalone SVG document; the root element carries
/// the surface id.
pub fn to_svg_string(surface: &Surface) -> Result<String> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, surface.size()).into_drawing_area();
        paint(surface, &root)?;
        root.present().map_err(render_err)?;
    }
    let tagged = match buf.find("<svg") {
        Some(at) => {
            let id_attr = format!(" id=\"{}\"", xml_escape(surface.id()));
            let mut s = buf;
            s.insert_str(at + "<svg".len(), &id_attr);
            s
        }
        None => buf,
    };
    Ok(tagged)
}

/// Write the surface to an `.svg` file.
pub fn write_svg<P: AsRef<Path>>(surface: &Surface, out_path: P) -> Result<()> {
    let out_path = out_path.as_ref();
    let svg = to_svg_string(surface)?;
    std::fs::write(out_path, svg)?;
    log::info!("wrote {}", out_path.display());
    Ok(())
}
