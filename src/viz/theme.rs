//! Colors shared by the renderers. The chart is designed for a dark page.
use plotters::style::RGBAColor;

pub const BACKGROUND: RGBAColor = RGBAColor(0x2f, 0x35, 0x3a, 1.0);
pub const STEELBLUE: RGBAColor = RGBAColor(70, 130, 180, 1.0);
pub const TEXT: RGBAColor = RGBAColor(255, 255, 255, 1.0);
pub const OUTLINE: RGBAColor = RGBAColor(0, 0, 0, 1.0);
pub const AXIS_STROKE: RGBAColor = RGBAColor(0x8a, 0x93, 0x9b, 1.0);

/// `#rrggbb` for CSS and SVG attributes.
pub fn hex(c: RGBAColor) -> String {
    format!("#{:02x}{:02x}{:02x}", c.0, c.1, c.2)
}
