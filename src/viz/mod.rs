//! Chart core: scales, axes, the series line, and the hover tooltip.
//!
//! - Time (x) and value (y) scales derived once from the data extent
//! - Calendar-aware time ticks and locale-aware value ticks
//! - A retained [`Surface`] the renderers draw into and the tooltip mutates
//! - Nearest-sample lookup by bisection over the sorted dates
//! - Painting to any Plotters backend (SVG output)

pub mod axis;
pub mod backend;
pub mod chart;
pub mod nearest;
pub mod path;
pub mod scale;
pub mod surface;
pub mod theme;
pub mod ticks;
pub mod tooltip;

pub use backend::{paint, to_svg_string, write_svg};
pub use chart::{ChartController, PendingChart, PointerEvent};
pub use nearest::nearest_sample;
pub use scale::{Layout, LinearScale, Scales, TimeScale, build_scales};
pub use surface::{Node, NodeId, Surface};
pub use tooltip::{TooltipController, TooltipState, date_label, value_label};

use crate::config::ChartConfig;
use crate::error::Result;
use crate::loader::Loader;
use std::path::Path;

/// Load `source`, build the chart at `width` and write it as SVG.
///
/// With `hover_x`, the tooltip is shown anchored at that plot-area x first,
/// which is handy for snapshots and documentation.
pub fn render_to_file<P: AsRef<Path>>(
    source: &str,
    id: &str,
    width: u32,
    hover_x: Option<f64>,
    config: ChartConfig,
    out_path: P,
) -> Result<ChartController> {
    let mut chart = ChartController::load(&Loader::default(), source, id, width, config)?;
    if let Some(x) = hover_x {
        chart.handle(PointerEvent::Enter);
        chart.handle(PointerEvent::Move { x });
    }
    write_svg(chart.surface(), out_path)?;
    Ok(chart)
}
