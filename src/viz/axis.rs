//! Axes and titles.
//!
//! The bottom axis sits at `y = plot_height` and reads the time scale; the
//! left axis sits at `x = 0` and reads the value scale. Both follow the usual
//! layout: outward 6px ticks, labels 3px past the tick, a domain line with
//! end caps.
use super::scale::{Layout, Scales};
use super::surface::{Node, NodeId, Surface, TextAnchor, TextSpec};
use super::theme;
use super::ticks::{NumberFormat, format_time_tick, linear_ticks, tick_step, time_ticks};
use crate::config::ChartConfig;
use crate::models::SeriesDocument;

pub const TICK_SIZE: f64 = 6.0;
pub const TICK_PADDING: f64 = 3.0;

/// Node handles for what the axis renderer created.
#[derive(Debug, Clone)]
pub struct AxisNodes {
    pub x_axis: NodeId,
    pub y_axis: NodeId,
    pub x_title: NodeId,
    pub y_title: NodeId,
    pub title: NodeId,
}

/// Draw both axes and the three titles under `plot` (the margin-translated group).
pub fn render_axes(
    surface: &mut Surface,
    plot: NodeId,
    layout: &Layout,
    scales: &Scales,
    doc: &SeriesDocument,
    config: &ChartConfig,
) -> AxisNodes {
    let (w, h) = (layout.plot_width, layout.plot_height);

    let x_axis = render_bottom_axis(surface, plot, h, scales, config.x_ticks);
    let x_title = surface.append(
        plot,
        Node::text(
            TextSpec::new(doc.x_label.as_str(), w / 2.0, h + layout.margins.bottom)
                .anchor(TextAnchor::Middle),
        )
        .fill(theme::TEXT),
    );

    let y_axis = render_left_axis(surface, plot, scales, config);
    // rotate(-90) around the plot origin: centered on the plot height, hugging
    // the left edge of the surface.
    let y_title = surface.append(
        plot,
        Node::text(
            TextSpec::new(doc.y_label.as_str(), -layout.margins.left, h / 2.0)
                .anchor(TextAnchor::Middle)
                .offset(0.0, 1.0)
                .rotated(),
        )
        .fill(theme::TEXT),
    );

    let title = surface.append(
        plot,
        Node::text(
            TextSpec::new(doc.title.as_str(), w / 2.0, 0.0)
                .anchor(TextAnchor::Middle)
                .offset(0.0, -1.0)
                .font_scale(1.5),
        )
        .fill(theme::TEXT),
    );

    AxisNodes {
        x_axis,
        y_axis,
        x_title,
        y_title,
        title,
    }
}

fn render_bottom_axis(
    surface: &mut Surface,
    plot: NodeId,
    plot_height: f64,
    scales: &Scales,
    count: usize,
) -> NodeId {
    let axis = surface.append(
        plot,
        Node::group()
            .class("x axis")
            .translate(0.0, plot_height)
            .fill(theme::STEELBLUE),
    );

    let (start, end) = scales.x.domain();
    for t in time_ticks(start, end, count) {
        let tick = surface.append(
            axis,
            Node::group().class("tick").translate(scales.x.map(t), 0.0),
        );
        surface.append(
            tick,
            Node::polyline(vec![(0.0, 0.0), (0.0, TICK_SIZE)]).stroke(theme::AXIS_STROKE, 1.0),
        );
        surface.append(
            tick,
            Node::text(
                TextSpec::new(format_time_tick(t), 0.0, TICK_SIZE + TICK_PADDING)
                    .anchor(TextAnchor::Middle)
                    .offset(0.0, 0.71),
            )
            .fill(theme::STEELBLUE),
        );
    }

    let (r0, r1) = scales.x.range();
    surface.append(
        axis,
        Node::polyline(vec![(r0, TICK_SIZE), (r0, 0.0), (r1, 0.0), (r1, TICK_SIZE)])
            .class("domain")
            .stroke(theme::AXIS_STROKE, 1.0),
    );
    axis
}

fn render_left_axis(
    surface: &mut Surface,
    plot: NodeId,
    scales: &Scales,
    config: &ChartConfig,
) -> NodeId {
    let axis = surface.append(plot, Node::group().class("y axis").fill(theme::STEELBLUE));

    let (d0, d1) = scales.y.domain();
    let format = NumberFormat::for_step(tick_step(d0, d1, config.y_ticks), &config.locale);
    for v in linear_ticks(d0, d1, config.y_ticks) {
        let tick = surface.append(
            axis,
            Node::group().class("tick").translate(0.0, scales.y.map(v)),
        );
        surface.append(
            tick,
            Node::polyline(vec![(0.0, 0.0), (-TICK_SIZE, 0.0)]).stroke(theme::AXIS_STROKE, 1.0),
        );
        surface.append(
            tick,
            Node::text(
                TextSpec::new(format.format(v), -(TICK_SIZE + TICK_PADDING), 0.0)
                    .anchor(TextAnchor::End)
                    .offset(0.0, 0.32),
            )
            .fill(theme::STEELBLUE),
        );
    }

    let (r0, r1) = scales.y.range();
    surface.append(
        axis,
        Node::polyline(vec![(-TICK_SIZE, r0), (0.0, r0), (0.0, r1), (-TICK_SIZE, r1)])
            .class("domain")
            .stroke(theme::AXIS_STROKE, 1.0),
    );
    axis
}

/// Text of every tick label under an axis group, in order.
pub fn tick_labels(surface: &Surface, axis: NodeId) -> Vec<String> {
    surface
        .node(axis)
        .children()
        .iter()
        .filter(|id| surface.node(**id).has_class("tick"))
        .filter_map(|tick| {
            surface
                .node(*tick)
                .children()
                .iter()
                .find_map(|c| surface.node(*c).text_content().map(str::to_string))
        })
        .collect()
}
