//! The series line and its point markers.
use super::scale::Scales;
use super::surface::{Node, NodeId, Surface};
use super::theme;
use crate::models::Sample;

/// Straight segments between consecutive samples, in the order given.
pub fn line_points(samples: &[Sample], scales: &Scales) -> Vec<(f64, f64)> {
    samples
        .iter()
        .map(|s| scales.project(s.timestamp, s.value))
        .collect()
}

/// Draw the line then one marker per sample; returns the line node.
pub fn render_series(
    surface: &mut Surface,
    plot: NodeId,
    samples: &[Sample],
    scales: &Scales,
    marker_radius: f64,
) -> NodeId {
    let points = line_points(samples, scales);
    let line = surface.append(
        plot,
        Node::polyline(points.clone())
            .class("line")
            .stroke(theme::STEELBLUE, 2.0),
    );
    for (x, y) in points {
        surface.append(
            plot,
            Node::circle(x, y, marker_radius)
                .class("marker")
                .fill(theme::STEELBLUE),
        );
    }
    line
}
