//! Hover tooltip: an anchor circle plus value and date labels.
//!
//! Each label is drawn twice, a dark outline copy underneath a white fill
//! copy, so it stays readable over the line and the markers. The copies always
//! share text and position.
use chrono::NaiveDate;

use super::nearest::nearest_to_pointer;
use super::scale::Scales;
use super::surface::{Node, NodeId, Surface, TextSpec};
use super::theme;
use crate::models::Sample;

/// Labels sit this far left of and above the anchored point.
pub const LABEL_SHIFT: (f64, f64) = (-100.0, -30.0);
/// Per-copy offset applied inside the shifted frame.
pub const LABEL_DX: f64 = 8.0;
pub const VALUE_DY_EM: f64 = -0.3;
pub const DATE_DY_EM: f64 = 1.0;

const OUTLINE_WIDTH: f64 = 3.5;
const OUTLINE_OPACITY: f64 = 0.8;

/// Rounds half toward positive infinity (`2.5 -> 3`, `-2.5 -> -2`).
fn round_half_up(v: f64) -> f64 {
    let f = v.floor();
    let r = if v - f >= 0.5 { f + 1.0 } else { f };
    // -0.0 would print as "-0"
    if r == 0.0 { 0.0 } else { r }
}

/// `"17 kg"` for `17.4` and `"kg"`.
pub fn value_label(value: f64, unit: &str) -> String {
    format!("{} {}", round_half_up(value), unit)
}

/// `"05 Mar"`.
pub fn date_label(date: NaiveDate) -> String {
    date.format("%d %b").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TooltipState {
    pub visible: bool,
    pub anchored: Option<Sample>,
}

#[derive(Debug, Clone, Copy)]
struct LabelPair {
    outline: NodeId,
    fill: NodeId,
}

impl LabelPair {
    fn attach(surface: &mut Surface, focus: NodeId, class: (&str, &str), dy_em: f64) -> Self {
        let spec = TextSpec::new("", 0.0, 0.0).offset(LABEL_DX, dy_em);
        let outline = surface.append(
            focus,
            Node::text(spec.clone())
                .class(class.0)
                .stroke(theme::OUTLINE, OUTLINE_WIDTH)
                .opacity(OUTLINE_OPACITY),
        );
        let fill = surface.append(focus, Node::text(spec).class(class.1).fill(theme::TEXT));
        Self { outline, fill }
    }

    fn update(&self, surface: &mut Surface, text: &str, at: (f64, f64)) {
        for id in [self.outline, self.fill] {
            surface.set_text(id, text);
            surface.set_translate(id, at.0, at.1);
        }
    }
}

/// Two states, three transitions: `enter`, `move_to`, `leave`.
#[derive(Debug, Clone)]
pub struct TooltipController {
    focus: NodeId,
    marker: NodeId,
    value: LabelPair,
    date: LabelPair,
    state: TooltipState,
}

impl TooltipController {
    /// Create the (hidden) overlay nodes under `plot`.
    pub fn attach(surface: &mut Surface, plot: NodeId, focus_radius: f64) -> Self {
        let focus = surface.append(plot, Node::group().class("focus").hidden(true));
        let marker = surface.append(
            focus,
            Node::circle(0.0, 0.0, focus_radius)
                .class("y")
                .fill(theme::STEELBLUE)
                .stroke(theme::TEXT, 3.0),
        );
        let value = LabelPair::attach(surface, focus, ("y1", "y2"), VALUE_DY_EM);
        let date = LabelPair::attach(surface, focus, ("y3", "y4"), DATE_DY_EM);
        Self {
            focus,
            marker,
            value,
            date,
            state: TooltipState::default(),
        }
    }

    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    pub fn focus_node(&self) -> NodeId {
        self.focus
    }

    pub fn marker_node(&self) -> NodeId {
        self.marker
    }

    /// Outline and fill node of the value label.
    pub fn value_nodes(&self) -> [NodeId; 2] {
        [self.value.outline, self.value.fill]
    }

    /// Outline and fill node of the date label.
    pub fn date_nodes(&self) -> [NodeId; 2] {
        [self.date.outline, self.date.fill]
    }

    /// Hidden -> Visible.
    pub fn enter(&mut self, surface: &mut Surface) {
        self.state.visible = true;
        surface.set_hidden(self.focus, false);
    }

    /// Visible -> Hidden.
    pub fn leave(&mut self, surface: &mut Surface) {
        self.state.visible = false;
        surface.set_hidden(self.focus, true);
    }

    /// Re-anchor on the sample nearest to plot-area x `px`.
    ///
    /// Ignored while hidden. Returns the newly anchored sample.
    pub fn move_to(
        &mut self,
        surface: &mut Surface,
        px: f64,
        samples: &[Sample],
        scales: &Scales,
        unit: &str,
    ) -> Option<Sample> {
        if !self.state.visible {
            return None;
        }
        let sample = *nearest_to_pointer(samples, &scales.x, px)?;

        let (x, y) = scales.project(sample.timestamp, sample.value);
        surface.set_translate(self.marker, x, y);

        let at = (x + LABEL_SHIFT.0, y + LABEL_SHIFT.1);
        self.value
            .update(surface, &value_label(sample.value, unit), at);
        self.date.update(surface, &date_label(sample.timestamp), at);

        self.state.anchored = Some(sample);
        Some(sample)
    }
}
