//! Chart orchestration: layout, scales, drawing, and pointer routing.
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use super::axis::{AxisNodes, render_axes};
use super::path::render_series;
use super::scale::{Layout, Scales, build_scales};
use super::surface::{Node, NodeId, Surface};
use super::theme;
use super::tooltip::TooltipController;
use crate::config::ChartConfig;
use crate::error::{ChartError, Result};
use crate::loader::Loader;
use crate::models::{Sample, SeriesDocument};

/// Pointer transitions over the chart's hit-testing overlay.
///
/// `Move` carries the x coordinate in plot-area pixels (surface x minus the
/// left margin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Enter,
    Move { x: f64 },
    Leave,
}

/// One chart: owns its document, geometry, drawing surface and tooltip.
///
/// Layout and scales are fixed at construction; there is no resize.
#[derive(Debug, Clone)]
pub struct ChartController {
    doc: SeriesDocument,
    config: ChartConfig,
    layout: Layout,
    scales: Scales,
    surface: Surface,
    plot: NodeId,
    overlay: NodeId,
    line: NodeId,
    axes: AxisNodes,
    tooltip: TooltipController,
    pointer_inside: bool,
}

impl ChartController {
    /// Build the full static chart for `doc` at `container_width`.
    ///
    /// Validation (empty series, degenerate layout) happens before the surface
    /// is created, so an error never leaves a partial drawing behind.
    pub fn build(
        id: &str,
        container_width: u32,
        doc: SeriesDocument,
        config: ChartConfig,
    ) -> Result<Self> {
        let (layout, scales) = build_scales(container_width, &doc, &config)?;

        let (w, h) = layout.surface_size();
        let mut surface = Surface::new(id, w, h, config.font_px);
        surface.background = Some(theme::BACKGROUND);

        let root = surface.root();
        let plot = surface.append(
            root,
            Node::group()
                .class("plot")
                .translate(layout.margins.left, layout.margins.top),
        );

        let line = render_series(
            &mut surface,
            plot,
            &doc.samples,
            &scales,
            config.marker_radius,
        );
        let tooltip = TooltipController::attach(&mut surface, plot, config.focus_radius);
        let overlay = surface.append(
            plot,
            Node::rect(0.0, 0.0, w as f64, h as f64).class("overlay"),
        );
        let axes = render_axes(&mut surface, plot, &layout, &scales, &doc, &config);

        log::info!(
            "built chart `{}` ({} samples, {}x{})",
            id,
            doc.samples.len(),
            w,
            h
        );

        Ok(Self {
            doc,
            config,
            layout,
            scales,
            surface,
            plot,
            overlay,
            line,
            axes,
            tooltip,
            pointer_inside: false,
        })
    }

    /// Load `source` and build; the load error aborts before any drawing.
    pub fn load(
        loader: &Loader,
        source: &str,
        id: &str,
        container_width: u32,
        config: ChartConfig,
    ) -> Result<Self> {
        let doc = loader.load(source)?;
        Self::build(id, container_width, doc, config)
    }

    pub fn document(&self) -> &SeriesDocument {
        &self.doc
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn scales(&self) -> &Scales {
        &self.scales
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn tooltip(&self) -> &TooltipController {
        &self.tooltip
    }

    pub fn axes(&self) -> &AxisNodes {
        &self.axes
    }

    pub fn plot_node(&self) -> NodeId {
        self.plot
    }

    pub fn line_node(&self) -> NodeId {
        self.line
    }

    pub fn overlay_node(&self) -> NodeId {
        self.overlay
    }

    /// Apply one pointer transition; returns the anchored sample after a move.
    pub fn handle(&mut self, event: PointerEvent) -> Option<Sample> {
        match event {
            PointerEvent::Enter => {
                self.tooltip.enter(&mut self.surface);
                None
            }
            PointerEvent::Move { x } => self.tooltip.move_to(
                &mut self.surface,
                x,
                &self.doc.samples,
                &self.scales,
                &self.doc.unit,
            ),
            PointerEvent::Leave => {
                self.tooltip.leave(&mut self.surface);
                None
            }
        }
    }

    /// Whether surface point `(sx, sy)` is over the overlay.
    ///
    /// The overlay starts at the plot origin and is as large as the surface,
    /// so the usable region is the surface minus the top and left margins.
    pub fn hit_test(&self, sx: f64, sy: f64) -> bool {
        let (w, h) = self.surface.size();
        let m = self.layout.margins;
        sx >= m.left && sy >= m.top && sx <= w as f64 && sy <= h as f64
    }

    /// Feed a raw pointer position in surface pixels.
    ///
    /// Emits `Enter` when the pointer crosses into the overlay, `Move` while it
    /// stays inside and `Leave` once it exits.
    pub fn pointer_at(&mut self, sx: f64, sy: f64) -> Option<Sample> {
        let inside = self.hit_test(sx, sy);
        match (self.pointer_inside, inside) {
            (false, true) => {
                self.pointer_inside = true;
                self.handle(PointerEvent::Enter);
                self.handle(PointerEvent::Move {
                    x: sx - self.layout.margins.left,
                })
            }
            (true, true) => self.handle(PointerEvent::Move {
                x: sx - self.layout.margins.left,
            }),
            (true, false) => {
                self.pointer_left();
                None
            }
            (false, false) => None,
        }
    }

    /// The pointer left the host (window or page) entirely.
    pub fn pointer_left(&mut self) {
        if self.pointer_inside {
            self.pointer_inside = false;
            self.handle(PointerEvent::Leave);
        }
    }

    /// Current value label text, empty until the first move.
    pub fn value_label_text(&self) -> &str {
        self.surface
            .node(self.tooltip.value_nodes()[1])
            .text_content()
            .unwrap_or_default()
    }

    /// Current date label text, empty until the first move.
    pub fn date_label_text(&self) -> &str {
        self.surface
            .node(self.tooltip.date_nodes()[1])
            .text_content()
            .unwrap_or_default()
    }
}

/// A chart whose document is still loading on a worker thread.
///
/// The UI thread polls; once the document arrives the chart is built there,
/// against the container width measured at that moment. Dropping the pending
/// handle drops the receiver, so a late result is discarded by the worker's
/// failed send and never touches a surface.
#[derive(Debug)]
pub struct PendingChart {
    id: String,
    source: String,
    config: ChartConfig,
    rx: Option<Receiver<Result<SeriesDocument>>>,
}

impl PendingChart {
    pub fn spawn(loader: Loader, source: &str, id: &str, config: ChartConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker_source = source.to_string();
        thread::spawn(move || {
            let result = loader.load(&worker_source);
            if tx.send(result).is_err() {
                log::debug!("chart for {worker_source} was dropped before its data arrived");
            }
        });
        Self {
            id: id.to_string(),
            source: source.to_string(),
            config,
            rx: Some(rx),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_pending(&self) -> bool {
        self.rx.is_some()
    }

    /// `None` while loading (or after the result was taken), then the chart
    /// or the load/validation error exactly once.
    pub fn poll(&mut self, container_width: u32) -> Option<Result<ChartController>> {
        let rx = self.rx.as_ref()?;
        let result = match rx.try_recv() {
            Ok(doc) => doc.and_then(|doc| {
                ChartController::build(&self.id, container_width, doc, self.config.clone())
            }),
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(ChartError::fetch(
                self.source.as_str(),
                "loader thread stopped without a result",
            )),
        };
        self.rx = None;
        Some(result)
    }
}
