/*!
 * Desktop viewer for hoverchart
 *
 * Opens a series document (local file or URL), draws the chart once at the
 * width of the window and follows the mouse with the hover tooltip.
 *
 * Platform support: Windows, macOS, Linux
 */

use clap::Parser;
use eframe::egui;
use eframe::egui::epaint::TextShape;
use hoverchart::viz::backend::{HALO, text_anchor_point};
use hoverchart::viz::surface::{Placed, Shape, TextAnchor, TextSpec};
use hoverchart::{ChartConfig, ChartController, Loader, PendingChart};
use plotters::style::RGBAColor;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hoverchart-gui", version, about = "Interactive chart viewer")]
struct ViewerArgs {
    /// Path or http(s) URL to open on start.
    source: Option<String>,
    /// Fixed container width; defaults to the window width when the chart loads.
    #[arg(long)]
    width: Option<u32>,
    /// Optional TOML chart config.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), eframe::Error> {
    env_logger::init();
    let args = ViewerArgs::parse();

    let config = match ChartConfig::load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}; falling back to the default chart config");
            ChartConfig::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 420.0])
            .with_min_inner_size([400.0, 300.0])
            .with_title("hoverchart"),
        ..Default::default()
    };

    eframe::run_native(
        "hoverchart",
        options,
        Box::new(move |_cc| Ok(Box::new(ViewerApp::new(args, config)))),
    )
}

struct ViewerApp {
    source: String,
    fixed_width: Option<u32>,
    config: ChartConfig,
    loader: Loader,

    load_requested: bool,
    status_message: String,
    error_message: String,

    pending: Option<PendingChart>,
    chart: Option<ChartController>,
}

impl ViewerApp {
    fn new(args: ViewerArgs, config: ChartConfig) -> Self {
        let load_requested = args.source.is_some();
        Self {
            source: args.source.unwrap_or_default(),
            fixed_width: args.width,
            config,
            loader: Loader::default(),
            load_requested,
            status_message: String::new(),
            error_message: String::new(),
            pending: None,
            chart: None,
        }
    }

    fn start_load(&mut self) {
        let source = self.source.trim().to_string();
        if source.is_empty() {
            self.error_message = "Please enter a file path or URL".to_string();
            return;
        }
        self.chart = None;
        self.error_message.clear();
        self.status_message = format!("Loading {source}...");
        // Replacing an in-flight load drops its receiver; its result is discarded.
        self.pending = Some(PendingChart::spawn(
            self.loader.clone(),
            &source,
            "chart",
            self.config.clone(),
        ));
    }

    fn check_pending(&mut self, measured_width: u32) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        if let Some(result) = pending.poll(measured_width) {
            let source = pending.source().to_string();
            self.pending = None;
            match result {
                Ok(chart) => {
                    self.status_message = format!(
                        "{} ({} samples) from {}",
                        chart.document().title,
                        chart.document().samples.len(),
                        source
                    );
                    self.chart = Some(chart);
                }
                Err(err) => {
                    self.status_message.clear();
                    self.error_message = format!("Failed to create chart: {err}");
                }
            }
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if std::mem::take(&mut self.load_requested) {
            self.start_load();
        }
        if self.pending.is_some() {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("source").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Source:");
                let edit = ui
                    .text_edit_singleline(&mut self.source)
                    .on_hover_text("Path to a JSON document or an http(s) URL");
                if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    self.start_load();
                }
                if ui.button("Browse").clicked()
                    && let Some(path) = rfd::FileDialog::new()
                        .add_filter("JSON", &["json"])
                        .pick_file()
                {
                    self.source = path.to_string_lossy().to_string();
                    self.start_load();
                }
                if ui
                    .add_enabled(self.pending.is_none(), egui::Button::new("Load"))
                    .clicked()
                {
                    self.start_load();
                }
                if self.pending.is_some() {
                    ui.spinner();
                }
            });
            if !self.status_message.is_empty() {
                ui.label(&self.status_message);
            }
            if !self.error_message.is_empty() {
                ui.colored_label(egui::Color32::RED, &self.error_message);
            }
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(to_color32(
                hoverchart::viz::theme::BACKGROUND,
                1.0,
            )))
            .show(ctx, |ui| {
                let measured = self
                    .fixed_width
                    .unwrap_or_else(|| ui.available_width().floor().max(0.0) as u32);
                self.check_pending(measured);

                if let Some(chart) = self.chart.as_mut() {
                    egui::ScrollArea::both().show(ui, |ui| paint_chart(ui, chart));
                }
            });
    }
}

fn to_color32(c: RGBAColor, opacity: f64) -> egui::Color32 {
    let alpha = (c.3 * opacity).clamp(0.0, 1.0) * 255.0;
    egui::Color32::from_rgba_unmultiplied(c.0, c.1, c.2, alpha.round() as u8)
}

/// Route the pointer into the chart, then draw its current surface.
fn paint_chart(ui: &mut egui::Ui, chart: &mut ChartController) {
    let (w, h) = chart.surface().size();
    let (response, painter) =
        ui.allocate_painter(egui::vec2(w as f32, h as f32), egui::Sense::hover());
    let offset = response.rect.min;

    match response.hover_pos() {
        Some(pos) => {
            chart.pointer_at((pos.x - offset.x) as f64, (pos.y - offset.y) as f64);
        }
        None => chart.pointer_left(),
    }

    let surface = chart.surface();
    if let Some(bg) = surface.background {
        painter.rect_filled(response.rect, 0.0, to_color32(bg, 1.0));
    }
    let font_px = surface.font_px();
    surface.walk(|placed, _| paint_node(&painter, offset, placed, font_px));
}

fn paint_node(painter: &egui::Painter, offset: egui::Pos2, placed: Placed<'_>, font_px: f64) {
    let style = &placed.node.style;
    let (ox, oy) = placed.origin;
    let at = |x: f64, y: f64| egui::pos2(offset.x + (ox + x) as f32, offset.y + (oy + y) as f32);
    let stroke = style
        .stroke
        .map(|c| egui::Stroke::new(style.stroke_width as f32, to_color32(c, style.opacity)));
    let fill = style.fill.map(|c| to_color32(c, style.opacity));

    match &placed.node.shape {
        Shape::Group => {}
        Shape::Polyline(points) => {
            if let Some(st) = stroke {
                let pts = points.iter().map(|&(x, y)| at(x, y)).collect();
                painter.add(egui::Shape::line(pts, st));
            }
        }
        Shape::Circle { cx, cy, r } => {
            painter.circle(
                at(*cx, *cy),
                *r as f32,
                fill.unwrap_or(egui::Color32::TRANSPARENT),
                stroke.unwrap_or(egui::Stroke::NONE),
            );
        }
        Shape::Rect {
            x,
            y,
            width,
            height,
        } => {
            let rect = egui::Rect::from_min_size(at(*x, *y), egui::vec2(*width as f32, *height as f32));
            if let Some(c) = fill {
                painter.rect_filled(rect, 0.0, c);
            }
            if let Some(st) = stroke {
                painter.rect_stroke(rect, 0.0, st);
            }
        }
        Shape::Text(spec) => {
            if spec.content.is_empty() {
                return;
            }
            let size = font_px * spec.font_scale;
            let (ax, ay) = text_anchor_point(spec, (ox, oy), size);
            let anchor = egui::pos2(offset.x + ax as f32, offset.y + ay as f32);
            if let Some(c) = fill {
                paint_text(painter, spec, anchor, size, c);
            } else if let Some(st) = stroke {
                let r = (style.stroke_width / 2.0).max(1.0).round() as f32;
                for (dx, dy) in HALO {
                    let shifted = anchor + egui::vec2(dx as f32 * r, dy as f32 * r);
                    paint_text(painter, spec, shifted, size, st.color);
                }
            }
        }
    }
}

/// Draw text with its baseline anchor at `anchor`; rotated text reads bottom to top.
fn paint_text(
    painter: &egui::Painter,
    spec: &TextSpec,
    anchor: egui::Pos2,
    size: f64,
    color: egui::Color32,
) {
    let frac = match spec.anchor {
        TextAnchor::Start => 0.0,
        TextAnchor::Middle => 0.5,
        TextAnchor::End => 1.0,
    };
    let galley = painter.layout_no_wrap(
        spec.content.clone(),
        egui::FontId::proportional(size as f32),
        color,
    );
    let extent = galley.size();
    let (pos, angle) = if spec.rotated {
        (
            egui::pos2(anchor.x - extent.y, anchor.y + extent.x * frac),
            -std::f32::consts::FRAC_PI_2,
        )
    } else {
        (
            egui::pos2(anchor.x - extent.x * frac, anchor.y - extent.y),
            0.0,
        )
    };
    painter.add(TextShape::new(pos, galley, color).with_angle(angle));
}
