//! A minimal HTML page with named containers charts mount into.
//!
//! Each container has a measured width (what a browser would report for the
//! element); a chart sizes itself to it once, when it is created. A container
//! whose chart failed shows the error instead of an empty box.
use crate::config::ChartConfig;
use crate::error::{ChartError, Result};
use crate::loader::Loader;
use crate::viz::backend::{to_svg_string, xml_escape};
use crate::viz::theme;
use crate::viz::ChartController;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum Mounted {
    Empty,
    Chart(Box<ChartController>),
    Error(String),
}

#[derive(Debug, Clone)]
pub struct Container {
    pub id: String,
    pub width: u32,
    pub content: Mounted,
}

#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    containers: Vec<Container>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            containers: Vec::new(),
        }
    }

    /// Add an empty container `id` that measures `width` pixels.
    pub fn with_container(mut self, id: &str, width: u32) -> Self {
        self.containers.push(Container {
            id: id.to_string(),
            width,
            content: Mounted::Empty,
        });
        self
    }

    pub fn container(&self, id: &str) -> Option<&Container> {
        self.containers.iter().find(|c| c.id == id)
    }

    fn container_mut(&mut self, id: &str) -> Result<&mut Container> {
        self.containers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ChartError::MissingContainer(id.to_string()))
    }

    pub fn measured_width(&self, id: &str) -> Result<u32> {
        self.container(id)
            .map(|c| c.width)
            .ok_or_else(|| ChartError::MissingContainer(id.to_string()))
    }

    pub fn chart(&self, id: &str) -> Option<&ChartController> {
        match &self.container(id)?.content {
            Mounted::Chart(chart) => Some(chart.as_ref()),
            _ => None,
        }
    }

    pub fn chart_mut(&mut self, id: &str) -> Option<&mut ChartController> {
        match &mut self.container_mut(id).ok()?.content {
            Mounted::Chart(chart) => Some(chart.as_mut()),
            _ => None,
        }
    }

    pub fn error(&self, id: &str) -> Option<&str> {
        match &self.container(id)?.content {
            Mounted::Error(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    pub fn mount(&mut self, id: &str, chart: ChartController) -> Result<()> {
        self.container_mut(id)?.content = Mounted::Chart(Box::new(chart));
        Ok(())
    }

    pub fn mount_error(&mut self, id: &str, err: &ChartError) -> Result<()> {
        self.container_mut(id)?.content = Mounted::Error(err.to_string());
        Ok(())
    }

    /// Serialize the page with every mounted chart inlined as SVG.
    pub fn to_html(&self) -> Result<String> {
        let mut body = String::new();
        for c in &self.containers {
            body.push_str(&format!(
                "<div id=\"{}\" class=\"chart-container\" style=\"width:{}px\">",
                xml_escape(&c.id),
                c.width
            ));
            match &c.content {
                Mounted::Empty => {}
                Mounted::Chart(chart) => body.push_str(&to_svg_string(chart.surface())?),
                Mounted::Error(msg) => body.push_str(&format!(
                    "<div class=\"chart-error\" role=\"alert\">Chart unavailable: {}</div>",
                    xml_escape(msg)
                )),
            }
            body.push_str("</div>\n");
        }

        Ok(format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
             <style>\nbody {{ background: {bg}; color: #fff; font-family: sans-serif; }}\n\
             .chart-error {{ border: 1px solid #f86c6b; color: #f86c6b; padding: 1em; }}\n\
             </style>\n</head>\n<body>\n{body}</body>\n</html>\n",
            title = xml_escape(&self.title),
            bg = theme::hex(theme::BACKGROUND),
        ))
    }

    pub fn write_html<P: AsRef<Path>>(&self, out_path: P) -> Result<()> {
        let out_path = out_path.as_ref();
        std::fs::write(out_path, self.to_html()?)?;
        log::info!("wrote {}", out_path.display());
        Ok(())
    }
}

/// Load `json_filepath` and mount a chart with surface id `title` into
/// `container`.
///
/// On failure nothing is drawn: the container shows the error and the error is
/// returned to the caller.
pub fn create_plot(
    page: &mut Page,
    container: &str,
    loader: &Loader,
    json_filepath: &str,
    title: &str,
    config: ChartConfig,
) -> Result<()> {
    let width = page.measured_width(container)?;
    match ChartController::load(loader, json_filepath, title, width, config) {
        Ok(chart) => page.mount(container, chart),
        Err(e) => {
            log::error!("chart `{title}` from {json_filepath} failed: {e}");
            page.mount_error(container, &e)?;
            Err(e)
        }
    }
}
