//! Layout and coordinate scales.
//!
//! Both scales are plain linear maps built once per chart. Inputs outside the
//! domain extrapolate; nothing is clamped.
use crate::config::{ChartConfig, Margins};
use crate::error::{ChartError, Result};
use crate::models::{SeriesDocument, date_to_millis};
use chrono::NaiveDate;

/// Pixel geometry of one chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub container_width: u32,
    pub margins: Margins,
    pub plot_width: f64,
    pub plot_height: f64,
}

impl Layout {
    /// Derive the plot area from the container width.
    ///
    /// `plot_height = min(plot_width / 2 - top - bottom, max_plot_height)`.
    pub fn new(container_width: u32, config: &ChartConfig) -> Result<Self> {
        let m = config.margins;
        let plot_width = container_width as f64 - m.left - m.right;
        let plot_height = (plot_width / 2.0 - m.top - m.bottom).min(config.max_plot_height);
        if !(plot_width > 0.0 && plot_height > 0.0) {
            return Err(ChartError::InvalidLayout {
                width: container_width,
            });
        }
        Ok(Self {
            container_width,
            margins: m,
            plot_width,
            plot_height,
        })
    }

    /// Height of the whole drawing surface, margins included.
    pub fn surface_height(&self) -> f64 {
        self.plot_height + self.margins.top + self.margins.bottom
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.container_width, self.surface_height().round() as u32)
    }
}

/// Linear map from a numeric domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// A zero-width domain sends every value to the start of the range.
    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 { 0.0 } else { (v - d0) / span };
        r0 + t * (r1 - r0)
    }

    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        let t = if span == 0.0 { 0.0 } else { (px - r0) / span };
        d0 + t * (d1 - d0)
    }
}

/// Linear map from calendar dates to pixels.
///
/// Works on UTC-midnight epoch milliseconds internally, so `invert` yields a
/// fractional instant rather than a whole date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    start: NaiveDate,
    end: NaiveDate,
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self {
        let inner = LinearScale::new(
            (date_to_millis(domain.0), date_to_millis(domain.1)),
            range,
        );
        Self {
            start: domain.0,
            end: domain.1,
            inner,
        }
    }

    pub fn domain(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }

    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }

    pub fn map(&self, date: NaiveDate) -> f64 {
        self.inner.map(date_to_millis(date))
    }

    pub fn map_millis(&self, millis: f64) -> f64 {
        self.inner.map(millis)
    }

    /// Pixel back to epoch milliseconds.
    pub fn invert(&self, px: f64) -> f64 {
        self.inner.invert(px)
    }
}

/// The pair of scales a chart draws with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scales {
    pub x: TimeScale,
    pub y: LinearScale,
}

impl Scales {
    /// Pixel position of a sample inside the plot area.
    pub fn project(&self, timestamp: NaiveDate, value: f64) -> (f64, f64) {
        (self.x.map(timestamp), self.y.map(value))
    }
}

/// Build layout and scales for a document.
///
/// Time domain is the date extent; value domain is `[0, max + 1]` so the top
/// sample never sits on the upper edge. Fails with `EmptySeries` before
/// anything else when there is nothing to measure.
pub fn build_scales(
    container_width: u32,
    doc: &SeriesDocument,
    config: &ChartConfig,
) -> Result<(Layout, Scales)> {
    let first = doc.samples.first().ok_or(ChartError::EmptySeries)?;

    let (mut t_min, mut t_max) = (first.timestamp, first.timestamp);
    let mut v_max = f64::NEG_INFINITY;
    for s in &doc.samples {
        t_min = t_min.min(s.timestamp);
        t_max = t_max.max(s.timestamp);
        v_max = v_max.max(s.value);
    }

    let layout = Layout::new(container_width, config)?;
    let scales = Scales {
        x: TimeScale::new((t_min, t_max), (0.0, layout.plot_width)),
        y: LinearScale::new((0.0, v_max + 1.0), (layout.plot_height, 0.0)),
    };
    log::debug!(
        "layout {}x{} (plot {}x{}), x {:?}, y {:?}",
        layout.container_width,
        layout.surface_height(),
        layout.plot_width,
        layout.plot_height,
        scales.x.domain(),
        scales.y.domain()
    );
    Ok((layout, scales))
}
