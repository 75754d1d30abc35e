//! hoverchart
//!
//! Build an interactive time-series line chart from a small JSON document:
//! a date/value series plus unit, axis labels and a title. Pairs with the
//! `hoverchart` CLI and the `hoverchart-gui` viewer.
//!
//! ### Features
//! - Load the document from a local file or an http(s) URL
//! - Time x-axis and linear value y-axis sized to the container width
//! - A hover tooltip that snaps to the nearest sample by date
//! - SVG output, or a whole HTML page with the chart inlined
//!
//! ### Example
//! ```no_run
//! use hoverchart::{ChartConfig, Loader, Page, PointerEvent, create_plot};
//!
//! let mut page = Page::new("Stats").with_container("plot", 600);
//! create_plot(
//!     &mut page,
//!     "plot",
//!     &Loader::default(),
//!     "stats/documents.json",
//!     "documents",
//!     ChartConfig::default(),
//! )?;
//!
//! let chart = page.chart_mut("plot").expect("mounted");
//! chart.handle(PointerEvent::Enter);
//! chart.handle(PointerEvent::Move { x: 120.0 });
//! println!("{} on {}", chart.value_label_text(), chart.date_label_text());
//! page.write_html("stats.html")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod page;
pub mod viz;

pub use config::{ChartConfig, Margins};
pub use error::{ChartError, Result};
pub use loader::Loader;
pub use models::{Sample, SeriesDocument};
pub use page::{Page, create_plot};
pub use viz::{ChartController, PendingChart, PointerEvent};
