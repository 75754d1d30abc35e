use thiserror::Error;

/// Everything that can stop a chart from being built or written.
///
/// Validation variants (`EmptySeries`, `MalformedDocument`, `InvalidLayout`)
/// are raised before a drawing surface exists, so a failed chart never leaves
/// a half-drawn surface behind.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The document has no samples, so the time/value extent is undefined.
    #[error("series has no samples to plot")]
    EmptySeries,

    /// The JSON parsed but does not describe a series.
    #[error("malformed document: `{field}` {reason}")]
    MalformedDocument { field: String, reason: String },

    /// Network, HTTP, I/O or JSON syntax failure while loading the document.
    #[error("failed to load {source_name}: {reason}")]
    Fetch { source_name: String, reason: String },

    /// The container is too narrow to leave a positive plot area.
    #[error("container width {width}px leaves no room for the plot area")]
    InvalidLayout { width: u32 },

    /// No container with this id exists on the page.
    #[error("no container named `{0}`")]
    MissingContainer(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ChartError {
    pub(crate) fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ChartError::MalformedDocument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn fetch(source_name: impl Into<String>, reason: impl ToString) -> Self {
        ChartError::Fetch {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
