use thiserror::Error;

/// Errors raised at the declaration and configuration surfaces.
///
/// The visibility decision path itself never fails; these only come from
/// parsing names and loading files.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown breakpoint '{0}'")]
    UnknownBreakpoint(String),

    #[error("Unknown input binding '{0}'")]
    UnknownBinding(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Json(#[from] serde_json::Error),
}
