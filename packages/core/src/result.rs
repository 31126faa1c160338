use crate::error::CoreError;

/// Common Result type alias
pub type CoreResult<T> = Result<T, CoreError>;
