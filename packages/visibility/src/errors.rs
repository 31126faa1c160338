//! Error types for the declaration surface

use fxlayout_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectiveError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Binding '{binding}' does not belong to {expected}")]
    WrongDirective {
        binding: String,
        expected: &'static str,
    },
}
