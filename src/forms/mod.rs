//! Form definitions backing the dashboard routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod fleet;
pub mod vehicle;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid plate number")]
    InvalidPlateNumber,

    #[error("invalid brand")]
    InvalidBrand,

    #[error("invalid model")]
    InvalidModel,

    #[error("invalid status")]
    InvalidStatus,

    #[error("invalid city")]
    InvalidCity,
}
