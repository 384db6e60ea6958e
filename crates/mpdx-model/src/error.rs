use thiserror::Error;

use crate::FieldId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid field id: {0:?}")]
    InvalidFieldId(String),
    #[error("field '{0}' is not a supported import header")]
    UnsupportedField(FieldId),
    #[error("header '{0}' not found in the uploaded file")]
    UnknownHeader(String),
    #[error("no header is mapped to field '{0}'")]
    UnmappedField(FieldId),
}

pub type Result<T> = std::result::Result<T, ModelError>;
