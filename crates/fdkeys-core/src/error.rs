use thiserror::Error;

#[derive(Error, Debug)]
pub enum FdError {
    #[error("attribute list is empty")]
    EmptyAttributeList,

    #[error("attribute \"{0}\" contains the determination marker \"->\"")]
    MarkerInAttribute(String),

    #[error("invalid input JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FdError>;
