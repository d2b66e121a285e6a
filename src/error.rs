use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("ID must not be empty (item '{label}').")]
    EmptyId { label: String },
}
