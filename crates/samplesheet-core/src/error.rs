use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SectionError {
    #[error("Section not found: {0}")]
    NotFound(String),

    #[error("Section {0} is not a settings section")]
    NotSettings(String),

    #[error("Section {0} is not a data section")]
    NotData(String),
}
