use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Invalid test expression: {0}")]
    InvalidTestExpression(String),
    #[error("Invalid evaluation expression: {0}")]
    InvalidEvalExpression(String),
    #[error("Unmatched end of block at directive {position} in template {template}")]
    UnmatchedBlockClose { template: String, position: usize },
    #[error("{depth} block(s) left open at end of template {template}")]
    UnclosedBlock { template: String, depth: usize },
    #[error("Value {0} is not an integer or a reference to one")]
    NotAnInteger(String),
    #[error("Division by zero in expression: {0}")]
    DivisionByZero(String),
    #[error("Expected {expected} sections in template {id}, but got {actual}")]
    SectionCountError {
        id: String,
        expected: usize,
        actual: usize,
    },
    #[error("Template not found: {0}")]
    TemplateNotFound(String),
    #[error("Serialization Error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, TemplateError>;

impl serde::ser::Error for TemplateError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        TemplateError::Serialization(msg.to_string())
    }
}
