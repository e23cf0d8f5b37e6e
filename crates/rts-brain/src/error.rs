use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BrainError {
    /// A state popped the last entry and pushed nothing in its place.
    #[error("brain has no active state")]
    EmptyStack,
}

pub type BrainResult<T> = Result<T, BrainError>;
