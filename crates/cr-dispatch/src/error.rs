use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// Every depot has already been visited.
    #[error("no unvisited depot left")]
    NoCandidate,
}

pub type DispatchResult<T> = Result<T, DispatchError>;
