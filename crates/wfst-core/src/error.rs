use thiserror::Error;

use crate::state::StateRef;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FstError {
    #[error("Arc index {index} out of range for a state with {count} arcs")]
    ArcIndexOutOfRange { index: usize, count: usize },

    #[error("Unknown state: {0:?}")]
    UnknownState(StateRef),

    #[error("State handle or id space exhausted")]
    TooManyStates,
}

pub type Result<T> = std::result::Result<T, FstError>;
