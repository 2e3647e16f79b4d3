use aq_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type SessionResult<T> = Result<T, SessionError>;
