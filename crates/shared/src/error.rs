use thiserror::Error;

use crate::protocol::TupleValue;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("action message carries no ACTION field")]
    MissingAction,
    #[error("unknown action code {0:?}")]
    UnknownAction(TupleValue),
}
