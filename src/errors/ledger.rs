use thiserror::Error;

/// Errors from the external append-only ledger.
///
/// A failed mirror write never rolls back the relational write; callers
/// surface these as a degraded-success `mirror_error` instead.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("ledger transport error: {0}")]
    Transport(String),

    #[error("ledger rejected {operation} for record {record_id} (status {status})")]
    Rejected {
        operation: &'static str,
        record_id: i32,
        status: u16,
    },

    #[error("malformed ledger response: {0}")]
    MalformedResponse(String),

    #[error("no ledger entry for record {0}")]
    NotFound(i32),
}

impl From<reqwest::Error> for LedgerError {
    fn from(e: reqwest::Error) -> Self {
        LedgerError::Transport(e.to_string())
    }
}
