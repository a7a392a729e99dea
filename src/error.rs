use thiserror::Error;

use crate::client::SyncError;

#[derive(Debug, Error)]
pub enum ChatError {
    /// The remote exchange failed; the optimistic message stays in the store.
    #[error("Error responding:")] Responding(#[source] SyncError),
}
