//! Mutation error types.

use thiserror::Error;

use crate::client::ClientError;

use super::operation::MutationOperation;

/// Errors produced by the mutation adapter and execution handles.
#[derive(Clone, Debug, Error)]
pub enum MutationError {
    /// The requested operation has no registered cache-update getter.
    ///
    /// Raised synchronously at adapter time, before any network-capable
    /// state exists. This is a configuration gap, not a runtime fault.
    #[error("Operation not implemented: {operation}")]
    NotImplemented {
        /// The operation name as requested.
        operation: String,
    },

    /// The trigger payload belongs to a different operation than the handle.
    #[error("Payload for {payload} does not match operation {operation}")]
    PayloadMismatch {
        /// The operation the handle was built for.
        operation: MutationOperation,
        /// The operation the payload belongs to.
        payload: MutationOperation,
    },

    /// The underlying client call failed. Passed through untransformed.
    #[error(transparent)]
    Client(#[from] ClientError),
}
