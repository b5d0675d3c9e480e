pub mod event_types;
pub mod subscriptions;

use crate::{error::ApiError, stores::StoreError};

pub(crate) fn map_store_error(err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound(message) => ApiError::NotFound(message),
        StoreError::Rejected { status, message } => {
            ApiError::Upstream(format!("upstream returned {status}: {message}"))
        }
        StoreError::Transport(message) => ApiError::Upstream(message),
        StoreError::Decode(message) => ApiError::Internal(message),
    }
}
