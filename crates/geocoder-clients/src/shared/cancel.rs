use std::future::Future;

use tokio_util::sync::CancellationToken;

use super::{RequestError, RequestResult};

/**
    Runs `fut` until it completes or `token` gets cancelled,
    whichever comes first. A cancelled token always wins, even
    if it was cancelled before this function was ever called.

    Only the future passed in here is dropped on cancellation - any
    request it had joined keeps running for its other callers.
*/
pub async fn with_cancellation<T, F>(token: &CancellationToken, fut: F) -> RequestResult<T>
where
    F: Future<Output = RequestResult<T>>,
{
    tokio::select! {
        biased;
        () = token.cancelled() => Err(RequestError::Cancelled),
        result = fut => result,
    }
}
