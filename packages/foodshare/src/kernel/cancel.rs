use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::error::{FoodShareError, Result};

/// Run `fut` unless `cancel` fires first.
///
/// An already-cancelled token wins without polling `fut`.
pub async fn with_cancel<T, F>(cancel: &CancellationToken, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(FoodShareError::Cancelled),
        result = fut => result,
    }
}
