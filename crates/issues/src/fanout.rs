//! All-or-nothing fan-out/join shared by every batch operation.
//!
//! Branches are polled together on the caller's task; nothing is spawned.
//! Every branch is driven to completion even after a sibling fails, so a
//! failed batch may still have produced remote side effects. Callers cannot
//! learn which ones.

use std::future::Future;

use futures::stream::{FuturesUnordered, StreamExt};

/// Polls every branch to completion and joins the results.
///
/// Returns the branch outputs in the order the branches were supplied, or the
/// first error in completion order. Successful sibling results are discarded
/// when any branch fails.
pub async fn join_all_or_first_error<I, F, T, E>(branches: I) -> Result<Vec<T>, E>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
{
    let mut pending: FuturesUnordered<_> = branches
        .into_iter()
        .enumerate()
        .map(|(index, branch)| async move { (index, branch.await) })
        .collect();

    let mut settled: Vec<Option<T>> = std::iter::repeat_with(|| None)
        .take(pending.len())
        .collect();
    let mut first_error = None;

    while let Some((index, result)) = pending.next().await {
        match result {
            Ok(value) => settled[index] = Some(value),
            Err(err) => {
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(settled.into_iter().flatten().collect()),
    }
}
