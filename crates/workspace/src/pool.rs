use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Run `task` over every item with at most `limit` tasks in flight.
///
/// Results come back in input order: each task owns exactly one slot.
/// A task that panics leaves its slot empty.
pub async fn map_ordered<T, R, F, Fut>(items: Vec<T>, limit: usize, task: F) -> Vec<Option<R>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut,
    Fut: Future<Output = R> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let mut slots: Vec<Option<R>> = Vec::with_capacity(items.len());
    slots.resize_with(items.len(), || None);

    let mut set = JoinSet::new();
    for (index, item) in items.into_iter().enumerate() {
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .unwrap_or_else(|_| unreachable!("analysis semaphore closed"));
        let fut = task(item);
        set.spawn(async move {
            let _permit = permit;
            (index, fut.await)
        });
    }

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, result)) => slots[index] = Some(result),
            Err(e) => log::warn!("Analysis task failed: {e}"),
        }
    }

    slots
}
