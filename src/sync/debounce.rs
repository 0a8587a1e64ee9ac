use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::sync::subscription::Subscription;

/// Listens to `source` and calls `handler` with the latest item once no new
/// item has arrived for `quiet`. Each arrival restarts the timer; nothing is
/// emitted on the leading edge.
///
/// Items still waiting for their quiet period are discarded when the
/// subscription is released or the source closes.
pub fn debounce<T, F, Fut>(
    mut source: mpsc::UnboundedReceiver<T>,
    quiet: Duration,
    mut handler: F,
) -> Subscription
where
    T: Send + 'static,
    F: FnMut(T) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Subscription::spawn(move |mut cancelled| async move {
        let timer = sleep(quiet);
        tokio::pin!(timer);
        let mut pending: Option<T> = None;

        loop {
            tokio::select! {
                biased;
                _ = &mut cancelled => break,
                next = source.recv() => match next {
                    Some(item) => {
                        if pending.replace(item).is_some() {
                            debug!("debounce timer restarted");
                        }
                        timer.as_mut().reset(Instant::now() + quiet);
                    }
                    None => break,
                },
                _ = &mut timer, if pending.is_some() => {
                    if let Some(item) = pending.take() {
                        handler(item).await;
                    }
                }
            }
        }
    })
}
