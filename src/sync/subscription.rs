use std::future::Future;

use tokio::sync::oneshot;

/// Handle to a spawned listener task.
///
/// The task receives a cancellation signal when the handle is unsubscribed
/// or dropped. Listeners check it with priority, so once `unsubscribe`
/// returns no further work is started, although a handler already running
/// completes.
#[derive(Debug)]
pub struct Subscription {
    cancel: Option<oneshot::Sender<()>>,
}

impl Subscription {
    pub fn spawn<F, Fut>(listener: F) -> Self
    where
        F: FnOnce(oneshot::Receiver<()>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (cancel, cancelled) = oneshot::channel();
        tokio::spawn(listener(cancelled));
        Self {
            cancel: Some(cancel),
        }
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

/// Releases a held subscription, if any. Releasing nothing is a no-op.
pub fn release(slot: &mut Option<Subscription>) {
    if let Some(subscription) = slot.take() {
        subscription.unsubscribe();
    }
}
