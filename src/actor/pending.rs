use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::error::ActorError;

/// Result handle for one actor command.
///
/// The command is already queued when this is returned; awaiting (or
/// [`wait`](Self::wait)ing) only observes its outcome. Dropping a `Pending`
/// does not cancel the command.
#[must_use = "the command runs regardless, but its result is lost if the handle is dropped"]
#[derive(Debug)]
pub struct Pending<T> {
    rx: oneshot::Receiver<Result<T, ActorError>>,
}

impl<T> Pending<T> {
    pub(crate) fn new(rx: oneshot::Receiver<Result<T, ActorError>>) -> Self {
        Self { rx }
    }

    /// Blocks the current thread until the worker resolves the command.
    ///
    /// # Panics
    ///
    /// Panics if called from within an asynchronous execution context; use
    /// `.await` there instead.
    pub fn wait(self) -> Result<T, ActorError> {
        self.rx
            .blocking_recv()
            .map_err(|_| ActorError::WorkerClosed)?
    }
}

impl<T> Future for Pending<T> {
    type Output = Result<T, ActorError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(ActorError::WorkerClosed)),
            Poll::Pending => Poll::Pending,
        }
    }
}
