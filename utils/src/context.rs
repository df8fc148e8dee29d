use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

/// A cancellable handle passed to every long running task.
///
/// Cloning a context is cheap. The matching [`Handler`] can cancel all clones
/// and then wait until every clone has been dropped, which is how the process
/// knows that all in-flight work has wound down.
#[derive(Clone, Debug)]
pub struct Context {
	token: CancellationToken,
	_alive: mpsc::Sender<()>,
}

#[derive(Debug)]
pub struct Handler {
	token: CancellationToken,
	alive: mpsc::Receiver<()>,
}

impl Context {
	#[must_use]
	pub fn new() -> (Self, Handler) {
		let token = CancellationToken::new();
		let (alive_send, alive_recv) = mpsc::channel(1);

		(
			Self {
				token: token.clone(),
				_alive: alive_send,
			},
			Handler {
				token,
				alive: alive_recv,
			},
		)
	}

	/// Resolves once the context has been cancelled.
	pub fn done(&self) -> WaitForCancellationFuture<'_> {
		self.token.cancelled()
	}

	pub fn is_done(&self) -> bool {
		self.token.is_cancelled()
	}
}

impl Handler {
	/// Cancels every context and waits for all of them to be dropped.
	pub async fn cancel(mut self) {
		self.token.cancel();
		// recv only returns None once every sender is gone
		while self.alive.recv().await.is_some() {}
	}
}
