use std::time::Duration;

use crate::context::Context;
use crate::prelude::FutureTimeout;

#[tokio::test]
async fn test_context_cancel() {
	let (ctx, handler) = Context::new();

	let handle = tokio::spawn(async move {
		ctx.done().await;
		assert!(ctx.is_done());
	});

	handler
		.cancel()
		.timeout(Duration::from_millis(300))
		.await
		.expect("task should be cancelled");
	handle
		.timeout(Duration::from_millis(300))
		.await
		.expect("task should be cancelled")
		.expect("panic in task");
}

#[tokio::test]
async fn test_context_cancel_waits_for_clones() {
	let (ctx, handler) = Context::new();
	let held = ctx.clone();
	drop(ctx);

	let cancel = tokio::spawn(handler.cancel());

	tokio::time::sleep(Duration::from_millis(50)).await;
	assert!(!cancel.is_finished());
	assert!(held.is_done());

	drop(held);

	cancel
		.timeout(Duration::from_millis(300))
		.await
		.expect("cancel should finish once every context is dropped")
		.expect("panic in task");
}

#[tokio::test]
async fn test_context_not_done() {
	let (ctx, _handler) = Context::new();

	assert!(!ctx.is_done());
	assert!(ctx.done().timeout(Duration::from_millis(50)).await.is_err());
}
