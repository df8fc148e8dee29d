use std::future::Future;
use std::pin::Pin;

/// The future returned by the rest of the chain.
pub type NextFut<O, E> = Pin<Box<dyn Future<Output = Result<hyper::Response<O>, E>> + Send + 'static>>;

/// The rest of the chain, ending in the route handler. Call it at most once.
pub type NextFn<I, O, E> = Box<dyn FnOnce(hyper::Request<I>) -> NextFut<O, E> + Sync + Send + 'static>;

/// Wraps a route. Any `Fn(Request, NextFn) -> Future` closure or async fn
/// is a middleware.
#[async_trait::async_trait]
pub trait Middleware<I: Send, O: Send, E: Send>: Sync + Send + 'static {
	async fn handle(&self, req: hyper::Request<I>, next: NextFn<I, O, E>) -> Result<hyper::Response<O>, E>;
}

#[async_trait::async_trait]
impl<I, O, E, F, Fut> Middleware<I, O, E> for F
where
	I: Send + 'static,
	O: Send + 'static,
	E: Send + 'static,
	F: Fn(hyper::Request<I>, NextFn<I, O, E>) -> Fut + Sync + Send + 'static,
	Fut: Future<Output = Result<hyper::Response<O>, E>> + Send + 'static,
{
	async fn handle(&self, req: hyper::Request<I>, next: NextFn<I, O, E>) -> Result<hyper::Response<O>, E> {
		(self)(req, next).await
	}
}
