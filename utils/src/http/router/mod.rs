use std::fmt;
use std::sync::Arc;

use self::builder::RouterBuilder;
use self::middleware::{Middleware, NextFn, NextFut};
use self::types::{tree_key, RouteHandler, RouteInfo, RouteParams};

pub mod builder;
pub mod ext;
pub mod middleware;
pub mod types;

#[derive(Debug, thiserror::Error)]
pub enum RouterError<E> {
	#[error("no route matched the request")]
	NotFound,
	#[error("unhandled route error")]
	Unhandled(E),
}

/// A method and path router over a [`path_tree::PathTree`].
///
/// Method and path are looked up together, see [`RouterBuilder::any`] for
/// routes that accept every method.
pub struct Router<I, O, E> {
	handlers: Vec<RouteHandler<I, O, E>>,
	middlewares: Vec<Arc<dyn Middleware<I, O, E>>>,
	tree: path_tree::PathTree<RouteInfo>,
}

impl<I: Send + 'static, O: Send + 'static, E: Send + 'static> Router<I, O, E> {
	pub fn builder() -> RouterBuilder<I, O, E> {
		RouterBuilder::new()
	}

	pub async fn handle(&self, mut req: hyper::Request<I>) -> Result<hyper::Response<O>, RouterError<E>> {
		let key = tree_key(Some(req.method()), req.uri().path());
		let (info, path) = self.tree.find(&key).ok_or(RouterError::NotFound)?;

		let params = path.params_iter().map(|(k, v)| (k.to_owned(), v.to_owned())).collect();
		req.extensions_mut().insert(RouteParams(params));

		let handler = self.handlers[info.handler].clone();
		let mut next: NextFn<I, O, E> = Box::new(move |req| handler(req));

		// wrap from the inside out so the outermost middleware runs first
		for idx in info.middlewares.iter().rev() {
			let middleware = self.middlewares[*idx].clone();
			let inner = next;
			next = Box::new(move |req| Box::pin(async move { middleware.handle(req, inner).await }) as NextFut<O, E>);
		}

		next(req).await.map_err(RouterError::Unhandled)
	}
}

impl<I, O, E> fmt::Debug for Router<I, O, E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Router")
			.field("handlers", &self.handlers.len())
			.field("middlewares", &self.middlewares.len())
			.finish()
	}
}
