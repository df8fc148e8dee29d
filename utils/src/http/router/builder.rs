use std::fmt;
use std::future::Future;
use std::sync::Arc;

use super::middleware::{Middleware, NextFn};
use super::types::{tree_key, Entry, HandlerFut, RouteHandler, RouteInfo};
use super::Router;

/// Where a middleware runs relative to the others registered on the same
/// builder. Data runs first, then error handlers, then everything else,
/// whatever the registration order.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
enum Stage {
	Data,
	Error,
	Generic,
}

macro_rules! method_routes {
	($($name:ident => $method:ident),* $(,)?) => {
		$(
			pub fn $name<F: Future<Output = Result<hyper::Response<O>, E>> + Send + 'static>(
				self,
				path: &'static str,
				handler: impl Fn(hyper::Request<I>) -> F + Send + Sync + 'static,
			) -> Self {
				self.add_route(Some(hyper::Method::$method), path, handler)
			}
		)*
	};
}

pub struct RouterBuilder<I, O, E> {
	entries: Vec<(&'static str, Entry<I, O, E>)>,
	middlewares: Vec<(Stage, Arc<dyn Middleware<I, O, E>>)>,
}

impl<I, O, E> fmt::Debug for RouterBuilder<I, O, E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouterBuilder")
			.field("entries", &self.entries)
			.field("middlewares", &self.middlewares.len())
			.finish()
	}
}

impl<I: Send + 'static, O: Send + 'static, E: Send + 'static> Default for RouterBuilder<I, O, E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<I: Send + 'static, O: Send + 'static, E: Send + 'static> RouterBuilder<I, O, E> {
	pub fn new() -> Self {
		Self {
			entries: Vec::new(),
			middlewares: Vec::new(),
		}
	}

	method_routes! {
		get => GET,
		post => POST,
		put => PUT,
		delete => DELETE,
	}

	pub fn add_route<F: Future<Output = Result<hyper::Response<O>, E>> + Send + 'static>(
		mut self,
		method: Option<hyper::Method>,
		path: &'static str,
		handler: impl Fn(hyper::Request<I>) -> F + Send + Sync + 'static,
	) -> Self {
		let handler: RouteHandler<I, O, E> =
			Arc::new(move |req: hyper::Request<I>| -> HandlerFut<O, E> { Box::pin(handler(req)) });
		self.entries.push((path, Entry::Route { method, handler }));
		self
	}

	/// Mounts every route of `router` under `path`. Middlewares of this
	/// builder wrap the ones of `router`.
	pub fn scope(mut self, path: &'static str, router: RouterBuilder<I, O, E>) -> Self {
		self.entries.push((path, Entry::Scope(router)));
		self
	}

	/// Catch-all for any method on any path nothing else matched.
	pub fn not_found<F: Future<Output = Result<hyper::Response<O>, E>> + Send + 'static>(
		self,
		handler: impl Fn(hyper::Request<I>) -> F + Send + Sync + 'static,
	) -> Self {
		self.add_route(None, "/*", handler)
	}

	pub fn middleware(mut self, middleware: impl Middleware<I, O, E> + 'static) -> Self {
		self.middlewares.push((Stage::Generic, Arc::new(middleware)));
		self
	}

	/// Inserts a clone of `data` into the extensions of every request.
	pub fn data<T: Clone + Send + Sync + 'static>(mut self, data: T) -> Self {
		let inject = move |mut req: hyper::Request<I>, next: NextFn<I, O, E>| {
			req.extensions_mut().insert(data.clone());
			next(req)
		};

		self.middlewares.push((Stage::Data, Arc::new(inject)));
		self
	}

	/// Turns errors returned by handlers and later middlewares into responses.
	/// The handler gets the request head, the body has been consumed by then.
	pub fn error_handler<F: Future<Output = hyper::Response<O>> + Send + 'static>(
		mut self,
		handler: impl Fn(hyper::Request<()>, E) -> F + Send + Sync + 'static,
	) -> Self {
		let handler = Arc::new(handler);
		let recover = move |req: hyper::Request<I>, next: NextFn<I, O, E>| {
			let handler = handler.clone();
			async move {
				let (parts, body) = req.into_parts();
				let head = hyper::Request::from_parts(parts.clone(), ());

				match next(hyper::Request::from_parts(parts, body)).await {
					Ok(res) => Ok(res),
					Err(err) => Ok(handler(head, err).await),
				}
			}
		};

		self.middlewares.push((Stage::Error, Arc::new(recover)));
		self
	}

	pub fn build(self) -> Router<I, O, E> {
		let mut router = Router {
			handlers: Vec::new(),
			middlewares: Vec::new(),
			tree: path_tree::PathTree::new(),
		};

		self.flatten("", &[], &mut router);

		router
	}

	/// Moves every route into `target`, prefixing paths with `prefix` and
	/// wrapping handlers in `inherited` plus this builder's middlewares.
	fn flatten(mut self, prefix: &str, inherited: &[usize], target: &mut Router<I, O, E>) {
		self.middlewares.sort_by_key(|(stage, _)| *stage);

		let mut middlewares = inherited.to_vec();
		for (_, middleware) in self.middlewares {
			target.middlewares.push(middleware);
			middlewares.push(target.middlewares.len() - 1);
		}

		for (path, entry) in self.entries {
			let path = join_path(prefix, path);

			match entry {
				Entry::Route { method, handler } => {
					target.handlers.push(handler);

					let key = tree_key(method.as_ref(), &path);
					tracing::debug!(key = %key, "adding route");

					let _ = target.tree.insert(
						&key,
						RouteInfo {
							handler: target.handlers.len() - 1,
							middlewares: middlewares.clone(),
						},
					);
				}
				Entry::Scope(builder) => builder.flatten(&path, &middlewares, target),
			}
		}
	}
}

fn join_path(prefix: &str, path: &str) -> String {
	let prefix = prefix.trim_matches('/');
	let path = path.trim_matches('/');

	match (prefix.is_empty(), path.is_empty()) {
		(true, _) => path.to_owned(),
		(false, true) => prefix.to_owned(),
		(false, false) => format!("{prefix}/{path}"),
	}
}
