use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::builder::RouterBuilder;

/// Path parameters captured for the matched route, in declaration order.
#[derive(Debug, Clone)]
pub struct RouteParams(pub Box<[(String, String)]>);

impl RouteParams {
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
	}
}

pub(crate) type HandlerFut<O, E> = Pin<Box<dyn Future<Output = Result<hyper::Response<O>, E>> + Send + 'static>>;

pub(crate) type RouteHandler<I, O, E> = Arc<dyn Fn(hyper::Request<I>) -> HandlerFut<O, E> + Send + Sync + 'static>;

/// The value stored in the path tree: which handler to call and which
/// middlewares wrap it, outermost first.
#[derive(Debug)]
pub(crate) struct RouteInfo {
	pub handler: usize,
	pub middlewares: Vec<usize>,
}

/// One registration on a builder.
pub(crate) enum Entry<I, O, E> {
	Route {
		/// `None` matches every method
		method: Option<hyper::Method>,
		handler: RouteHandler<I, O, E>,
	},
	Scope(RouterBuilder<I, O, E>),
}

impl<I, O, E> fmt::Debug for Entry<I, O, E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Entry::Route { method, .. } => f.debug_struct("Route").field("method", method).finish(),
			Entry::Scope(builder) => f.debug_tuple("Scope").field(builder).finish(),
		}
	}
}

/// The key a route is stored under: `/{METHOD}/{path}`, with `*` standing
/// in for any method.
pub(crate) fn tree_key(method: Option<&hyper::Method>, path: &str) -> String {
	format!("/{}/{}", method.map(|m| m.as_str()).unwrap_or("*"), path.trim_start_matches('/'))
}
