use super::types::RouteParams;

pub trait RequestExt {
	fn param(&self, key: &str) -> Option<&str> {
		self.params().and_then(|params| params.get(key))
	}

	fn params(&self) -> Option<&RouteParams>;

	fn data<T: Send + Sync + 'static>(&self) -> Option<&T>;
}

impl<I> RequestExt for hyper::Request<I> {
	fn params(&self) -> Option<&RouteParams> {
		self.extensions().get::<RouteParams>()
	}

	fn data<T: Send + Sync + 'static>(&self) -> Option<&T> {
		self.extensions().get::<T>()
	}
}
