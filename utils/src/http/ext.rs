//! `?`-friendly conversions from plain results and options into
//! [`RouteError`]s.

use std::panic::Location;

use super::RouteError;

pub trait ResultExt<T, E, E2>: Sized {
	/// Replaces the error with the given response, keeping the original as
	/// the source.
	fn map_err_route<C>(self, ctx: C) -> Result<T, RouteError<E2>>
	where
		RouteError<E2>: From<C>,
		E2: From<E>;
}

impl<T, E, E2> ResultExt<T, E, E2> for Result<T, E> {
	#[track_caller]
	fn map_err_route<C>(self, ctx: C) -> Result<T, RouteError<E2>>
	where
		RouteError<E2>: From<C>,
		E2: From<E>,
	{
		let location = Location::caller();
		self.map_err(|err| RouteError::from(ctx).with_source(err.into()).with_location(location))
	}
}

pub trait OptionExt<T, E>: Sized {
	fn map_err_route<C>(self, ctx: C) -> Result<T, RouteError<E>>
	where
		RouteError<E>: From<C>;
}

impl<T, E> OptionExt<T, E> for Option<T> {
	#[track_caller]
	fn map_err_route<C>(self, ctx: C) -> Result<T, RouteError<E>>
	where
		RouteError<E>: From<C>,
	{
		let location = Location::caller();
		self.ok_or_else(|| RouteError::from(ctx).with_location(location))
	}
}
