//! Middleware to resolve the authenticated profile forwarded by the
//! identity gateway

use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::extract::Request;
use axum::http::Response;
use axum::response::IntoResponse;
use tower::{Layer, Service};

use crate::models::{Profile, ProfileId};
use crate::{AppState, Error};

/// Middleware layer that requires a request to carry a known profile id
///
/// The upstream gateway authenticates requests and forwards the verified
/// profile id in a trusted header. A resolved [`ProfileId`] is stored as an
/// [`Extension`](axum::Extension).
#[derive(Clone)]
pub struct AuthLayer {
	state: AppState,
}

impl AuthLayer {
	#[must_use]
	pub fn new(state: AppState) -> Self { Self { state } }
}

impl<S> Layer<S> for AuthLayer {
	type Service = AuthMiddleware<S>;

	fn layer(&self, inner: S) -> Self::Service {
		AuthMiddleware { inner, state: self.state.clone() }
	}
}

#[derive(Clone)]
pub struct AuthMiddleware<S> {
	inner: S,
	state: AppState,
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
	S: Service<Request, Response = Response<Body>> + Clone + Send + 'static,
	S::Future: Send + 'static,
{
	type Error = S::Error;
	type Future = Pin<
		Box<
			dyn Future<Output = Result<Self::Response, Self::Error>>
				+ Send
				+ 'static,
		>,
	>;
	type Response = S::Response;

	fn poll_ready(
		&mut self,
		cx: &mut Context<'_>,
	) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	#[instrument(skip_all)]
	fn call(&mut self, mut req: Request<Body>) -> Self::Future {
		let cloned_inner = self.inner.clone();
		let mut inner = std::mem::replace(&mut self.inner, cloned_inner);

		let state = self.state.clone();

		Box::pin(async move {
			let forwarded_id = req
				.headers()
				.get(state.config.profile_id_header.as_str())
				.and_then(|value| value.to_str().ok())
				.and_then(|value| value.parse::<i32>().ok());

			let Some(profile_id) = forwarded_id else {
				info!("got request without valid profile id header");

				return Ok(Error::Forbidden.into_response());
			};

			let conn = match state.database_pool.get().await {
				Ok(c) => c,
				Err(e) => {
					return Ok(Error::from(e).into_response());
				},
			};

			let exists = match Profile::exists(profile_id, &conn).await {
				Ok(e) => e,
				Err(e) => return Ok(e.into_response()),
			};

			if !exists {
				warn!("attempted to authorize unknown profile {profile_id}");

				return Ok(Error::Forbidden.into_response());
			}

			req.extensions_mut().insert(ProfileId(profile_id));

			inner.call(req).await
		})
	}
}
