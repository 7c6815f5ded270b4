//! Re-renders the listing when another user is selected.

use crate::{
	api::Source,
	error::Error,
	listing::{Listing, Refresh},
	model::UserId,
};
use std::rc::Rc;
use tracing::{debug, error, instrument, trace_span, warn};
use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_futures::spawn_local;

/// The user id named by a selection control's `value`, or `fallback` if there is none.
#[must_use]
pub fn selected_user_id(value: Option<&str>, fallback: UserId) -> UserId {
	value.and_then(|value| value.parse().ok()).filter(|id: &UserId| id.0 != 0).unwrap_or(fallback)
}

/// Fetches the posts of `user_id` and refreshes `listing` with them.
///
/// A failed fetch shows the placeholder.
/// The refresh generation begins before the posts are requested, so of overlapping selections, the last one made wins.
///
/// # Errors
///
/// Iff the DOM rejects the new content.
#[instrument(skip(listing))]
pub async fn select_user<S: Source>(listing: &Listing<S>, user_id: UserId) -> Result<Refresh, Error> {
	let ticket = listing.begin();
	let posts = listing.source().list_user_posts(user_id).await;
	listing.refresh_with(ticket, posts).await
}

/// Keeps a `change` listener registered on a `<select>` for as long as it lives.
pub struct Selection {
	select: web_sys::HtmlSelectElement,
	change_handler: Closure<dyn Fn(web_sys::Event)>,
}

impl core::fmt::Debug for Selection {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Selection").field("select", &self.select).finish_non_exhaustive()
	}
}

impl Selection {
	/// # Errors
	///
	/// Iff the change listener can't be registered.
	#[instrument(skip(listing))]
	pub fn new<S: Source + 'static>(select: web_sys::HtmlSelectElement, listing: Rc<Listing<S>>, fallback_user_id: UserId) -> Result<Self, Error> {
		let change_handler = Closure::wrap(Box::new(move |event: web_sys::Event| {
			let span = trace_span!("change_handler", event = ?&event);
			let _enter = span.enter();

			let value = event.target().and_then(|target| target.dyn_into::<web_sys::HtmlSelectElement>().ok()).map(|select| select.value());
			let user_id = selected_user_id(value.as_deref(), fallback_user_id);
			debug!(%user_id, "Selected user.");

			let listing = Rc::clone(&listing);
			spawn_local(async move {
				if let Err(error) = select_user(&listing, user_id).await {
					error!("Failed to show posts of user {}: {}", user_id, error);
				}
			});
		}) as Box<dyn Fn(web_sys::Event)>);

		select.add_event_listener_with_callback("change", change_handler.as_ref().unchecked_ref())?;
		Ok(Self { select, change_handler })
	}

	#[must_use]
	pub fn select(&self) -> &web_sys::HtmlSelectElement {
		&self.select
	}
}

impl Drop for Selection {
	fn drop(&mut self) {
		if let Err(error) = self.select.remove_event_listener_with_callback("change", self.change_handler.as_ref().unchecked_ref()) {
			warn!("Failed to remove change listener: {:?}", error);
		}
	}
}
