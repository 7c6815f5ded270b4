//! The post container: full refreshes and comment toggling.

use crate::{
	api::Source,
	builder::labeled_element,
	comments::{HIDDEN_CLASS, POST_ID_ATTRIBUTE},
	create::create_fragment,
	error::Error,
	generation::{Generations, Ticket},
	model::{Post, PostId},
	posts::posts_fragment,
	visibility::{Toggle, Visibility},
	vdom::Fragment,
};
use bumpalo::Bump;
use core::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, instrument, trace, trace_span, warn};
use wasm_bindgen::{closure::Closure, JsCast};

pub const PLACEHOLDER_CLASS: &str = "default-text";

/// What a call to [`Listing::refresh`] ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
	/// This many post articles are now shown.
	Rendered(usize),
	/// There were no posts; the placeholder is shown.
	Placeholder,
	/// A later refresh started while this one was fetching. Nothing was changed.
	Stale,
}

#[derive(Debug)]
struct Shared {
	container: web_sys::Element,
	visibility: RefCell<Visibility>,
	generations: Generations,
}

/// Attached to the element that holds the post articles.
///
/// A single `click` listener is registered on that element for the lifetime of the [`Listing`]
/// and resolves the clicked toggle button through its `data-post-id`,
/// so refreshes never add or remove listeners.
///
/// The listener is removed again when the [`Listing`] is dropped.
pub struct Listing<S> {
	shared: Rc<Shared>,
	source: Rc<S>,
	placeholder_text: String,
	click_handler: Closure<dyn Fn(web_sys::Event)>,
}

impl<S> core::fmt::Debug for Listing<S> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Listing").field("shared", &self.shared).field("placeholder_text", &self.placeholder_text).finish_non_exhaustive()
	}
}

impl<S: Source> Listing<S> {
	/// # Errors
	///
	/// Iff the click listener can't be registered on `container`.
	#[instrument(skip(source, placeholder_text))]
	pub fn new(container: web_sys::Element, source: Rc<S>, placeholder_text: impl Into<String>) -> Result<Self, Error> {
		let shared = Rc::new(Shared {
			container,
			visibility: RefCell::new(Visibility::new()),
			generations: Generations::new(),
		});

		let click_handler = Closure::wrap(Box::new({
			let shared = Rc::clone(&shared);
			move |event: web_sys::Event| {
				let span = trace_span!("click_handler", event = ?&event);
				let _enter = span.enter();
				shared.on_click(&event);
			}
		}) as Box<dyn Fn(web_sys::Event)>);

		shared.container.add_event_listener_with_callback("click", click_handler.as_ref().unchecked_ref())?;
		debug!("Registered delegated click listener.");

		Ok(Self {
			shared,
			source,
			placeholder_text: placeholder_text.into(),
			click_handler,
		})
	}

	#[must_use]
	pub fn source(&self) -> &S {
		&self.source
	}

	#[must_use]
	pub fn container(&self) -> &web_sys::Element {
		&self.shared.container
	}

	/// Replaces the container's content with one article per post, or the placeholder if there are none.
	///
	/// All posts start [collapsed](`Toggle::Collapsed`).
	/// If another refresh starts while this one is fetching, this one is discarded.
	///
	/// # Errors
	///
	/// Iff the DOM rejects the new content.
	pub async fn refresh(&self, posts: Option<Vec<Post>>) -> Result<Refresh, Error> {
		self.refresh_with(self.begin(), posts).await
	}

	/// Starts a refresh generation, superseding all refreshes started before.
	///
	/// Take the ticket before fetching what is passed to [`Listing::refresh_with`],
	/// so that a slow fetch can't overtake a later one.
	pub fn begin(&self) -> Ticket {
		self.shared.generations.begin()
	}

	/// [`Listing::refresh`] on behalf of an earlier [`Listing::begin`].
	///
	/// Returns [`Refresh::Stale`] without touching the DOM if a later generation began in the meantime.
	///
	/// # Errors
	///
	/// Iff the DOM rejects the new content.
	#[instrument(skip(self, posts), fields(len = posts.as_ref().map(Vec::len)))]
	pub async fn refresh_with(&self, ticket: Ticket, posts: Option<Vec<Post>>) -> Result<Refresh, Error> {
		if !self.shared.generations.is_current(ticket) {
			debug!("Discarding stale refresh before fetching.");
			return Ok(Refresh::Stale);
		}
		let posts = posts.filter(|posts| !posts.is_empty());

		let bump = Bump::new();
		let (fragment, outcome): (Fragment<'_>, _) = match posts_fragment(&bump, &*self.source, posts.as_deref()).await {
			Some(fragment) => (fragment, Refresh::Rendered(fragment.len())),
			None => (
				core::slice::from_ref(bump.alloc(labeled_element(&bump, "P", &self.placeholder_text, Some(PLACEHOLDER_CLASS)))),
				Refresh::Placeholder,
			),
		};

		if !self.shared.generations.is_current(ticket) {
			debug!("Discarding stale refresh.");
			return Ok(Refresh::Stale);
		}

		let container = &self.shared.container;
		let document = container.owner_document().ok_or(Error::MissingDocument)?;
		let dom_fragment = create_fragment(&document, fragment)?;

		// Only posts whose articles are attached are tracked.
		self.shared.visibility.borrow_mut().reset(core::iter::empty());
		clear_children(container)?;
		container.append_child(&dom_fragment)?;
		self.shared.visibility.borrow_mut().reset(posts.iter().flatten().map(|post| post.id));

		info!("Refreshed listing: {:?}", outcome);
		Ok(outcome)
	}

	/// Same as clicking the toggle button of `post_id`.
	///
	/// Returns the new state, or [`None`] if the post isn't currently shown.
	pub fn toggle(&self, post_id: PostId) -> Option<Toggle> {
		self.shared.toggle(post_id)
	}

	#[must_use]
	pub fn state(&self, post_id: PostId) -> Option<Toggle> {
		self.shared.visibility.borrow().get(post_id)
	}

	/// How many posts are currently shown (and tracked).
	#[must_use]
	pub fn len(&self) -> usize {
		self.shared.visibility.borrow().len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.shared.visibility.borrow().is_empty()
	}
}

impl<S> Drop for Listing<S> {
	fn drop(&mut self) {
		if let Err(error) = self.shared.container.remove_event_listener_with_callback("click", self.click_handler.as_ref().unchecked_ref()) {
			warn!("Failed to remove click listener: {:?}", error);
		}
	}
}

impl Shared {
	fn on_click(&self, event: &web_sys::Event) {
		let Some(target) = event.target().and_then(|target| target.dyn_into::<web_sys::Element>().ok()) else {
			return trace!("Click target is not an element.");
		};
		let button = match target.closest(&format!("button[{}]", POST_ID_ATTRIBUTE)) {
			Ok(Some(button)) => button,
			_ => return trace!("Click outside of toggle buttons."),
		};

		let container: &web_sys::Node = self.container.as_ref();
		let button_node: &web_sys::Node = button.as_ref();
		if !container.contains(Some(button_node)) {
			return trace!("Toggle button belongs to another container.");
		}

		match button.get_attribute(POST_ID_ATTRIBUTE).and_then(|post_id| post_id.parse().ok()) {
			Some(post_id) => {
				self.toggle(post_id);
			}
			None => warn!("Toggle button has an invalid {}.", POST_ID_ATTRIBUTE),
		}
	}

	/// Flips the state of `post_id` and projects it onto its button and section.
	///
	/// Nothing changes unless the post is tracked and both elements are present.
	fn toggle(&self, post_id: PostId) -> Option<Toggle> {
		let button = self.find(&format!("button[{}=\"{}\"]", POST_ID_ATTRIBUTE, post_id))?;
		let section = self.find(&format!("section[{}=\"{}\"]", POST_ID_ATTRIBUTE, post_id))?;
		let state = self.visibility.borrow_mut().toggle(post_id)?;

		button.set_text_content(Some(state.label()));
		let class_list = section.class_list();
		let projected = if state.is_hidden() { class_list.add_1(HIDDEN_CLASS) } else { class_list.remove_1(HIDDEN_CLASS) };
		if let Err(error) = projected {
			warn!("Failed to update section class: {:?}", error);
		}

		trace!(%post_id, ?state, "Toggled comments.");
		Some(state)
	}

	fn find(&self, selectors: &str) -> Option<web_sys::Element> {
		let element = self.container.query_selector(selectors).ok().flatten();
		if element.is_none() {
			trace!(selectors, "No match.");
		}
		element
	}
}

fn clear_children(element: &web_sys::Element) -> Result<(), Error> {
	let node: &web_sys::Node = element.as_ref();
	while let Some(child) = node.last_child() {
		node.remove_child(&child)?;
	}
	Ok(())
}
