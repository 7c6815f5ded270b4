//! Mounting onto the page.

use crate::{
	api::{HttpSource, Source},
	builder::user_options,
	config::Config,
	create::create_fragment,
	error::Error,
	listing::Listing,
	model::User,
	selection::Selection,
};
use bumpalo::Bump;
use core::{any::Any, cell::Cell, future::Future};
use std::{cell::RefCell, rc::Rc, sync::Once};
use tracing::{debug, error, info, instrument, warn};
use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_futures::spawn_local;

thread_local! {
	static STARTED: Cell<bool> = Cell::new(false);
	static APP: RefCell<Option<Box<dyn Any>>> = RefCell::new(None);
}

static LOGGING: Once = Once::new();

/// The listing and selection control of one page, wired together.
#[derive(Debug)]
pub struct App<S> {
	listing: Rc<Listing<S>>,
	selection: Selection,
}

impl<S: Source + 'static> App<S> {
	/// Finds the selection control and post container named by `config` and registers their listeners.
	///
	/// Users aren't fetched yet; see [`App::load_users`].
	///
	/// # Errors
	///
	/// Iff either element is missing, the selection control isn't a `<select>` or a listener can't be registered.
	#[instrument(skip(document, source))]
	pub fn mount(document: &web_sys::Document, config: &Config, source: S) -> Result<Self, Error> {
		let select = document
			.get_element_by_id(&config.select_menu_id)
			.ok_or_else(|| Error::MissingElement(format!("#{}", config.select_menu_id)))?
			.dyn_into::<web_sys::HtmlSelectElement>()
			.map_err(|_| Error::NotASelect(config.select_menu_id.clone()))?;
		let container = document
			.query_selector(&config.container_selector)?
			.ok_or_else(|| Error::MissingElement(config.container_selector.clone()))?;

		let listing = Rc::new(Listing::new(container, Rc::new(source), config.placeholder_text.as_str())?);
		let selection = Selection::new(select, Rc::clone(&listing), config.fallback_user_id)?;
		Ok(Self { listing, selection })
	}

	/// Fetches all users and appends one option per user to the selection control.
	///
	/// Resolves to the number of options added, or [`None`] if the users couldn't be fetched.
	pub fn load_users(&self) -> impl Future<Output = Result<Option<usize>, Error>> + 'static {
		let listing = Rc::clone(&self.listing);
		let select = self.selection.select().clone();
		async move {
			let users = listing.source().list_users().await;
			populate_select_menu(&select, users.as_deref())
		}
	}

	#[must_use]
	pub fn listing(&self) -> &Rc<Listing<S>> {
		&self.listing
	}

	#[must_use]
	pub fn selection(&self) -> &Selection {
		&self.selection
	}
}

/// Appends one option per user to `select`.
///
/// # Errors
///
/// Iff the DOM rejects the options.
pub fn populate_select_menu(select: &web_sys::HtmlSelectElement, users: Option<&[User]>) -> Result<Option<usize>, Error> {
	let bump = Bump::new();
	let Some(options) = user_options(&bump, users) else {
		return Ok(None);
	};
	let document = select.owner_document().ok_or(Error::MissingDocument)?;
	select.append_child(&create_fragment(&document, options)?)?;
	Ok(Some(options.len()))
}

/// Mounts an [`App`] over [`HttpSource`] with `config` onto the current page once it has loaded, then fetches the users.
///
/// Only the first call of this, [`start_from_page`] or [`launch`] has an effect.
pub fn start(config: Config) {
	launch(move |_| config, http_source);
}

/// [`start`] with the [`Config`] read [from the page](`Config::from_document`) once it has loaded.
pub fn start_from_page() {
	launch(Config::from_document, http_source);
}

fn http_source(config: &Config) -> HttpSource {
	HttpSource::new(config.api_base.as_str())
}

/// Mounts an [`App`] onto the current page once it has loaded, then fetches the users.
///
/// `configure` and then `source` are called only at that point, so they see the complete document.
/// Only the first call of this, [`start`] or [`start_from_page`] has an effect; later calls log a warning.
pub fn launch<S, C, F>(configure: C, source: F)
where
	S: Source + 'static,
	C: FnOnce(&web_sys::Document) -> Config + 'static,
	F: FnOnce(&Config) -> S + 'static,
{
	if STARTED.with(|started| started.replace(true)) {
		return warn!("Already started; ignoring repeated start.");
	}
	install_logging();

	let Some(document) = web_sys::window().and_then(|window| window.document()) else {
		return error!("{}", Error::MissingDocument);
	};

	if document.ready_state() == "loading" {
		let handler = Closure::once_into_js(move || init(configure, source));
		let options = web_sys::AddEventListenerOptions::new();
		options.set_once(true);
		if let Err(error) = document.add_event_listener_with_callback_and_add_event_listener_options("DOMContentLoaded", handler.unchecked_ref(), &options) {
			error!("Failed to wait for DOMContentLoaded: {:?}", error);
		}
		debug!("Waiting for DOMContentLoaded.");
	} else {
		init(configure, source);
	}
}

/// Whether [`launch`] (or [`start`], [`start_from_page`]) was called on this thread.
#[must_use]
pub fn is_started() -> bool {
	STARTED.with(Cell::get)
}

fn init<S, C, F>(configure: C, source: F)
where
	S: Source + 'static,
	C: FnOnce(&web_sys::Document) -> Config,
	F: FnOnce(&Config) -> S,
{
	let Some(document) = web_sys::window().and_then(|window| window.document()) else {
		return error!("{}", Error::MissingDocument);
	};
	let config = configure(&document);

	let app = match App::mount(&document, &config, source(&config)) {
		Ok(app) => app,
		Err(error) => return error!("Failed to mount: {}", error),
	};
	let load_users = app.load_users();
	APP.with(|slot| *slot.borrow_mut() = Some(Box::new(app)));

	spawn_local(async move {
		match load_users.await {
			Ok(Some(count)) => info!("Loaded {} user(s).", count),
			Ok(None) => warn!("No users available."),
			Err(error) => error!("Failed to populate user selection: {}", error),
		}
	});
}

fn install_logging() {
	LOGGING.call_once(tracing_wasm::set_as_global_default);
}

#[cfg(all(target_arch = "wasm32", feature = "entry-point"))]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run() {
	start_from_page();
}
