//! Renders a listing of users, their posts and nested comments into the browser DOM.
//!
//! Data is fetched from a REST resource through a [`Source`](`api::Source`), assembled into detached [`lignin`] trees (see [`vdom`])
//! and only then [materialized](`create`) into a [***DocumentFragment***](https://developer.mozilla.org/en-US/docs/Web/API/DocumentFragment).
//! Comment visibility is tracked per post by the [`Listing`](`listing::Listing`), with the DOM as a projection of that state.

#![doc(html_root_url = "https://docs.rs/posts-dom/0.1.0")]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod api;
pub mod bootstrap;
pub mod builder;
pub mod comments;
pub mod config;
pub mod create;
pub mod error;
pub mod generation;
pub mod listing;
pub mod load;
pub mod model;
pub mod posts;
pub mod selection;
pub mod visibility;
pub mod vdom;

pub use config::Config;
pub use error::{Error, FetchError};
