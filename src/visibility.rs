//! Per-post comment visibility.
//!
//! This map is the state; the button labels and the `hide` class in the DOM only reflect it.

use crate::model::PostId;
use hashbrown::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Toggle {
	#[default]
	Collapsed,
	Expanded,
}

impl Toggle {
	#[must_use]
	pub fn flipped(self) -> Self {
		match self {
			Toggle::Collapsed => Toggle::Expanded,
			Toggle::Expanded => Toggle::Collapsed,
		}
	}

	/// Label of the button that leaves this state.
	#[must_use]
	pub fn label(self) -> &'static str {
		match self {
			Toggle::Collapsed => "Show Comments",
			Toggle::Expanded => "Hide Comments",
		}
	}

	#[must_use]
	pub fn is_hidden(self) -> bool {
		self == Toggle::Collapsed
	}
}

#[derive(Debug, Default)]
pub struct Visibility(HashMap<PostId, Toggle>);

impl Visibility {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Forgets all posts, then tracks `post_ids` as [`Toggle::Collapsed`].
	pub fn reset(&mut self, post_ids: impl IntoIterator<Item = PostId>) {
		self.0.clear();
		self.0.extend(post_ids.into_iter().map(|post_id| (post_id, Toggle::Collapsed)));
	}

	#[must_use]
	pub fn get(&self, post_id: PostId) -> Option<Toggle> {
		self.0.get(&post_id).copied()
	}

	/// Flips the state of `post_id` and returns the new state, or [`None`] for untracked posts.
	pub fn toggle(&mut self, post_id: PostId) -> Option<Toggle> {
		let state = self.0.get_mut(&post_id)?;
		*state = state.flipped();
		Some(*state)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
