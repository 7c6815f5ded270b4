//! Records of the remote resource, as far as they are rendered.
//!
//! Fields the resource returns beyond these (`username`, `address`, …) are ignored while decoding.

use core::{fmt, num::ParseIntError, str::FromStr};
use serde::{Deserialize, Serialize};

macro_rules! id {
	($(#[$attr:meta])* $name:ident) => {
		$(#[$attr])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(pub u32);

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				fmt::Display::fmt(&self.0, f)
			}
		}

		impl FromStr for $name {
			type Err = ParseIntError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				s.trim().parse().map(Self)
			}
		}
	};
}

id!(
	/// Identifies a [`User`]. Also the value of each selection option.
	UserId
);
id!(
	/// Identifies a [`Post`]. Rendered as the `data-post-id` attribute that pairs toggle buttons with comment sections.
	PostId
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
	pub name: String,
	pub catch_phrase: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
	pub id: UserId,
	pub name: String,
	pub company: Company,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
	pub id: PostId,
	pub user_id: UserId,
	pub title: String,
	pub body: String,
}

/// A comment on a post.
///
/// The owning post is known from the request that returned it,
/// so `post_id` is optional here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub post_id: Option<PostId>,
	pub name: String,
	pub email: String,
	pub body: String,
}

impl Company {
	#[must_use]
	pub fn new(name: impl Into<String>, catch_phrase: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			catch_phrase: catch_phrase.into(),
		}
	}
}

impl User {
	#[must_use]
	pub fn new(id: UserId, name: impl Into<String>, company: Company) -> Self {
		Self { id, name: name.into(), company }
	}
}

impl Post {
	#[must_use]
	pub fn new(id: PostId, user_id: UserId, title: impl Into<String>, body: impl Into<String>) -> Self {
		Self {
			id,
			user_id,
			title: title.into(),
			body: body.into(),
		}
	}
}

impl Comment {
	/// A comment whose owning post is implied by where it is used.
	#[must_use]
	pub fn new(name: impl Into<String>, email: impl Into<String>, body: impl Into<String>) -> Self {
		Self {
			post_id: None,
			name: name.into(),
			email: email.into(),
			body: body.into(),
		}
	}
}
