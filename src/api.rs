//! Read-only access to the remote resource.

use crate::{
	error::FetchError,
	model::{Comment, Post, PostId, User, UserId},
};
use core::cell::RefCell;
use futures::channel::oneshot;
use hashbrown::HashMap;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument, trace};

/// The four queries the listing needs.
///
/// Every operation issues exactly one request. Failures are logged and surface as [`None`],
/// which callers render as "nothing to show". Nothing is cached or retried.
#[allow(async_fn_in_trait)] // Single-threaded; no `Send` bounds are wanted.
pub trait Source {
	async fn list_users(&self) -> Option<Vec<User>>;
	async fn get_user(&self, id: UserId) -> Option<User>;
	async fn list_user_posts(&self, id: UserId) -> Option<Vec<Post>>;
	async fn list_post_comments(&self, id: PostId) -> Option<Vec<Comment>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
	Users,
	User(UserId),
	UserPosts(UserId),
	PostComments(PostId),
}

impl Endpoint {
	#[must_use]
	pub fn path(self) -> String {
		match self {
			Endpoint::Users => "/users".to_owned(),
			Endpoint::User(id) => format!("/users/{}", id),
			Endpoint::UserPosts(id) => format!("/users/{}/posts", id),
			Endpoint::PostComments(id) => format!("/posts/{}/comments", id),
		}
	}

	#[must_use]
	pub fn url(self, base: &str) -> String {
		format!("{}{}", base.trim_end_matches('/'), self.path())
	}
}

/// [`Source`] over HTTP. On `wasm32`, requests go through the browser's `fetch`.
#[derive(Debug, Clone)]
pub struct HttpSource {
	client: reqwest::Client,
	base: String,
}

impl HttpSource {
	#[must_use]
	pub fn new(base: impl Into<String>) -> Self {
		Self {
			client: reqwest::Client::new(),
			base: base.into(),
		}
	}

	#[must_use]
	pub fn base(&self) -> &str {
		&self.base
	}

	async fn fetch_json<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, FetchError> {
		let url = endpoint.url(&self.base);
		let response = match self.client.get(&url).send().await {
			Ok(response) => response,
			Err(source) => return Err(FetchError::Transport { url, source }),
		};

		let status = response.status();
		if !status.is_success() {
			return Err(FetchError::Status { url, status: status.as_u16() });
		}

		let text = match response.text().await {
			Ok(text) => text,
			Err(source) => return Err(FetchError::Transport { url, source }),
		};
		trace!(%url, len = text.len(), "Received response body.");
		serde_json::from_str(&text).map_err(|source| FetchError::Decode { url, source })
	}

	#[instrument(skip(self))]
	async fn query<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Option<T> {
		match self.fetch_json(endpoint).await {
			Ok(value) => Some(value),
			Err(fetch_error) => {
				error!("{}", fetch_error);
				None
			}
		}
	}
}

impl Source for HttpSource {
	async fn list_users(&self) -> Option<Vec<User>> {
		self.query(Endpoint::Users).await
	}

	async fn get_user(&self, id: UserId) -> Option<User> {
		self.query(Endpoint::User(id)).await
	}

	async fn list_user_posts(&self, id: UserId) -> Option<Vec<Post>> {
		self.query(Endpoint::UserPosts(id)).await
	}

	async fn list_post_comments(&self, id: PostId) -> Option<Vec<Comment>> {
		self.query(Endpoint::PostComments(id)).await
	}
}

/// [`Source`] serving fixed records, for demos and tests. Missing entries behave like failed requests.
///
/// Single requests can be [held back](`StaticSource::hold`) to control the order in which they complete.
#[derive(Debug, Default)]
pub struct StaticSource {
	users: Option<Vec<User>>,
	posts: HashMap<UserId, Vec<Post>>,
	comments: HashMap<PostId, Vec<Comment>>,
	held: RefCell<HashMap<Endpoint, oneshot::Receiver<()>>>,
}

impl StaticSource {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with_user(mut self, user: User) -> Self {
		self.users.get_or_insert_with(Vec::new).push(user);
		self
	}

	/// Listed under the post's [`user_id`](`Post::user_id`).
	#[must_use]
	pub fn with_post(mut self, post: Post) -> Self {
		self.posts.entry(post.user_id).or_default().push(post);
		self
	}

	#[must_use]
	pub fn with_comment(mut self, post_id: PostId, comment: Comment) -> Self {
		self.comments.entry(post_id).or_default().push(comment);
		self
	}

	/// The next request to `endpoint` waits until the returned sender fires or is dropped.
	pub fn hold(&self, endpoint: Endpoint) -> oneshot::Sender<()> {
		let (sender, receiver) = oneshot::channel();
		self.held.borrow_mut().insert(endpoint, receiver);
		sender
	}

	async fn pass(&self, endpoint: Endpoint) {
		let held = self.held.borrow_mut().remove(&endpoint);
		if let Some(receiver) = held {
			debug!(?endpoint, "Holding request.");
			receiver.await.ok();
		}
	}
}

impl Source for StaticSource {
	async fn list_users(&self) -> Option<Vec<User>> {
		self.pass(Endpoint::Users).await;
		self.users.clone()
	}

	async fn get_user(&self, id: UserId) -> Option<User> {
		self.pass(Endpoint::User(id)).await;
		self.users.as_ref()?.iter().find(|user| user.id == id).cloned()
	}

	async fn list_user_posts(&self, id: UserId) -> Option<Vec<Post>> {
		self.pass(Endpoint::UserPosts(id)).await;
		self.posts.get(&id).cloned()
	}

	async fn list_post_comments(&self, id: PostId) -> Option<Vec<Comment>> {
		self.pass(Endpoint::PostComments(id)).await;
		self.comments.get(&id).cloned()
	}
}
