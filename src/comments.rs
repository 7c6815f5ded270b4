//! Comment articles and the collapsible section holding them.

use crate::{
	api::Source,
	builder::labeled_element,
	model::{Comment, PostId},
	vdom::{attribute, html_element, multi, Fragment, Node},
};
use bumpalo::Bump;
use tracing::debug;

/// Pairs a post's toggle button with its comment section.
pub const POST_ID_ATTRIBUTE: &str = "data-post-id";
pub const COMMENTS_CLASS: &str = "comments";
/// Present on a comment section while it is collapsed.
pub const HIDDEN_CLASS: &str = "hide";

/// One `<article>` per comment: name heading, body and sender.
///
/// [`None`] without input (as opposed to an empty fragment for zero comments).
#[must_use]
pub fn comments_fragment<'a>(bump: &'a Bump, comments: Option<&[Comment]>) -> Option<Fragment<'a>> {
	let comments = comments?;
	let articles: &[_] = bump.alloc_slice_fill_iter(comments.iter().map(|comment| comment_article(bump, comment)));
	Some(articles)
}

fn comment_article<'a>(bump: &'a Bump, comment: &Comment) -> Node<'a> {
	html_element(
		bump,
		"ARTICLE",
		&[],
		multi(
			bump,
			[
				labeled_element(bump, "H3", &comment.name, None),
				labeled_element(bump, "P", &comment.body, None),
				labeled_element(bump, "P", &format!("From: {}", comment.email), None),
			],
		),
	)
}

/// A collapsed section keyed by `post_id`, filled with that post's comments.
///
/// A failed fetch leaves the section empty.
pub async fn comment_section<'a, S: Source>(bump: &'a Bump, source: &S, post_id: PostId) -> Node<'a> {
	let comments = source.list_post_comments(post_id).await;
	if comments.is_none() {
		debug!(%post_id, "No comments to render.");
	}
	section_with(bump, post_id, comments_fragment(bump, comments.as_deref()).unwrap_or_default())
}

#[must_use]
pub fn section_with<'a>(bump: &'a Bump, post_id: PostId, fragment: Fragment<'a>) -> Node<'a> {
	html_element(
		bump,
		"SECTION",
		bump.alloc([attribute(bump, POST_ID_ATTRIBUTE, &post_id.to_string()), attribute(bump, "class", &format!("{} {}", COMMENTS_CLASS, HIDDEN_CLASS))]),
		Node::Multi(fragment),
	)
}
