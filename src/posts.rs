//! Post articles, each with author details, a toggle button and its comment section.

use crate::{
	api::Source,
	builder::labeled_element,
	comments::{comment_section, POST_ID_ATTRIBUTE},
	model::{Post, PostId, User},
	visibility::Toggle,
	vdom::{attribute, html_element, multi, text, Fragment, Node},
};
use bumpalo::Bump;
use futures::future::{join, join_all};
use tracing::{debug, instrument};

/// One `<article>` per post, in input order.
///
/// Author and comment requests for all posts are in flight at the same time;
/// the articles are still assembled in the order of `posts`.
///
/// [`None`] without input.
#[instrument(skip(bump, source, posts), fields(len = posts.map(<[Post]>::len)))]
pub async fn posts_fragment<'a, S: Source>(bump: &'a Bump, source: &S, posts: Option<&[Post]>) -> Option<Fragment<'a>> {
	let posts = posts?;
	let articles = join_all(posts.iter().map(|post| post_article(bump, source, post))).await;
	let articles: &[_] = bump.alloc_slice_fill_iter(articles);
	Some(articles)
}

/// Fetches the author and comments of `post` and assembles its article.
pub async fn post_article<'a, S: Source>(bump: &'a Bump, source: &S, post: &Post) -> Node<'a> {
	let (author, section) = join(source.get_user(post.user_id), comment_section(bump, source, post.id)).await;
	if author.is_none() {
		debug!(post_id = %post.id, user_id = %post.user_id, "Author unavailable.");
	}
	compose_article(bump, post, author.as_ref(), section)
}

/// Title, body, id, author, catchphrase, toggle button and comment section, in that order.
#[must_use]
pub fn compose_article<'a>(bump: &'a Bump, post: &Post, author: Option<&User>, section: Node<'a>) -> Node<'a> {
	let (author_line, catch_phrase) = match author {
		Some(author) => (format!("Author: {} with {}", author.name, author.company.name), author.company.catch_phrase.as_str()),
		None => ("Author: unknown".to_owned(), ""),
	};

	html_element(
		bump,
		"ARTICLE",
		&[],
		multi(
			bump,
			[
				labeled_element(bump, "H2", &post.title, None),
				labeled_element(bump, "P", &post.body, None),
				labeled_element(bump, "P", &format!("Post ID: {}", post.id), None),
				labeled_element(bump, "P", &author_line, None),
				labeled_element(bump, "P", catch_phrase, None),
				toggle_button(bump, post.id),
				section,
			],
		),
	)
}

#[must_use]
pub fn toggle_button(bump: &Bump, post_id: PostId) -> Node<'_> {
	html_element(bump, "BUTTON", bump.alloc([attribute(bump, POST_ID_ATTRIBUTE, &post_id.to_string())]), text(bump, Toggle::Collapsed.label()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		api::StaticSource,
		comments::HIDDEN_CLASS,
		model::{Comment, Company, UserId},
		vdom::{as_element, attribute_value, child_elements, has_class, text_content, Element},
	};
	use futures::executor::block_on;

	fn summary(article: &Element<'_>) -> Vec<(String, String)> {
		child_elements(article).into_iter().map(|child| (child.name.to_owned(), text_content(child.content))).collect()
	}

	fn button_id<'a>(article: &Element<'a>) -> &'a str {
		let button = child_elements(article).into_iter().find(|child| child.name == "BUTTON").unwrap();
		attribute_value(button, POST_ID_ATTRIBUTE).unwrap()
	}

	#[test]
	fn article_layout() {
		let bump = Bump::new();
		let source = StaticSource::new().with_user(User::new(UserId(3), "A", Company::new("C", "P")));
		let fragment = block_on(posts_fragment(&bump, &source, Some(&[Post::new(PostId(7), UserId(3), "T", "B")][..]))).unwrap();
		assert_eq!(fragment.len(), 1);

		let article = as_element(fragment[0]).unwrap();
		assert_eq!(article.name, "ARTICLE");
		assert_eq!(
			summary(article),
			[
				("H2", "T"),
				("P", "B"),
				("P", "Post ID: 7"),
				("P", "Author: A with C"),
				("P", "P"),
				("BUTTON", "Show Comments"),
				("SECTION", ""),
			]
			.map(|(name, text)| (name.to_owned(), text.to_owned()))
		);

		let children = child_elements(article);
		assert_eq!(attribute_value(children[5], POST_ID_ATTRIBUTE), Some("7"));
		assert_eq!(attribute_value(children[6], POST_ID_ATTRIBUTE), Some("7"));
		assert!(has_class(children[6], HIDDEN_CLASS));
	}

	#[test]
	fn articles_keep_post_order() {
		let bump = Bump::new();
		let source = StaticSource::new().with_user(User::new(UserId(1), "A", Company::new("C", "P"))).with_user(User::new(UserId(2), "B", Company::new("D", "Q")));
		let posts = [Post::new(PostId(30), UserId(2), "third", ""), Post::new(PostId(10), UserId(1), "first", ""), Post::new(PostId(20), UserId(2), "second", "")];
		let fragment = block_on(posts_fragment(&bump, &source, Some(&posts[..]))).unwrap();

		let ids: Vec<_> = fragment.iter().map(|article| button_id(as_element(*article).unwrap())).collect();
		assert_eq!(ids, ["30", "10", "20"]);
	}

	#[test]
	fn every_article_has_one_button_and_one_section() {
		let bump = Bump::new();
		let source = StaticSource::new().with_user(User::new(UserId(1), "A", Company::new("C", "P"))).with_comment(PostId(1), Comment::new("n", "e@x", "b"));
		let posts: Vec<_> = (1..=5).map(|id| Post::new(PostId(id), UserId(1), "t", "b")).collect();
		let fragment = block_on(posts_fragment(&bump, &source, Some(posts.as_slice()))).unwrap();

		assert_eq!(fragment.len(), 5);
		for article in fragment {
			let children = child_elements(as_element(*article).unwrap());
			assert_eq!(children.iter().filter(|child| child.name == "BUTTON").count(), 1);
			assert_eq!(children.iter().filter(|child| child.name == "SECTION").count(), 1);
		}
	}

	#[test]
	fn missing_author_keeps_structure() {
		let bump = Bump::new();
		let fragment = block_on(posts_fragment(&bump, &StaticSource::new(), Some(&[Post::new(PostId(1), UserId(99), "t", "b")][..]))).unwrap();
		let children = child_elements(as_element(fragment[0]).unwrap());
		assert_eq!(children.len(), 7);
		assert_eq!(text_content(children[3].content), "Author: unknown");
	}

	#[test]
	fn absent_posts() {
		let bump = Bump::new();
		assert!(block_on(posts_fragment(&bump, &StaticSource::new(), None)).is_none());
	}
}
