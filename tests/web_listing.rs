#![cfg(target_arch = "wasm32")]

use bumpalo::Bump;
use futures::future::join;
use posts_dom::{
	api::{Endpoint, StaticSource},
	listing::{Listing, Refresh, PLACEHOLDER_CLASS},
	load::load_element,
	model::{Comment, PostId},
	visibility::Toggle,
	vdom::{child_elements, flatten, has_class, text_content, Element},
};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

use web_source_::{init_logging, mount_point, post, user};

fn listing(source: StaticSource) -> Listing<StaticSource> {
	init_logging();
	Listing::new(mount_point("main", "listing-under-test"), Rc::new(source), "Nothing to show.").unwrap()
}

fn source() -> StaticSource {
	StaticSource::new()
		.with_user(user(1, "Leanne", "Romaguera-Crona", "Multi-layered"))
		.with_comment(PostId(7), Comment::new("n", "e@x", "b"))
		.with_comment(PostId(7), Comment::new("m", "f@x", "c"))
}

fn button(listing: &Listing<StaticSource>, post_id: u32) -> HtmlElement {
	listing
		.container()
		.query_selector(&format!("button[data-post-id=\"{}\"]", post_id))
		.unwrap()
		.unwrap()
		.dyn_into()
		.unwrap()
}

fn section_hidden(listing: &Listing<StaticSource>, post_id: u32) -> bool {
	listing
		.container()
		.query_selector(&format!("section[data-post-id=\"{}\"]", post_id))
		.unwrap()
		.unwrap()
		.class_list()
		.contains("hide")
}

fn rendered<'a>(listing: &Listing<StaticSource>, bump: &'a Bump) -> Vec<&'a Element<'a>> {
	child_elements(bump.alloc(load_element(listing.container(), bump)))
}

fn title(article: &Element<'_>) -> String {
	text_content(child_elements(article)[0].content)
}

#[wasm_bindgen_test]
async fn renders_one_article_per_post_in_order() {
	let listing = listing(source());
	let posts = vec![post(9, 1, "nine", ""), post(7, 1, "seven", ""), post(8, 1, "eight", "")];

	assert_eq!(listing.refresh(Some(posts)).await.unwrap(), Refresh::Rendered(3));

	let bump = Bump::new();
	let articles = rendered(&listing, &bump);
	assert_eq!(articles.len(), 3);
	for (article, expected) in articles.iter().zip(["nine", "seven", "eight"]) {
		assert_eq!(article.name, "ARTICLE");
		assert_eq!(title(article), expected);
		let children = child_elements(article);
		assert_eq!(children.iter().filter(|child| child.name == "BUTTON").count(), 1);
		assert_eq!(children.iter().filter(|child| child.name == "SECTION").count(), 1);
	}

	let comments = *child_elements(articles[1]).last().unwrap();
	assert_eq!(child_elements(comments).len(), 2);
	assert!(section_hidden(&listing, 7));
}

#[wasm_bindgen_test]
async fn absent_or_empty_posts_show_placeholder() {
	let listing = listing(source());
	listing.refresh(Some(vec![post(7, 1, "t", "b")])).await.unwrap();

	for posts in [None, Some(vec![])] {
		assert_eq!(listing.refresh(posts).await.unwrap(), Refresh::Placeholder);

		let bump = Bump::new();
		let container = load_element(listing.container(), &bump);
		assert_eq!(flatten(container.content).len(), 1);
		let placeholder = child_elements(&container)[0];
		assert_eq!(placeholder.name, "P");
		assert!(has_class(placeholder, PLACEHOLDER_CLASS));
		assert_eq!(text_content(placeholder.content), "Nothing to show.");
		assert_eq!(listing.state(PostId(7)), None);
	}
}

#[wasm_bindgen_test]
async fn toggle_round_trip() {
	let listing = listing(source());
	listing.refresh(Some(vec![post(7, 1, "t", "b"), post(8, 1, "u", "c")])).await.unwrap();

	let button = button(&listing, 7);
	assert_eq!(button.text_content().unwrap(), "Show Comments");
	assert!(section_hidden(&listing, 7));

	button.click();
	assert_eq!(listing.state(PostId(7)), Some(Toggle::Expanded));
	assert_eq!(button.text_content().unwrap(), "Hide Comments");
	assert!(!section_hidden(&listing, 7));

	button.click();
	assert_eq!(listing.state(PostId(7)), Some(Toggle::Collapsed));
	assert_eq!(button.text_content().unwrap(), "Show Comments");
	assert!(section_hidden(&listing, 7));

	assert_eq!(listing.state(PostId(8)), Some(Toggle::Collapsed));
	assert!(section_hidden(&listing, 8));
}

#[wasm_bindgen_test]
async fn repeated_refresh_keeps_a_single_listener() {
	let listing = listing(source());
	let posts = vec![post(7, 1, "t", "b")];
	listing.refresh(Some(posts.clone())).await.unwrap();
	listing.refresh(Some(posts)).await.unwrap();

	// A duplicated listener would toggle twice per click.
	button(&listing, 7).click();
	assert_eq!(listing.state(PostId(7)), Some(Toggle::Expanded));
	assert_eq!(button(&listing, 7).text_content().unwrap(), "Hide Comments");
}

#[wasm_bindgen_test]
async fn refresh_collapses_expanded_posts() {
	let listing = listing(source());
	let posts = vec![post(7, 1, "t", "b")];
	listing.refresh(Some(posts.clone())).await.unwrap();
	assert_eq!(listing.toggle(PostId(7)), Some(Toggle::Expanded));

	listing.refresh(Some(posts)).await.unwrap();
	assert_eq!(listing.state(PostId(7)), Some(Toggle::Collapsed));
	assert!(section_hidden(&listing, 7));
}

#[wasm_bindgen_test]
async fn tracked_posts_match_attached_articles() {
	let listing = listing(source());
	let buttons = |listing: &Listing<StaticSource>| listing.container().query_selector_all("button[data-post-id]").unwrap().length() as usize;

	listing.refresh(Some(vec![post(7, 1, "t", "b"), post(8, 1, "u", "c")])).await.unwrap();
	assert_eq!(listing.len(), 2);
	assert_eq!(buttons(&listing), 2);

	listing.refresh(Some(vec![post(9, 1, "v", "d")])).await.unwrap();
	assert_eq!(listing.len(), 1);
	assert_eq!(buttons(&listing), 1);
	assert_eq!(listing.state(PostId(7)), None);
	assert_eq!(listing.state(PostId(9)), Some(Toggle::Collapsed));

	listing.refresh(None).await.unwrap();
	assert!(listing.is_empty());
	assert_eq!(buttons(&listing), 0);
}

#[wasm_bindgen_test]
async fn toggle_without_section_is_a_no_op() {
	let listing = listing(source());
	listing.refresh(Some(vec![post(7, 1, "t", "b")])).await.unwrap();

	listing.container().query_selector("section[data-post-id=\"7\"]").unwrap().unwrap().remove();
	button(&listing, 7).click();

	assert_eq!(listing.state(PostId(7)), Some(Toggle::Collapsed));
	assert_eq!(button(&listing, 7).text_content().unwrap(), "Show Comments");
	assert_eq!(listing.toggle(PostId(99)), None);
}

#[wasm_bindgen_test]
async fn stale_refresh_does_not_attach() {
	let source = source();
	let release = source.hold(Endpoint::PostComments(PostId(1)));
	let listing = listing(source);

	let (stale, current) = join(listing.refresh(Some(vec![post(1, 1, "stale", "")])), async {
		let current = listing.refresh(Some(vec![post(7, 1, "current", "")])).await;
		release.send(()).unwrap();
		current
	})
	.await;

	assert_eq!(stale.unwrap(), Refresh::Stale);
	assert_eq!(current.unwrap(), Refresh::Rendered(1));

	let bump = Bump::new();
	let articles = rendered(&listing, &bump);
	assert_eq!(articles.len(), 1);
	assert_eq!(title(articles[0]), "current");
	assert_eq!(listing.state(PostId(1)), None);
}

#[wasm_bindgen_test]
async fn outdated_ticket_is_refused_before_fetching() {
	let listing = listing(source());
	let outdated = listing.begin();
	listing.refresh(Some(vec![post(7, 1, "current", "")])).await.unwrap();

	assert_eq!(listing.refresh_with(outdated, Some(vec![post(8, 1, "outdated", "")])).await.unwrap(), Refresh::Stale);
	assert_eq!(listing.state(PostId(7)), Some(Toggle::Collapsed));
	assert_eq!(listing.state(PostId(8)), None);
}

#[wasm_bindgen_test]
async fn dropping_the_listing_removes_its_listener() {
	let listing = listing(source());
	listing.refresh(Some(vec![post(7, 1, "t", "b")])).await.unwrap();
	let button = button(&listing, 7);

	drop(listing);
	button.click();

	assert_eq!(button.text_content().unwrap(), "Show Comments");
}
