//! Detached [`lignin`] trees, allocated in a [`Bump`].
//!
//! Assemblers produce these instead of touching the DOM, so the whole pipeline can run (and be tested) without a browser.
//! [`create`](`crate::create`) turns them into real nodes; [`load`](`crate::load`) reads real nodes back.
//!
//! HTML element names are uppercase, the way ***Element.tagName*** reports them.

use bumpalo::Bump;
use lignin::{Attribute, ElementCreationOptions, ThreadBound};

pub type Node<'a> = lignin::Node<'a, ThreadBound>;
pub type Element<'a> = lignin::Element<'a, ThreadBound>;

/// A sequence of sibling nodes, attached as a unit.
pub type Fragment<'a> = &'a [Node<'a>];

#[must_use]
pub fn html_element<'a>(bump: &'a Bump, name: &'a str, attributes: &'a [Attribute<'a>], content: Node<'a>) -> Node<'a> {
	Node::HtmlElement {
		element: bump.alloc(lignin::Element {
			name,
			creation_options: ElementCreationOptions::new(),
			attributes,
			content,
			event_bindings: &[],
		}),
		dom_binding: None,
	}
}

#[must_use]
pub fn text<'a>(bump: &'a Bump, text: &str) -> Node<'a> {
	Node::Text {
		text: bump.alloc_str(text),
		dom_binding: None,
	}
}

#[must_use]
pub fn attribute<'a>(bump: &'a Bump, name: &'a str, value: &str) -> Attribute<'a> {
	Attribute {
		name,
		value: bump.alloc_str(value),
	}
}

/// Siblings as a single node.
#[must_use]
pub fn multi<'a>(bump: &'a Bump, nodes: impl IntoIterator<Item = Node<'a>>) -> Node<'a> {
	let nodes: Vec<_> = nodes.into_iter().collect();
	Node::Multi(bump.alloc_slice_fill_iter(nodes))
}

/// The element behind `node`, if it is one.
#[must_use]
pub fn as_element(node: Node<'_>) -> Option<&Element<'_>> {
	match node {
		Node::HtmlElement { element, .. } | Node::MathMlElement { element, .. } | Node::SvgElement { element, .. } => Some(element),
		_ => None,
	}
}

/// `node` as a flat list of siblings, with [`Multi`](`lignin::Node::Multi`), [`Keyed`](`lignin::Node::Keyed`) and [`Memoized`](`lignin::Node::Memoized`) grouping resolved.
#[must_use]
pub fn flatten(node: Node<'_>) -> Vec<Node<'_>> {
	let mut nodes = Vec::new();
	push_flat(node, &mut nodes);
	nodes
}

fn push_flat<'a>(node: Node<'a>, nodes: &mut Vec<Node<'a>>) {
	match node {
		Node::Multi(children) => children.iter().for_each(|child| push_flat(*child, nodes)),
		Node::Keyed(fragments) => fragments.iter().for_each(|fragment| push_flat(fragment.content, nodes)),
		Node::Memoized { content, .. } => push_flat(*content, nodes),
		other => nodes.push(other),
	}
}

/// Child elements, skipping text and comments.
#[must_use]
pub fn child_elements<'a>(element: &Element<'a>) -> Vec<&'a Element<'a>> {
	flatten(element.content).into_iter().filter_map(as_element).collect()
}

#[must_use]
pub fn attribute_value<'a>(element: &Element<'a>, name: &str) -> Option<&'a str> {
	element.attributes.iter().find(|attribute| attribute.name == name).map(|attribute| attribute.value)
}

#[must_use]
pub fn has_class(element: &Element<'_>, class_name: &str) -> bool {
	attribute_value(element, "class").is_some_and(|class| class.split_ascii_whitespace().any(|c| c == class_name))
}

/// Concatenated text of `node` and all its descendants, like ***Node.textContent***.
#[must_use]
pub fn text_content(node: Node<'_>) -> String {
	let mut text = String::new();
	push_text(node, &mut text);
	text
}

fn push_text(node: Node<'_>, text: &mut String) {
	for node in flatten(node) {
		match node {
			Node::Text { text: t, .. } => text.push_str(t),
			Node::HtmlElement { element, .. } | Node::MathMlElement { element, .. } | Node::SvgElement { element, .. } => push_text(element.content, text),
			_ => (),
		}
	}
}
