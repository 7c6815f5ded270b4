//! Reads live DOM subtrees back into [`vdom`](`crate::vdom`) trees.

use crate::vdom::{Element as lElement, Node};
use bumpalo::Bump;
use lignin::{Attribute, ElementCreationOptions};
use tracing::trace;
use wasm_bindgen::JsCast;
use web_sys::{Attr, Comment, Element, HtmlElement, NamedNodeMap, Node as wNode, NodeList, Text};

/// Loads elements, text and comments. Other node types (processing instructions, …) are skipped.
pub fn load_child_nodes<'a>(child_nodes: &NodeList, bump: &'a Bump) -> &'a [Node<'a>] {
	let nodes: Vec<_> = (0..child_nodes.length()).filter_map(|i| child_nodes.item(i)).filter_map(|child| load_node(&child, bump)).collect();
	bump.alloc_slice_fill_iter(nodes)
}

pub fn load_node<'a>(node: &wNode, bump: &'a Bump) -> Option<Node<'a>> {
	Some(if let Some(element) = node.dyn_ref::<HtmlElement>() {
		Node::HtmlElement {
			element: bump.alloc_with(|| load_element(element.as_ref(), bump)),
			dom_binding: None,
		}
	} else if let Some(element) = node.dyn_ref::<Element>() {
		let element_ref = bump.alloc_with(|| load_element(element, bump));
		match element.namespace_uri().as_deref() {
			Some("http://www.w3.org/2000/svg") => Node::SvgElement { element: element_ref, dom_binding: None },
			Some("http://www.w3.org/1998/Math/MathML") => Node::MathMlElement { element: element_ref, dom_binding: None },
			namespace => {
				trace!(?namespace, "Skipping element in unrecognised namespace.");
				return None;
			}
		}
	} else if let Some(text) = node.dyn_ref::<Text>() {
		Node::Text {
			text: bump.alloc_str(&text.data()),
			dom_binding: None,
		}
	} else if let Some(comment) = node.dyn_ref::<Comment>() {
		Node::Comment {
			comment: bump.alloc_str(&comment.data()),
			dom_binding: None,
		}
	} else {
		trace!("Skipping unrecognised child node: {:?}", node);
		return None;
	})
}

pub fn load_element<'a>(element: &Element, bump: &'a Bump) -> lElement<'a> {
	let node: &wNode = element.as_ref();
	lElement {
		name: bump.alloc_str(&element.tag_name()),
		creation_options: ElementCreationOptions::new(),
		attributes: load_attributes(&element.attributes(), bump),
		content: Node::Multi(load_child_nodes(&node.child_nodes(), bump)),
		event_bindings: &[],
	}
}

pub fn load_attributes<'a>(attributes: &NamedNodeMap, bump: &'a Bump) -> &'a [Attribute<'a>] {
	let attributes: Vec<_> = (0..attributes.length()).filter_map(|i| attributes.item(i)).map(|attribute| load_attribute(&attribute, bump)).collect();
	bump.alloc_slice_fill_iter(attributes)
}

pub fn load_attribute<'a>(attribute: &Attr, bump: &'a Bump) -> Attribute<'a> {
	Attribute {
		name: bump.alloc_str(&attribute.local_name()),
		value: bump.alloc_str(&attribute.value()),
	}
}
