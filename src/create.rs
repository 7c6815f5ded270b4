//! Materializes [`vdom`](`crate::vdom`) trees as [`web_sys`] nodes.

use crate::{
	error::Error,
	vdom::{Element, Node},
};
use tracing::{instrument, trace, trace_span, warn};

const MATHML_NAMESPACE: &str = "http://www.w3.org/1998/Math/MathML";
const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Creates a detached [***DocumentFragment***](https://developer.mozilla.org/en-US/docs/Web/API/DocumentFragment) holding `fragment`.
///
/// Appending the result moves all of its nodes into the target in one operation.
///
/// # Errors
///
/// Iff an element name or attribute name is rejected by the DOM.
#[instrument(skip(document, fragment), fields(len = fragment.len()))]
pub fn create_fragment(document: &web_sys::Document, fragment: &[Node<'_>]) -> Result<web_sys::DocumentFragment, Error> {
	let dom_fragment = document.create_document_fragment();
	append_nodes(document, dom_fragment.as_ref(), fragment)?;
	Ok(dom_fragment)
}

/// Appends `nodes` to `parent` in order.
///
/// Event bindings and DOM bindings are not materialized.
///
/// # Errors
///
/// Iff an element name or attribute name is rejected by the DOM.
pub fn append_nodes(document: &web_sys::Document, parent: &web_sys::Node, nodes: &[Node<'_>]) -> Result<(), Error> {
	for node in nodes {
		match *node {
			Node::Comment { comment, .. } => {
				parent.append_child(document.create_comment(comment).as_ref())?;
			}

			Node::HtmlElement { element, .. } => {
				let span = trace_span!("Creating HTML element", name = element.name);
				let _enter = span.enter();
				let dom_element = match element.creation_options.is() {
					Some(is) => document.create_element_with_str(element.name, is)?,
					None => document.create_element(element.name)?,
				};
				fill_element(document, &dom_element, element)?;
				parent.append_child(dom_element.as_ref())?;
			}

			Node::MathMlElement { element, .. } => {
				let dom_element = create_element_ns(document, MATHML_NAMESPACE, element)?;
				parent.append_child(dom_element.as_ref())?;
			}

			Node::SvgElement { element, .. } => {
				let dom_element = create_element_ns(document, SVG_NAMESPACE, element)?;
				parent.append_child(dom_element.as_ref())?;
			}

			Node::Memoized { content, .. } => append_nodes(document, parent, core::slice::from_ref(content))?,
			Node::Multi(nodes) => append_nodes(document, parent, nodes)?,
			Node::Keyed(reorderable_fragments) => {
				for fragment in reorderable_fragments {
					append_nodes(document, parent, core::slice::from_ref(&fragment.content))?;
				}
			}

			Node::Text { text, .. } => {
				parent.append_child(document.create_text_node(text).as_ref())?;
			}

			Node::RemnantSite(_) => warn!("Remnant sites aren't materialized; skipping."),
		}
	}
	Ok(())
}

fn create_element_ns(document: &web_sys::Document, namespace: &str, element: &Element<'_>) -> Result<web_sys::Element, Error> {
	let span = trace_span!("Creating namespaced element", namespace, name = element.name);
	let _enter = span.enter();
	let dom_element = match element.creation_options.is() {
		Some(is) => document.create_element_ns_with_str(Some(namespace), element.name, is)?,
		None => document.create_element_ns(Some(namespace), element.name)?,
	};
	fill_element(document, &dom_element, element)?;
	Ok(dom_element)
}

fn fill_element(document: &web_sys::Document, dom_element: &web_sys::Element, element: &Element<'_>) -> Result<(), Error> {
	for attribute in element.attributes {
		dom_element.set_attribute(attribute.name, attribute.value)?;
	}
	if !element.event_bindings.is_empty() {
		trace!(count = element.event_bindings.len(), "Ignoring event bindings.");
	}
	append_nodes(document, dom_element.as_ref(), core::slice::from_ref(&element.content))
}
