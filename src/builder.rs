//! Small pure node constructors.

use crate::{
	model::User,
	vdom::{attribute, html_element, text, Fragment, Node},
};
use bumpalo::Bump;

/// One `tag` element containing `text`, optionally with one class.
#[must_use]
pub fn labeled_element<'a>(bump: &'a Bump, tag: &'a str, label: &str, class_name: Option<&'a str>) -> Node<'a> {
	let attributes: &[_] = match class_name {
		Some(class_name) => bump.alloc([attribute(bump, "class", class_name)]),
		None => &[],
	};
	html_element(bump, tag, attributes, text(bump, label))
}

/// One `<option>` per user, in input order, valued by user id and labeled by name.
///
/// [`None`] without input, so that "no users were fetched" stays distinguishable from "there are no users".
#[must_use]
pub fn user_options<'a>(bump: &'a Bump, users: Option<&[User]>) -> Option<Fragment<'a>> {
	let users = users?;
	let options: &[_] = bump.alloc_slice_fill_iter(users.iter().map(|user| html_element(bump, "OPTION", bump.alloc([attribute(bump, "value", &user.id.to_string())]), text(bump, &user.name))));
	Some(options)
}
