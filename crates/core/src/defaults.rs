//! Stock element transforms: `class` renaming and component remapping.

use crate::components::ComponentTable;
use crate::element::{Element, Tag};
use crate::transform::ElementTransform;
use std::sync::Arc;

/// Attribute renamed by [`class_name_transform`].
pub const CLASS_ATTR: &str = "class";
/// Attribute that receives the `class` value.
pub const CLASS_NAME_ATTR: &str = "className";

/// Moves the `class` attribute to `className`.
///
/// Elements without props, or whose props lack `class`, are returned as-is.
/// An existing `className` is overwritten. Applying the transform twice is
/// the same as applying it once.
///
/// # Example
///
/// ```
/// use htmify_core::{Element, class_name_transform};
/// use serde_json::json;
///
/// let element: Element = serde_json::from_value(json!(["div", {"class": "note"}, []])).unwrap();
/// let element = class_name_transform(element);
/// assert_eq!(element.prop("className"), Some(&json!("note")));
/// assert_eq!(element.prop("class"), None);
/// ```
pub fn class_name_transform<C, V>(mut element: Element<C, V>) -> Element<C, V> {
    if let Some(props) = element.props.as_mut()
        && let Some(value) = props.remove(CLASS_ATTR)
    {
        props.insert(CLASS_NAME_ATTR.to_string(), value);
    }
    element
}

/// [`class_name_transform`] as an [`ElementTransform`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassNameTransform;

impl<C, V> ElementTransform<C, V> for ClassNameTransform {
    fn apply(&self, element: Element<C, V>) -> Element<C, V> {
        class_name_transform(element)
    }
}

/// Remaps string tags through a [`ComponentTable`].
///
/// Built by [`component_transform`]. Cloning shares the table.
#[derive(Debug)]
pub struct ComponentTransform<C = String> {
    components: Arc<ComponentTable<C>>,
}

impl<C> Clone for ComponentTransform<C> {
    fn clone(&self) -> Self {
        Self {
            components: Arc::clone(&self.components),
        }
    }
}

impl<C> ComponentTransform<C> {
    /// The table this transform reads from.
    pub fn components(&self) -> &ComponentTable<C> {
        &self.components
    }
}

impl<C: Clone> ComponentTransform<C> {
    /// Replaces a string tag found in the table with its component.
    ///
    /// Component tags and unknown names pass through unchanged.
    pub fn remap<V>(&self, mut element: Element<C, V>) -> Element<C, V> {
        element.tag = self.remap_tag(element.tag);
        element
    }

    /// Remaps a bare tag; the element-free form of [`Self::remap`].
    pub fn remap_tag(&self, tag: Tag<C>) -> Tag<C> {
        let component = match &tag {
            Tag::Name(name) => {
                let found = self.components.get(name);
                if found.is_some() {
                    log::trace!("remapping tag <{}> to component", name);
                }
                found
            }
            Tag::Component(_) => None,
        };
        match component {
            Some(component) => Tag::Component(component.clone()),
            None => tag,
        }
    }
}

impl<C: Clone, V> ElementTransform<C, V> for ComponentTransform<C> {
    fn apply(&self, element: Element<C, V>) -> Element<C, V> {
        self.remap(element)
    }
}

/// Builds a transform that remaps string tags found in `components`.
///
/// # Example
///
/// ```
/// use htmify_core::{ComponentTable, Element, Tag, component_transform};
///
/// let table: ComponentTable = [("Aside", "StarlightAside".to_string())]
///     .into_iter()
///     .collect();
/// let remap = component_transform(table);
///
/// let element: Element = remap.remap(Element::new("Aside", None, vec![]));
/// assert_eq!(element.tag, Tag::Component("StarlightAside".to_string()));
///
/// let element: Element = remap.remap(Element::new("aside", None, vec![]));
/// assert_eq!(element.tag, Tag::Name("aside".to_string()));
/// ```
pub fn component_transform<C>(
    components: impl Into<Arc<ComponentTable<C>>>,
) -> ComponentTransform<C> {
    ComponentTransform {
        components: components.into(),
    }
}
