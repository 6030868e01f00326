//! Element tuple model shared by the element transforms.
//!
//! An element is the `(tag, props, children)` triple a JSX-style
//! transpilation step hands to an HTM renderer. The component identifier
//! type `C` and the value type `V` are generic so bindings can carry host
//! values opaquely; the defaults make elements (de)serializable as JSON
//! arrays.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute name to value mapping.
pub type Props<V = serde_json::Value> = BTreeMap<String, V>;

/// Element tag: either a plain string (remappable) or an opaque component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag<C = String> {
    /// Plain string tag such as `"div"` or `"Aside"`.
    Name(String),
    /// Resolved component identifier; never remapped.
    Component(C),
}

impl<C> Tag<C> {
    /// Returns the tag name when this is a plain string tag.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Tag::Name(name) => Some(name),
            Tag::Component(_) => None,
        }
    }

    /// Returns the component identifier when this tag is resolved.
    pub fn as_component(&self) -> Option<&C> {
        match self {
            Tag::Name(_) => None,
            Tag::Component(component) => Some(component),
        }
    }

    /// Whether this tag refers to a resolved component.
    pub fn is_component(&self) -> bool {
        matches!(self, Tag::Component(_))
    }
}

impl<C> From<&str> for Tag<C> {
    fn from(name: &str) -> Self {
        Tag::Name(name.to_string())
    }
}

impl<C> From<String> for Tag<C> {
    fn from(name: String) -> Self {
        Tag::Name(name)
    }
}

impl<C: Serialize> Serialize for Tag<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Tag::Name(name) => serializer.serialize_str(name),
            Tag::Component(component) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("component", component)?;
                map.end()
            }
        }
    }
}

impl<'de, C: Deserialize<'de>> Deserialize<'de> for Tag<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<C> {
            Name(String),
            Component { component: C },
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Name(name) => Tag::Name(name),
            Repr::Component { component } => Tag::Component(component),
        })
    }
}

/// One markup node: `(tag, props, children)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Element<C = String, V = serde_json::Value> {
    /// Element tag.
    pub tag: Tag<C>,
    /// Attributes, or `None` when the element carries no props object.
    pub props: Option<Props<V>>,
    /// Child values, passed through untouched by every transform.
    pub children: Vec<V>,
}

impl<C, V> Element<C, V> {
    /// Creates an element from its parts.
    pub fn new(tag: impl Into<Tag<C>>, props: Option<Props<V>>, children: Vec<V>) -> Self {
        Self {
            tag: tag.into(),
            props,
            children,
        }
    }

    /// Splits the element into its tuple parts.
    pub fn into_parts(self) -> (Tag<C>, Option<Props<V>>, Vec<V>) {
        (self.tag, self.props, self.children)
    }

    /// Looks up a single attribute.
    pub fn prop(&self, name: &str) -> Option<&V> {
        self.props.as_ref()?.get(name)
    }
}

impl<C, V> From<(Tag<C>, Option<Props<V>>, Vec<V>)> for Element<C, V> {
    fn from((tag, props, children): (Tag<C>, Option<Props<V>>, Vec<V>)) -> Self {
        Self {
            tag,
            props,
            children,
        }
    }
}

impl<C, V> From<Element<C, V>> for (Tag<C>, Option<Props<V>>, Vec<V>) {
    fn from(element: Element<C, V>) -> Self {
        element.into_parts()
    }
}

impl<C: Serialize, V: Serialize> Serialize for Element<C, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.tag)?;
        tuple.serialize_element(&self.props)?;
        tuple.serialize_element(&self.children)?;
        tuple.end()
    }
}

impl<'de, C: Deserialize<'de>, V: Deserialize<'de>> Deserialize<'de> for Element<C, V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <(Tag<C>, Option<Props<V>>, Vec<V>)>::deserialize(deserializer).map(Element::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_json_triple() {
        let element: Element = serde_json::from_value(json!([
            "div",
            { "class": "note" },
            ["hello", ["span", null, []]]
        ]))
        .unwrap();

        assert_eq!(element.tag, Tag::Name("div".to_string()));
        assert_eq!(element.prop("class"), Some(&json!("note")));
        assert_eq!(element.children.len(), 2);
    }

    #[test]
    fn component_tag_uses_object_form() {
        let element: Element = serde_json::from_value(json!([
            { "component": "Aside" },
            null,
            []
        ]))
        .unwrap();

        assert_eq!(element.tag.as_component().map(String::as_str), Some("Aside"));
        assert!(element.props.is_none());
        assert_eq!(
            serde_json::to_value(&element).unwrap(),
            json!([{ "component": "Aside" }, null, []])
        );
    }

    #[test]
    fn parts_conversion() {
        let element: Element = Element::new("p", None, vec![json!("x")]);
        let (tag, props, children) = element.clone().into_parts();
        assert_eq!(tag.as_name(), Some("p"));
        assert!(props.is_none());
        assert_eq!(Element::from((tag, props, children)), element);
    }
}
