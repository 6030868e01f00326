//! Transform traits and the pipeline that chains them.

use crate::components::ComponentTable;
use crate::defaults::{ClassNameTransform, component_transform};
use crate::element::Element;
use crate::htm::JsxToHtm;
use std::borrow::Cow;
use std::sync::Arc;

/// Trait for rewriting one element tuple.
pub trait ElementTransform<C, V> {
    /// Consume the element and return the rewritten element.
    fn apply(&self, element: Element<C, V>) -> Element<C, V>;
}

impl<C, V, F> ElementTransform<C, V> for F
where
    F: Fn(Element<C, V>) -> Element<C, V>,
{
    fn apply(&self, element: Element<C, V>) -> Element<C, V> {
        (self)(element)
    }
}

/// Trait for rewriting raw markup text.
pub trait TextTransform {
    /// Transform the input text, returning an owned or borrowed string.
    fn transform<'a>(&self, input: &'a str) -> Cow<'a, str>;
}

impl<F> TextTransform for F
where
    F: for<'a> Fn(&'a str) -> Cow<'a, str>,
{
    fn transform<'a>(&self, input: &'a str) -> Cow<'a, str> {
        (self)(input)
    }
}

/// Ordered element and text transforms applied as one unit.
pub struct TransformPipeline<C = String, V = serde_json::Value> {
    element_transforms: Vec<Box<dyn ElementTransform<C, V>>>,
    text_transforms: Vec<Box<dyn TextTransform>>,
}

impl<C, V> TransformPipeline<C, V> {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self {
            element_transforms: Vec::new(),
            text_transforms: Vec::new(),
        }
    }

    /// Add an element transform; transforms run in insertion order.
    pub fn add_element_transform<T: ElementTransform<C, V> + 'static>(&mut self, transform: T) {
        self.element_transforms.push(Box::new(transform));
    }

    /// Add a text transform; transforms run in insertion order.
    pub fn add_text_transform<T: TextTransform + 'static>(&mut self, transform: T) {
        self.text_transforms.push(Box::new(transform));
    }

    /// Run every element transform over one element.
    pub fn apply_element(&self, element: Element<C, V>) -> Element<C, V> {
        self.element_transforms
            .iter()
            .fold(element, |element, transform| transform.apply(element))
    }

    /// Run the element transforms over a sequence of elements.
    pub fn apply_elements<I>(&self, elements: I) -> Vec<Element<C, V>>
    where
        I: IntoIterator<Item = Element<C, V>>,
    {
        elements
            .into_iter()
            .map(|element| self.apply_element(element))
            .collect()
    }

    /// Run every text transform, borrowing the input while nothing changed.
    pub fn apply_text<'a>(&self, input: &'a str) -> Cow<'a, str> {
        let mut current = Cow::Borrowed(input);
        for transform in &self.text_transforms {
            let next = match &current {
                Cow::Borrowed(text) => transform.transform(*text),
                Cow::Owned(text) => match transform.transform(text) {
                    Cow::Borrowed(_) => continue,
                    Cow::Owned(changed) => Cow::Owned(changed),
                },
            };
            current = next;
        }
        current
    }
}

impl<C: Clone + 'static, V: 'static> TransformPipeline<C, V> {
    /// Pipeline with the stock transforms: `class` renaming, component
    /// remapping for `components`, and the interpolation rewrite.
    pub fn with_defaults(components: impl Into<Arc<ComponentTable<C>>>) -> Self {
        let mut pipeline = Self::new();
        pipeline.add_element_transform(ClassNameTransform);
        pipeline.add_element_transform(component_transform(components));
        pipeline.add_text_transform(JsxToHtm::default());
        pipeline
    }
}

impl<C, V> Default for TransformPipeline<C, V> {
    fn default() -> Self {
        Self::new()
    }
}
