use htmify_core::defaults::{CLASS_ATTR, CLASS_NAME_ATTR};
use htmify_core::{ComponentTable, ComponentTransform, HtmOptions, Tag, component_transform};
use js_sys::{Array, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// ============================================================================
// Host value helpers
// ============================================================================

fn tag_from_js(tag: JsValue) -> Tag<JsValue> {
    match tag.as_string() {
        Some(name) => Tag::Name(name),
        None => Tag::Component(tag),
    }
}

fn tag_to_js(tag: Tag<JsValue>) -> JsValue {
    match tag {
        Tag::Name(name) => JsValue::from_str(&name),
        Tag::Component(component) => component,
    }
}

fn js_error(context: &str, err: JsValue) -> JsError {
    let detail = err.as_string().unwrap_or_else(|| format!("{:?}", err));
    JsError::new(&format!("{}: {}", context, detail))
}

/// Copy of `props` that keeps its prototype and own enumerable keys, with
/// `class` moved to `className`.
fn rename_class(props: &Object) -> Result<JsValue, JsError> {
    let copy = Object::create(&Object::get_prototype_of(props));
    let copy = Object::assign(&copy, props);

    let class = Reflect::get(props, &JsValue::from_str(CLASS_ATTR))
        .map_err(|e| js_error("Failed to read prop 'class'", e))?;
    Reflect::set(&copy, &JsValue::from_str(CLASS_NAME_ATTR), &class)
        .map_err(|e| js_error("Failed to set prop 'className'", e))?;
    Reflect::delete_property(&copy, &JsValue::from_str(CLASS_ATTR))
        .map_err(|e| js_error("Failed to delete prop 'class'", e))?;

    Ok(copy.into())
}

fn string_entries(object: &Object) -> Vec<(String, JsValue)> {
    Object::entries(object)
        .iter()
        .filter_map(|entry| {
            let pair = Array::from(&entry);
            Some((pair.get(0).as_string()?, pair.get(1)))
        })
        .collect()
}

// ============================================================================
// Element transforms
// ============================================================================

/// Moves `props.class` to `props.className`.
///
/// Returns `[type, props, children]`. When `props` has a `class` key it is a
/// new object sharing the caller's prototype; otherwise `props` and
/// `children` are the caller's own values.
#[wasm_bindgen(js_name = classNameTransform)]
pub fn class_name(tag: JsValue, props: JsValue, children: JsValue) -> Result<Array, JsError> {
    let class_key = JsValue::from_str(CLASS_ATTR);
    let has_class = props
        .dyn_ref::<Object>()
        .is_some_and(|object| Reflect::has(object, &class_key).unwrap_or(false));
    let props = if has_class {
        rename_class(props.unchecked_ref())?
    } else {
        props
    };
    Ok(Array::of3(&tag, &props, &children))
}

/// Transform remapping string tags to components, built by
/// `getComponentTransform`.
#[wasm_bindgen(js_name = ComponentTransform)]
pub struct JsComponentTransform {
    inner: ComponentTransform<JsValue>,
}

#[wasm_bindgen(js_class = ComponentTransform)]
impl JsComponentTransform {
    /// Returns `[type, props, children]` with `type` remapped when it is a
    /// string key of the component table. `props` and `children` are
    /// returned as given.
    pub fn apply(&self, tag: JsValue, props: JsValue, children: JsValue) -> Array {
        let tag = tag_to_js(self.inner.remap_tag(tag_from_js(tag)));
        Array::of3(&tag, &props, &children)
    }

    /// Number of entries in the component table.
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.inner.components().len()
    }
}

/// Builds a component transform from an object mapping tag names to
/// components. Only own enumerable string keys take part in the lookup.
#[wasm_bindgen(js_name = getComponentTransform)]
pub fn get_component_transform(components: JsValue) -> Result<JsComponentTransform, JsError> {
    let object = components
        .dyn_ref::<Object>()
        .ok_or_else(|| JsError::new("components must be an object"))?;
    let table: ComponentTable<JsValue> = string_entries(object).into_iter().collect();
    Ok(JsComponentTransform {
        inner: component_transform(table),
    })
}

// ============================================================================
// Text transform
// ============================================================================

/// Rewrite result returned to JavaScript.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmResult {
    /// Rewritten text.
    pub code: String,
    /// Number of `={` markers rewritten.
    pub replacements: usize,
    /// Number of fenced blocks copied through.
    pub fenced_blocks: usize,
    /// Human readable warnings.
    pub warnings: Vec<String>,
}

fn parse_options(options: JsValue) -> Result<HtmOptions, JsError> {
    if options.is_undefined() || options.is_null() {
        return Ok(HtmOptions::default());
    }
    let options: HtmOptions = serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))?;
    options
        .validate()
        .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))?;
    Ok(options)
}

/// Rewrites `={` into `=${` outside backtick-fenced blocks.
#[wasm_bindgen(js_name = performTransFormJSXToHTM)]
pub fn perform_transform_jsx_to_htm(source: &str) -> String {
    htmify_core::transform_jsx_to_htm(source).into_owned()
}

/// Rewrites `={` into `=${` outside fenced blocks, with options
/// (`{ fenceMarkers?: string[] }`) and diagnostics.
#[wasm_bindgen(js_name = transformJsxToHtm)]
pub fn transform_jsx_to_htm(source: &str, options: JsValue) -> Result<JsValue, JsError> {
    let options = parse_options(options)?;
    let output = htmify_core::transform_jsx_to_htm_with_options(source, &options);

    let result = HtmResult {
        warnings: output
            .diagnostics
            .warnings
            .iter()
            .map(ToString::to_string)
            .collect(),
        code: output.code.into_owned(),
        replacements: output.replacements,
        fenced_blocks: output.fenced_blocks,
    };

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
