#![deny(missing_docs)]
//! htmify core: JSX-to-HTM interpolation rewriting and element transforms.

/// Parallel batch rewriting.
pub mod batch;
/// Fenced block detection.
pub mod code_fence;
/// Component lookup tables.
pub mod components;
/// Stock element transforms (`class` renaming, component remapping).
pub mod defaults;
/// Element tuple model.
pub mod element;
/// Error and diagnostic types.
pub mod error;
/// JSX-to-HTM interpolation rewrite.
pub mod htm;
/// Transform traits and pipeline.
pub mod transform;

pub use batch::{BatchInput, BatchItem, BatchOptions, BatchResult, BatchStats, transform_batch};
pub use code_fence::{FenceScan, FencedBlock, scan_fence};
pub use components::ComponentTable;
pub use defaults::{
    ClassNameTransform, ComponentTransform, class_name_transform, component_transform,
};
pub use element::{Element, Props, Tag};
pub use error::{ParseDiagnostics, ParseWarning, SourceLocation, TransformError};
pub use htm::{
    HtmOptions, HtmOutput, JsxToHtm, transform_jsx_to_htm, transform_jsx_to_htm_with_options,
};
pub use transform::{ElementTransform, TextTransform, TransformPipeline};
