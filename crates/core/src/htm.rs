//! JSX-to-HTM interpolation rewrite.
//!
//! Rewrites every `={` outside fenced code blocks into `=${`, turning JSX
//! attribute expressions into tagged-template interpolations. Fenced blocks
//! are copied through byte-for-byte.

use crate::code_fence::{DEFAULT_FENCE_MARKERS, FenceScan, scan_fence};
use crate::error::{ParseDiagnostics, ParseWarning, SourceLocation, TransformError};
use crate::transform::TextTransform;
use serde::Deserialize;
use std::borrow::Cow;

/// JSX interpolation marker.
pub const JSX_MARKER: &str = "={";
/// HTM interpolation marker.
pub const HTM_MARKER: &str = "=${";

const CONTEXT_CHARS: usize = 40;

/// Options for the interpolation rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HtmOptions {
    /// Characters whose runs delimit fenced blocks.
    #[serde(alias = "fenceMarkers")]
    pub fence_markers: Vec<char>,
}

impl Default for HtmOptions {
    fn default() -> Self {
        Self {
            fence_markers: DEFAULT_FENCE_MARKERS.to_vec(),
        }
    }
}

impl HtmOptions {
    /// Options using the given fence characters.
    pub fn with_fence_markers(markers: impl IntoIterator<Item = char>) -> Self {
        Self {
            fence_markers: markers.into_iter().collect(),
        }
    }

    /// Rejects fence characters that would overlap the marker syntax.
    pub fn validate(&self) -> Result<(), TransformError> {
        if self.fence_markers.is_empty() {
            return Err(TransformError::EmptyFenceMarkers);
        }
        if let Some(&marker) = self
            .fence_markers
            .iter()
            .find(|c| c.is_whitespace() || matches!(c, '=' | '{' | '$'))
        {
            return Err(TransformError::InvalidFenceMarker { marker });
        }
        Ok(())
    }

    /// Parses and validates options from JSON.
    pub fn from_json_str(input: &str) -> Result<Self, TransformError> {
        let options: Self = serde_json::from_str(input)?;
        options.validate()?;
        Ok(options)
    }

    /// Parses and validates options from YAML.
    pub fn from_yaml_str(input: &str) -> Result<Self, TransformError> {
        let options: Self = serde_yaml::from_str(input)?;
        options.validate()?;
        Ok(options)
    }
}

/// Result of [`transform_jsx_to_htm_with_options`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmOutput<'a> {
    /// Rewritten text; borrowed when nothing was replaced.
    pub code: Cow<'a, str>,
    /// Number of `={` markers rewritten.
    pub replacements: usize,
    /// Number of complete fenced blocks copied through.
    pub fenced_blocks: usize,
    /// Unterminated fences and other non-fatal findings.
    pub diagnostics: ParseDiagnostics,
}

/// Rewrites `={` into `=${` outside backtick-fenced blocks.
///
/// # Example
///
/// ```
/// use htmify_core::transform_jsx_to_htm;
///
/// let out = transform_jsx_to_htm("x={1}\n```\ny={2}\n```\nz={3}");
/// assert_eq!(out, "x=${1}\n```\ny={2}\n```\nz=${3}");
/// ```
pub fn transform_jsx_to_htm(input: &str) -> Cow<'_, str> {
    rewrite(input, DEFAULT_FENCE_MARKERS).code
}

/// Rewrites `={` into `=${` outside fenced blocks using `options`, and
/// reports counts and unterminated fences.
///
/// `options` is used as given; call [`HtmOptions::validate`] on values that
/// did not come from the validating constructors.
pub fn transform_jsx_to_htm_with_options<'a>(
    input: &'a str,
    options: &HtmOptions,
) -> HtmOutput<'a> {
    rewrite(input, &options.fence_markers)
}

fn rewrite<'a>(input: &'a str, markers: &[char]) -> HtmOutput<'a> {
    let mut output: Option<String> = None;
    let mut diagnostics = ParseDiagnostics::new();
    let mut replacements = 0;
    let mut fenced_blocks = 0;
    let mut copied = 0;
    let mut pos = 0;

    while pos < input.len() {
        match scan_fence(input, pos, markers) {
            FenceScan::Block(block) => {
                fenced_blocks += 1;
                pos = block.end;
                continue;
            }
            FenceScan::Unclosed { marker, length } => {
                let warning = unclosed_fence_warning(input, pos, marker, length);
                log::debug!("{}", warning);
                diagnostics.add_warning(warning);
                // No position inside the run can open a block either.
                pos += length * marker.len_utf8();
                continue;
            }
            FenceScan::NotFence => {}
        }

        if input[pos..].starts_with(JSX_MARKER) {
            let out = output.get_or_insert_with(|| String::with_capacity(input.len() + 16));
            out.push_str(&input[copied..pos]);
            out.push_str(HTM_MARKER);
            replacements += 1;
            pos += JSX_MARKER.len();
            copied = pos;
            continue;
        }

        pos += input[pos..].chars().next().map_or(1, char::len_utf8);
    }

    let code = match output {
        Some(mut out) => {
            out.push_str(&input[copied..]);
            Cow::Owned(out)
        }
        None => Cow::Borrowed(input),
    };

    log::trace!(
        "rewrote {} interpolation marker(s), skipped {} fenced block(s)",
        replacements,
        fenced_blocks
    );

    HtmOutput {
        code,
        replacements,
        fenced_blocks,
        diagnostics,
    }
}

fn unclosed_fence_warning(input: &str, start: usize, marker: char, length: usize) -> ParseWarning {
    let line_start = input[..start].rfind('\n').map_or(0, |idx| idx + 1);
    let line_end = input[start..].find('\n').map_or(input.len(), |idx| start + idx);
    let context = input[line_start..line_end]
        .trim()
        .chars()
        .take(CONTEXT_CHARS)
        .collect();

    ParseWarning::UnclosedCodeFence {
        location: SourceLocation::from_offset(input, start),
        marker,
        length,
        context,
    }
}

/// The interpolation rewrite as a [`TextTransform`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsxToHtm {
    options: HtmOptions,
}

impl JsxToHtm {
    /// Creates the transform with validated options.
    pub fn new(options: HtmOptions) -> Result<Self, TransformError> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Options in use.
    pub fn options(&self) -> &HtmOptions {
        &self.options
    }
}

impl TextTransform for JsxToHtm {
    fn transform<'a>(&self, input: &'a str) -> Cow<'a, str> {
        rewrite(input, &self.options.fence_markers).code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_bare_marker() {
        assert_eq!(transform_jsx_to_htm("a={b"), "a=${b");
    }

    #[test]
    fn preserves_fenced_block() {
        let input = "```\na={b\n```";
        let out = transform_jsx_to_htm(input);
        assert_eq!(out, input);
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn mixed_markers_inside_and_outside_fences() {
        assert_eq!(
            transform_jsx_to_htm("x={1}\n```\ny={2}\n```\nz={3}"),
            "x=${1}\n```\ny={2}\n```\nz=${3}"
        );
    }

    #[test]
    fn untouched_input_is_borrowed() {
        let input = "<div class=\"x\">{name}</div>";
        assert!(matches!(transform_jsx_to_htm(input), Cow::Borrowed(s) if s == input));
        assert!(matches!(transform_jsx_to_htm(""), Cow::Borrowed("")));
    }

    #[test]
    fn existing_htm_markers_are_left_alone() {
        assert!(matches!(transform_jsx_to_htm("a=${b}"), Cow::Borrowed(_)));
    }

    #[test]
    fn adjacent_markers() {
        assert_eq!(transform_jsx_to_htm("={={"), "=${=${");
        assert_eq!(transform_jsx_to_htm("=={"), "==${");
    }

    #[test]
    fn unclosed_fence_does_not_protect_later_markers() {
        let out = transform_jsx_to_htm_with_options("```js\na={b}", &HtmOptions::default());
        assert_eq!(out.code, "```js\na=${b}");
        assert_eq!(out.replacements, 1);
        assert_eq!(out.fenced_blocks, 0);
        assert_eq!(out.diagnostics.count(), 1);
        assert_eq!(
            out.diagnostics.warnings[0],
            ParseWarning::UnclosedCodeFence {
                location: SourceLocation::new(1, 1),
                marker: '`',
                length: 3,
                context: "```js".to_string(),
            }
        );
    }

    #[test]
    fn longer_fence_requires_identical_closer() {
        let input = "````\n```\na={b}\n```\n````\nc={d}";
        assert_eq!(
            transform_jsx_to_htm(input),
            "````\n```\na={b}\n```\n````\nc=${d}"
        );
    }

    #[test]
    fn three_run_followed_by_four_run() {
        // The 3-run closes on the first three characters of the 4-run,
        // leaving a single backtick outside.
        let input = "```a={b}````c={d}";
        assert_eq!(transform_jsx_to_htm(input), "```a={b}````c=${d}");
    }

    #[test]
    fn short_runs_do_not_fence() {
        assert_eq!(transform_jsx_to_htm("``a={b}``"), "``a=${b}``");
    }

    #[test]
    fn inline_triple_backticks_fence_without_newlines() {
        assert_eq!(
            transform_jsx_to_htm("p={1} ```q={2}``` r={3}"),
            "p=${1} ```q={2}``` r=${3}"
        );
    }

    #[test]
    fn counts_blocks_and_replacements() {
        let out = transform_jsx_to_htm_with_options(
            "a={1}\n```\n={\n```\n```\n={\n```\nb={2}",
            &HtmOptions::default(),
        );
        assert_eq!(out.replacements, 2);
        assert_eq!(out.fenced_blocks, 2);
        assert!(!out.diagnostics.has_warnings());
    }

    #[test]
    fn tilde_fences_when_configured() {
        let input = "~~~\na={b}\n~~~\nc={d}";
        assert_eq!(transform_jsx_to_htm(input), "~~~\na=${b}\n~~~\nc=${d}");

        let options = HtmOptions::with_fence_markers(['`', '~']);
        let out = transform_jsx_to_htm_with_options(input, &options);
        assert_eq!(out.code, "~~~\na={b}\n~~~\nc=${d}");
    }

    #[test]
    fn unclosed_fence_before_a_closed_pair_of_another_marker() {
        let options = HtmOptions::with_fence_markers(['`', '~']);
        let out =
            transform_jsx_to_htm_with_options("```\nx={0}\n~~~\na={b}\n~~~\nc={d}", &options);

        assert_eq!(out.code, "```\nx=${0}\n~~~\na={b}\n~~~\nc=${d}");
        assert_eq!(out.replacements, 2);
        assert_eq!(out.fenced_blocks, 1);
        assert_eq!(out.diagnostics.count(), 1);
        assert!(matches!(
            out.diagnostics.warnings[0],
            ParseWarning::UnclosedCodeFence {
                marker: '`',
                length: 3,
                ..
            }
        ));
    }

    #[test]
    fn multibyte_text_is_preserved() {
        assert_eq!(
            transform_jsx_to_htm("título={año} ```é={ö}```"),
            "título=${año} ```é={ö}```"
        );
    }

    #[test]
    fn options_validation() {
        assert!(HtmOptions::default().validate().is_ok());
        assert!(matches!(
            HtmOptions::with_fence_markers([]).validate(),
            Err(TransformError::EmptyFenceMarkers)
        ));
        assert!(matches!(
            HtmOptions::with_fence_markers(['`', '{']).validate(),
            Err(TransformError::InvalidFenceMarker { marker: '{' })
        ));
        assert!(matches!(
            HtmOptions::with_fence_markers([' ']).validate(),
            Err(TransformError::InvalidFenceMarker { marker: ' ' })
        ));
    }

    #[test]
    fn options_from_json_and_yaml() {
        let json = HtmOptions::from_json_str(r#"{"fenceMarkers": ["`", "~"]}"#).unwrap();
        let yaml = HtmOptions::from_yaml_str("fence_markers: ['`', '~']\n").unwrap();
        assert_eq!(json, yaml);
        assert_eq!(json.fence_markers, vec!['`', '~']);

        assert_eq!(HtmOptions::from_json_str("{}").unwrap(), HtmOptions::default());
        assert!(matches!(
            HtmOptions::from_json_str(r#"{"fenceMarkers": ["="]}"#),
            Err(TransformError::InvalidFenceMarker { marker: '=' })
        ));
    }

    #[test]
    fn jsx_to_htm_rejects_bad_options() {
        assert!(JsxToHtm::new(HtmOptions::with_fence_markers(['$'])).is_err());
        let transform = JsxToHtm::new(HtmOptions::default()).unwrap();
        assert_eq!(transform.transform("a={b}"), "a=${b}");
        assert_eq!(transform.options(), &HtmOptions::default());
    }
}
