use serde::Serialize;
use thiserror::Error;

/// Source location information for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, counted in chars)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Resolve the location of a byte offset within `input`.
    ///
    /// The offset is clamped to the input and moved back to the start of
    /// the char it falls in.
    pub fn from_offset(input: &str, offset: usize) -> Self {
        let mut offset = offset.min(input.len());
        while !input.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &input[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
        let column = before[line_start..].chars().count() + 1;
        Self { line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors raised while configuring or driving transforms.
///
/// The transforms themselves are total; these only surface at the
/// configuration edge (option parsing, component tables, batch pools).
#[derive(Debug, Error)]
pub enum TransformError {
    /// Invalid JSON configuration or component table.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Invalid YAML configuration or component table.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Fence character that would collide with marker syntax.
    #[error("Invalid fence marker {marker:?}: must not be whitespace, '=', '{{' or '$'")]
    InvalidFenceMarker {
        /// The rejected character
        marker: char,
    },
    /// No fence characters configured.
    #[error("At least one fence marker is required")]
    EmptyFenceMarkers,
    /// The batch thread pool could not be created.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

/// Non-fatal warnings that don't prevent transformation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ParseWarning {
    /// Code fence opened but never closed
    UnclosedCodeFence {
        /// Source location where the fence started
        location: SourceLocation,
        /// Fence marker character
        marker: char,
        /// Length of the opening run
        length: usize,
        /// Surrounding context for the warning message
        context: String,
    },
}

impl ParseWarning {
    /// Get the location of this warning
    pub fn location(&self) -> &SourceLocation {
        match self {
            ParseWarning::UnclosedCodeFence { location, .. } => location,
        }
    }
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseWarning::UnclosedCodeFence {
                location,
                marker,
                length,
                context,
            } => {
                write!(
                    f,
                    "Unclosed code fence ({}x{}): {}, near '{}'",
                    marker, length, location, context
                )
            }
        }
    }
}

/// Collection of diagnostics gathered during a transform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseDiagnostics {
    /// List of non-fatal warnings
    pub warnings: Vec<ParseWarning>,
}

impl ParseDiagnostics {
    /// Create a new empty diagnostics collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning to the diagnostics collection
    pub fn add_warning(&mut self, warning: ParseWarning) {
        self.warnings.push(warning);
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Get total count of all diagnostics
    pub fn count(&self) -> usize {
        self.warnings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_from_offset_counts_lines_and_chars() {
        let input = "ab\nçd```";
        let loc = SourceLocation::from_offset(input, input.find('`').unwrap());
        assert_eq!(loc, SourceLocation::new(2, 3));
        assert_eq!(loc.to_string(), "2:3");
    }

    #[test]
    fn location_clamps_offsets() {
        // Byte 1 is inside 'é'; it resolves to the start of that char.
        assert_eq!(
            SourceLocation::from_offset("é", 1),
            SourceLocation::new(1, 1)
        );
        assert_eq!(
            SourceLocation::from_offset("a\nb", 40),
            SourceLocation::new(2, 2)
        );
    }

    #[test]
    fn location_at_start() {
        assert_eq!(SourceLocation::from_offset("x", 0), SourceLocation::new(1, 1));
    }

    #[test]
    fn warning_display_mentions_marker_and_location() {
        let warning = ParseWarning::UnclosedCodeFence {
            location: SourceLocation::new(3, 1),
            marker: '`',
            length: 3,
            context: "```js".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "Unclosed code fence (`x3): 3:1, near '```js'"
        );
        assert_eq!(warning.location().line, 3);
    }

    #[test]
    fn invalid_marker_message() {
        let err = TransformError::InvalidFenceMarker { marker: '=' };
        assert_eq!(
            err.to_string(),
            "Invalid fence marker '=': must not be whitespace, '=', '{' or '$'"
        );
    }
}
