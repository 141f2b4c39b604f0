//! JSON rendering of build records.

use serde::Serialize;

use crate::build_info::BuildInfo;

/// Renders a [`BuildInfo`] as JSON, minified or indented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonRenderer {
    indent: usize,
}

impl JsonRenderer {
    /// Renderer without whitespace or newlines.
    pub fn minified() -> Self {
        Self::new(0)
    }

    /// Renderer indenting by `indent` spaces; `0` means minified.
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn render(&self, info: &BuildInfo) -> Result<Vec<u8>, serde_json::Error> {
        if self.indent == 0 {
            return serde_json::to_vec(info);
        }

        let indent = " ".repeat(self.indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        info.serialize(&mut serializer)?;
        Ok(out)
    }
}
