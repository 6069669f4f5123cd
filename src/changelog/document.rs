use std::fmt;

use crate::boundary::BoundaryWarning;

/// One titled block of release notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub entries: Vec<String>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Section {
            title: title.into(),
            entries: Vec::new(),
        }
    }
}

/// Rendered release notes, built once per release.
///
/// `Display` serializes the document as Markdown: header line, blank line,
/// every section followed by a blank line, then the footer line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeLogDocument {
    pub header: String,
    pub sections: Vec<Section>,
    pub footer: String,
    /// Problems recovered while formatting
    pub warnings: Vec<BoundaryWarning>,
}

impl ChangeLogDocument {
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }

    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }
}

impl fmt::Display for ChangeLogDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        writeln!(f)?;
        for section in &self.sections {
            writeln!(f, "{}", section.title)?;
            for entry in &section.entries {
                writeln!(f, "{}", entry)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{}", self.footer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_layout() {
        let mut features = Section::new("### Features");
        features.entries.push("- add X".to_string());
        let doc = ChangeLogDocument {
            header: "## Changes".to_string(),
            sections: vec![features],
            footer: "bye".to_string(),
            warnings: Vec::new(),
        };
        assert_eq!(doc.to_string(), "## Changes\n\n### Features\n- add X\n\nbye\n");
    }

    #[test]
    fn test_empty_document() {
        let doc = ChangeLogDocument {
            header: "## Changes".to_string(),
            sections: Vec::new(),
            footer: String::new(),
            warnings: Vec::new(),
        };
        assert_eq!(doc.to_string(), "## Changes\n\n\n");
        assert_eq!(doc.entry_count(), 0);
    }
}
