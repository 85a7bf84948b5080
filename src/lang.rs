//! Mapping from user-facing language tags to OCR engine language codes.
//!
//! The mapping is a fixed table: a tag either matches an entry exactly or
//! resolves to the baseline code. Adding a language means adding an entry.

/// Engine code used for every tag without a table entry.
pub const BASELINE_LANGUAGE: &str = "eng";

/// Built-in `(tag, engine code)` entries.
pub const DEFAULT_LANGUAGES: &[(&str, &str)] = &[("traditional-chinese", "chi_tra")];

/// Map a language tag to an engine code using the built-in table.
///
/// Total: unknown, misspelled, and empty tags all resolve to
/// [`BASELINE_LANGUAGE`].
///
/// # Example
///
/// ```
/// use docsift::lang::map_language;
///
/// assert_eq!(map_language("traditional-chinese"), "chi_tra");
/// assert_eq!(map_language("klingon"), "eng");
/// ```
pub fn map_language(tag: &str) -> &'static str {
    DEFAULT_LANGUAGES
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, code)| *code)
        .unwrap_or(BASELINE_LANGUAGE)
}

/// Overridable language table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTable {
    baseline: String,
    entries: Vec<(String, String)>,
}

impl LanguageTable {
    /// An empty table that maps everything to `baseline`.
    pub fn empty(baseline: impl Into<String>) -> Self {
        Self {
            baseline: baseline.into(),
            entries: Vec::new(),
        }
    }

    /// Add or replace a mapping.
    pub fn with_entry(mut self, tag: impl Into<String>, code: impl Into<String>) -> Self {
        let tag = tag.into();
        let code = code.into();
        match self.entries.iter_mut().find(|(t, _)| *t == tag) {
            Some(entry) => entry.1 = code,
            None => self.entries.push((tag, code)),
        }
        self
    }

    /// Replace the baseline code.
    pub fn with_baseline(mut self, code: impl Into<String>) -> Self {
        self.baseline = code.into();
        self
    }

    /// Resolve a tag. Matching is exact.
    pub fn resolve(&self, tag: &str) -> &str {
        self.entries
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, code)| code.as_str())
            .unwrap_or(self.baseline.as_str())
    }

    /// Baseline code.
    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    /// Known tags in insertion order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }
}

impl Default for LanguageTable {
    fn default() -> Self {
        DEFAULT_LANGUAGES
            .iter()
            .fold(Self::empty(BASELINE_LANGUAGE), |table, (tag, code)| {
                table.with_entry(*tag, *code)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traditional_chinese() {
        assert_eq!(map_language("traditional-chinese"), "chi_tra");
    }

    #[test]
    fn test_everything_else_is_baseline() {
        for tag in ["", "eng", "english", "Traditional-Chinese", "traditional_chinese", "zz"] {
            assert_eq!(map_language(tag), BASELINE_LANGUAGE, "tag {:?}", tag);
        }
    }

    #[test]
    fn test_default_table_matches_map_language() {
        let table = LanguageTable::default();
        assert_eq!(table.resolve("traditional-chinese"), "chi_tra");
        assert_eq!(table.resolve("english"), "eng");
        assert_eq!(table.baseline(), "eng");
    }

    #[test]
    fn test_table_override() {
        let table = LanguageTable::default()
            .with_entry("japanese", "jpn")
            .with_entry("traditional-chinese", "chi_tra_vert")
            .with_baseline("osd");

        assert_eq!(table.resolve("japanese"), "jpn");
        assert_eq!(table.resolve("traditional-chinese"), "chi_tra_vert");
        assert_eq!(table.resolve("unknown"), "osd");
        assert_eq!(table.tags().collect::<Vec<_>>(), ["traditional-chinese", "japanese"]);
    }
}
