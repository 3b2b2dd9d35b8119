use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Absolute paths of changed files that still exist on disk.
///
/// Order is the order the diff reported them in. Duplicates are dropped on
/// construction (first occurrence wins).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangedFileSet(Vec<Utf8PathBuf>);

impl ChangedFileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paths<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = Utf8PathBuf>,
    {
        let mut seen = HashSet::new();
        let files = paths
            .into_iter()
            .filter(|p| seen.insert(p.clone()))
            .collect();
        Self(files)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Utf8Path> {
        self.0.iter().map(Utf8PathBuf::as_path)
    }

    pub fn as_slice(&self) -> &[Utf8PathBuf] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Utf8PathBuf> {
        self.0
    }

    /// Keep only the paths matching `pred`, preserving order.
    pub fn retain<F>(mut self, pred: F) -> Self
    where
        F: FnMut(&Utf8PathBuf) -> bool,
    {
        self.0.retain(pred);
        self
    }
}

impl IntoIterator for ChangedFileSet {
    type Item = Utf8PathBuf;
    type IntoIter = std::vec::IntoIter<Utf8PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_keep_first_position() {
        let set = ChangedFileSet::from_paths(
            ["/r/b.js", "/r/a.js", "/r/b.js"]
                .into_iter()
                .map(Utf8PathBuf::from),
        );
        let got: Vec<&str> = set.iter().map(Utf8Path::as_str).collect();
        assert_eq!(got, vec!["/r/b.js", "/r/a.js"]);
    }

    #[test]
    fn retain_preserves_order() {
        let set = ChangedFileSet::from_paths(
            ["/r/a.js", "/r/b.md", "/r/c.js"]
                .into_iter()
                .map(Utf8PathBuf::from),
        )
        .retain(|p| p.extension() == Some("js"));
        assert_eq!(set.len(), 2);
        assert_eq!(set.as_slice()[1].as_str(), "/r/c.js");
    }

    #[test]
    fn serializes_as_plain_path_array() {
        let set = ChangedFileSet::from_paths([Utf8PathBuf::from("/r/café.js")]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["/r/café.js"]"#);

        let back: ChangedFileSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
