use crate::source::TokenType;

/// One emitted variable
#[derive(Debug, Clone, PartialEq)]
pub struct SheetEntry {
    /// Kebab-case name without the leading `--`
    pub name: String,
    pub value: String,
    pub token_type: TokenType,
}

/// Flat, ordered list of resolved variables in traversal order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenSheet {
    entries: Vec<SheetEntry>,
}

impl TokenSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: SheetEntry) {
        self.entries.push(entry);
    }

    /// Value of a variable by name (with or without the leading `--`)
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.trim_start_matches("--");
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.value.as_str())
    }

    pub fn entries(&self) -> &[SheetEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SheetEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a TokenSheet {
    type Item = &'a SheetEntry;
    type IntoIter = std::slice::Iter<'a, SheetEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
