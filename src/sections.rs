use std::fmt;

use crate::config::SiteConfig;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
struct SectionEntry {
    id: SectionId,
    theme: String,
}

/// Ordered section identifiers with their themes, frozen at startup.
///
/// Built only from a validated [`SiteConfig`], so every identifier has a theme
/// and the table is never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionTable {
    entries: Vec<SectionEntry>,
    default_theme: String,
}

impl SectionTable {
    pub fn from_config(config: &SiteConfig) -> Self {
        let entries = config
            .sections
            .iter()
            .map(|section| SectionEntry {
                id: SectionId::new(section.id.clone()),
                theme: section.theme.clone(),
            })
            .collect();
        Self {
            entries,
            default_theme: config.default_theme.clone(),
        }
    }

    pub fn default_theme(&self) -> &str {
        &self.default_theme
    }

    pub fn resolve(&self, raw: &str) -> Option<&SectionId> {
        self.entries
            .iter()
            .find(|entry| entry.id.as_str() == raw)
            .map(|entry| &entry.id)
    }

    pub fn theme_of(&self, id: &SectionId) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| &entry.id == id)
            .map(|entry| entry.theme.as_str())
    }

    pub fn first(&self) -> Option<&SectionId> {
        self.entries.first().map(|entry| &entry.id)
    }

    pub fn last(&self) -> Option<&SectionId> {
        self.entries.last().map(|entry| &entry.id)
    }

    pub fn next_after(&self, id: &SectionId) -> Option<&SectionId> {
        let index = self.position(id)?;
        self.entries.get(index + 1).map(|entry| &entry.id)
    }

    pub fn previous_before(&self, id: &SectionId) -> Option<&SectionId> {
        let index = self.position(id)?;
        let previous = index.checked_sub(1)?;
        self.entries.get(previous).map(|entry| &entry.id)
    }

    fn position(&self, id: &SectionId) -> Option<usize> {
        self.entries.iter().position(|entry| &entry.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table() -> SectionTable {
        SectionTable::from_config(&SiteConfig::default())
    }

    #[test]
    fn keeps_configured_order() {
        let table = table();
        let mut ids = Vec::new();
        let mut cursor = table.first();
        while let Some(id) = cursor {
            ids.push(id.as_str());
            cursor = table.next_after(id);
        }
        assert_eq!(ids, vec!["00", "01", "02", "03"]);
        assert_eq!(table.last(), Some(&SectionId::new("03")));
    }

    #[test]
    fn resolves_only_known_ids() {
        let table = table();
        assert_eq!(table.resolve("02"), Some(&SectionId::new("02")));
        assert_eq!(table.resolve("04"), None);
        assert_eq!(table.resolve(""), None);
    }

    #[test]
    fn walks_neighbours_without_wrapping() {
        let table = table();
        let first = SectionId::new("00");
        let last = SectionId::new("03");
        assert_eq!(table.next_after(&first), Some(&SectionId::new("01")));
        assert_eq!(table.next_after(&last), None);
        assert_eq!(table.previous_before(&last), Some(&SectionId::new("02")));
        assert_eq!(table.previous_before(&first), None);
    }

    #[test]
    fn maps_each_section_to_its_theme() {
        let table = table();
        assert_eq!(table.theme_of(&SectionId::new("00")), Some("blue"));
        assert_eq!(table.theme_of(&SectionId::new("02")), Some("orange"));
        assert_eq!(table.default_theme(), "default");
    }
}
