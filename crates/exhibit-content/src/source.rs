//! Exhibit data sources
//!
//! The raw data a page provides for one exhibit. Read-only to the resolver.

use serde::{Deserialize, Serialize};

use crate::slot::Slot;

/// Where a slot's text comes from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum SlotSource {
    /// The page provides nothing for this slot
    #[default]
    Absent,
    /// Text embedded in the page, available synchronously
    Inline(String),
    /// Path to a plain-text resource fetched at open time
    Remote(String),
}

impl SlotSource {
    pub fn is_absent(&self) -> bool {
        matches!(self, SlotSource::Absent)
    }

    pub fn remote_path(&self) -> Option<&str> {
        match self {
            SlotSource::Remote(path) => Some(path),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhibitSource {
    pub code: SlotSource,
    pub input: SlotSource,
    pub output: SlotSource,
}

impl ExhibitSource {
    /// A source with every slot absent
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> &SlotSource {
        match slot {
            Slot::Code => &self.code,
            Slot::Input => &self.input,
            Slot::Output => &self.output,
        }
    }

    pub fn set(&mut self, slot: Slot, source: SlotSource) {
        match slot {
            Slot::Code => self.code = source,
            Slot::Input => self.input = source,
            Slot::Output => self.output = source,
        }
    }

    pub fn with(mut self, slot: Slot, source: SlotSource) -> Self {
        self.set(slot, source);
        self
    }

    /// True when no slot carries data
    pub fn is_empty(&self) -> bool {
        Slot::ALL.iter().all(|slot| self.get(*slot).is_absent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_lookup() {
        let source = ExhibitSource::absent()
            .with(Slot::Code, SlotSource::Inline("int main(){}".to_string()))
            .with(Slot::Output, SlotSource::Remote("/codes/out.txt".to_string()));

        assert!(!source.is_empty());
        assert!(source.input.is_absent());
        assert_eq!(source.get(Slot::Output).remote_path(), Some("/codes/out.txt"));
        assert_eq!(source.get(Slot::Code).remote_path(), None);
    }

    #[test]
    fn test_absent_source_is_empty() {
        assert!(ExhibitSource::absent().is_empty());
    }
}
