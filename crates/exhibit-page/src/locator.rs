//! Data locator
//!
//! Finds the data container that belongs to a trigger and reads its slots.

use scraper::{ElementRef, Selector};

use exhibit_content::{ExhibitSource, Slot, SlotSource};

use crate::markup::{compile, Markup};
use crate::Result;

/// First following sibling of `trigger` carrying `container_class`.
///
/// Text nodes, comments and unrelated elements in between are skipped.
pub fn locate_data_container<'a>(
    trigger: ElementRef<'a>,
    container_class: &str,
) -> Option<ElementRef<'a>> {
    trigger
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().classes().any(|class| class == container_class))
}

/// Read the three slots of a data container.
pub fn read_exhibit(container: ElementRef<'_>, markup: &Markup) -> Result<ExhibitSource> {
    Ok(SlotReader::new(markup)?.read(container))
}

pub(crate) struct SlotReader {
    selectors: [Selector; 3],
    src_attr: String,
}

impl SlotReader {
    pub(crate) fn new(markup: &Markup) -> Result<Self> {
        Ok(Self {
            selectors: [
                compile(&markup.slots.selector(Slot::Code))?,
                compile(&markup.slots.selector(Slot::Input))?,
                compile(&markup.slots.selector(Slot::Output))?,
            ],
            src_attr: markup.src_attr.clone(),
        })
    }

    pub(crate) fn read(&self, container: ElementRef<'_>) -> ExhibitSource {
        let mut source = ExhibitSource::absent();
        for (slot, selector) in Slot::ALL.into_iter().zip(&self.selectors) {
            if let Some(region) = container.select(selector).next() {
                source.set(slot, self.read_region(region));
            }
        }
        source
    }

    fn read_region(&self, region: ElementRef<'_>) -> SlotSource {
        match region.value().attr(&self.src_attr).map(str::trim) {
            Some(path) if !path.is_empty() => SlotSource::Remote(path.to_string()),
            // Text content, entities decoded; never re-parsed as markup
            _ => SlotSource::Inline(region.text().collect()),
        }
    }
}
