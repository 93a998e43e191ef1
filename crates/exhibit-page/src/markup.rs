//! Markup conventions
//!
//! Class names, attributes and selectors the pages use for triggers, data
//! containers and the panel surface. Defaults follow the existing portfolio
//! pages; every field can be overridden from configuration.

use scraper::Selector;
use serde::{Deserialize, Serialize};

use exhibit_content::Slot;

use crate::error::PageError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markup {
    /// Selector matching trigger controls
    pub trigger: String,
    /// Trigger attribute naming its data container by id
    pub exhibit_attr: String,
    /// Trigger attribute carrying a display title
    pub title_attr: String,
    /// Class of exhibit data containers
    pub container_class: String,
    /// Classes of the slot sub-regions inside a container
    pub slots: SlotClasses,
    /// Sub-region attribute holding a remote path
    pub src_attr: String,
    pub surface: SurfaceMarkup,
    /// Selector matching elements that fade in on scroll
    pub reveal: String,
}

impl Default for Markup {
    fn default() -> Self {
        Self {
            trigger: ".code-btn, [data-exhibit], [onclick*='openModal']".to_string(),
            exhibit_attr: "data-exhibit".to_string(),
            title_attr: "data-title".to_string(),
            container_class: "code-data".to_string(),
            slots: SlotClasses::default(),
            src_attr: "data-src".to_string(),
            surface: SurfaceMarkup::default(),
            reveal: "h1, h2, h3, h4, p, img, .section-heading, .card, .box, .container, \
                     .content-box, .efficiency-box"
                .to_string(),
        }
    }
}

impl Markup {
    /// Check that every selector compiles.
    pub fn validate(&self) -> Result<()> {
        compile(&self.trigger)?;
        compile(&format!(".{}", self.container_class))?;
        compile(&self.reveal)?;
        for slot in Slot::ALL {
            if self.slots.get(slot).is_empty() {
                return Err(PageError::InvalidSelector {
                    selector: String::new(),
                    reason: format!("no classes configured for the {} slot", slot),
                });
            }
            compile(&self.slots.selector(slot))?;
        }
        self.surface.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotClasses {
    pub code: Vec<String>,
    pub input: Vec<String>,
    pub output: Vec<String>,
}

impl SlotClasses {
    pub fn get(&self, slot: Slot) -> &[String] {
        match slot {
            Slot::Code => &self.code,
            Slot::Input => &self.input,
            Slot::Output => &self.output,
        }
    }

    /// Comma-joined class selector for one slot
    pub fn selector(&self, slot: Slot) -> String {
        self.get(slot)
            .iter()
            .map(|class| format!(".{}", class))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for SlotClasses {
    fn default() -> Self {
        Self {
            code: vec!["data-cpp".to_string(), "data-code".to_string()],
            input: vec!["data-input".to_string()],
            output: vec!["data-output".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceMarkup {
    pub backdrop: String,
    pub window: String,
    pub close_control: String,
    pub tab_control: String,
    pub code_region: String,
    pub input_region: String,
    pub output_region: String,
}

impl SurfaceMarkup {
    pub fn region(&self, slot: Slot) -> &str {
        match slot {
            Slot::Code => &self.code_region,
            Slot::Input => &self.input_region,
            Slot::Output => &self.output_region,
        }
    }

    fn validate(&self) -> Result<()> {
        for selector in [
            &self.backdrop,
            &self.window,
            &self.close_control,
            &self.tab_control,
            &self.code_region,
            &self.input_region,
            &self.output_region,
        ] {
            compile(selector)?;
        }
        Ok(())
    }
}

impl Default for SurfaceMarkup {
    fn default() -> Self {
        Self {
            backdrop: "#codeModal".to_string(),
            window: ".code-window".to_string(),
            close_control: ".close-btn".to_string(),
            tab_control: ".tab-btn".to_string(),
            code_region: "#cpp".to_string(),
            input_region: "#input".to_string(),
            output_region: "#output".to_string(),
        }
    }
}

pub(crate) fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| PageError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selectors_compile() {
        let markup = Markup::default();
        compile(&markup.trigger).unwrap();
        compile(&markup.reveal).unwrap();
        for slot in Slot::ALL {
            compile(&markup.slots.selector(slot)).unwrap();
            compile(markup.surface.region(slot)).unwrap();
        }
    }

    #[test]
    fn test_default_reveal_selector() {
        assert_eq!(
            Markup::default().reveal,
            "h1, h2, h3, h4, p, img, .section-heading, .card, .box, .container, .content-box, .efficiency-box"
        );
    }

    #[test]
    fn test_slot_selector_joins_aliases() {
        let classes = SlotClasses::default();
        assert_eq!(classes.selector(Slot::Code), ".data-cpp, .data-code");
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let markup: Markup = serde_json::from_str(r#"{"container_class": "exhibit"}"#).unwrap();
        assert_eq!(markup.container_class, "exhibit");
        assert_eq!(markup.src_attr, "data-src");
    }

    #[test]
    fn test_validate_catches_bad_override() {
        assert!(Markup::default().validate().is_ok());

        let mut markup = Markup::default();
        markup.surface.window = "..window".to_string();
        assert!(matches!(
            markup.validate(),
            Err(PageError::InvalidSelector { .. })
        ));

        let mut markup = Markup::default();
        markup.slots.input.clear();
        assert!(markup.validate().is_err());
    }

    #[test]
    fn test_bad_selector_is_reported() {
        assert!(matches!(
            compile("[[nope"),
            Err(PageError::InvalidSelector { .. })
        ));
    }
}
