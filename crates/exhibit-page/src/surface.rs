//! Panel surface report
//!
//! Which of the panel's markup pieces a page provides. A page without a full
//! surface is malformed; the panel falls back to a minimal presentation
//! instead of failing.

use scraper::Html;
use serde::Serialize;

use exhibit_content::Slot;

use crate::markup::{compile, SurfaceMarkup};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "element", content = "slot", rename_all = "snake_case")]
pub enum SurfaceElement {
    Backdrop,
    Window,
    CloseControl,
    TabControls,
    Region(Slot),
}

impl std::fmt::Display for SurfaceElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceElement::Backdrop => write!(f, "backdrop"),
            SurfaceElement::Window => write!(f, "window"),
            SurfaceElement::CloseControl => write!(f, "close control"),
            SurfaceElement::TabControls => write!(f, "tab controls"),
            SurfaceElement::Region(slot) => write!(f, "{} region", slot),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SurfaceReport {
    missing: Vec<SurfaceElement>,
}

impl SurfaceReport {
    /// Report for a page that provides every surface element
    pub fn complete() -> Self {
        Self::default()
    }

    pub fn with_missing(missing: Vec<SurfaceElement>) -> Self {
        Self { missing }
    }

    pub(crate) fn inspect(doc: &Html, markup: &SurfaceMarkup) -> Result<Self> {
        let mut checks = vec![
            (SurfaceElement::Backdrop, markup.backdrop.as_str()),
            (SurfaceElement::Window, markup.window.as_str()),
            (SurfaceElement::CloseControl, markup.close_control.as_str()),
            (SurfaceElement::TabControls, markup.tab_control.as_str()),
        ];
        for slot in Slot::ALL {
            checks.push((SurfaceElement::Region(slot), markup.region(slot)));
        }

        let mut missing = Vec::new();
        for (element, selector) in checks {
            if doc.select(&compile(selector)?).next().is_none() {
                missing.push(element);
            }
        }

        Ok(Self { missing })
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn missing(&self) -> &[SurfaceElement] {
        &self.missing
    }

    /// All three display regions exist
    pub fn has_regions(&self) -> bool {
        !self
            .missing
            .iter()
            .any(|element| matches!(element, SurfaceElement::Region(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_surface() {
        let doc = Html::parse_document(
            r#"<div id="codeModal"><div class="code-window">
                <span class="close-btn">x</span>
                <button class="tab-btn">C++</button>
                <pre id="cpp"><code></code></pre>
                <pre id="input"><code></code></pre>
                <pre id="output"><code></code></pre>
            </div></div>"#,
        );
        let report = SurfaceReport::inspect(&doc, &SurfaceMarkup::default()).unwrap();
        assert!(report.is_complete());
    }

    #[test]
    fn test_missing_regions_are_listed() {
        let doc = Html::parse_document(
            r#"<div id="codeModal"><div class="code-window"><pre id="cpp"></pre></div></div>"#,
        );
        let report = SurfaceReport::inspect(&doc, &SurfaceMarkup::default()).unwrap();

        assert!(!report.is_complete());
        assert!(!report.has_regions());
        assert!(report
            .missing()
            .contains(&SurfaceElement::Region(Slot::Output)));
        assert!(!report.missing().contains(&SurfaceElement::Region(Slot::Code)));
    }
}
