//! Assembled page model
//!
//! Built once from markup. Holds only owned data, so it can be shared with
//! the panel and its background tasks.

use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use exhibit_content::ExhibitSource;

use crate::locator::{locate_data_container, SlotReader};
use crate::markup::{compile, Markup};
use crate::surface::SurfaceReport;
use crate::Result;

/// Document-order index of a trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TriggerId(pub usize);

impl std::fmt::Display for TriggerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "trigger-{}", self.0)
    }
}

/// Document-order index of a data container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ExhibitId(pub usize);

/// How a trigger found its data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Association {
    /// `data-exhibit` named the container's id
    Explicit,
    /// Nearest following sibling container
    Sibling,
    /// No container could be found
    None,
}

#[derive(Debug, Clone, Serialize)]
pub struct Trigger {
    pub id: TriggerId,
    pub label: String,
    pub exhibit: Option<ExhibitId>,
    pub association: Association,
}

#[derive(Debug, Clone, Serialize)]
pub struct RevealCandidate {
    pub index: usize,
    pub tag: String,
    pub element_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Page {
    triggers: Vec<Trigger>,
    exhibits: Vec<ExhibitSource>,
    surface: SurfaceReport,
    reveal_candidates: Vec<RevealCandidate>,
}

impl Page {
    /// Parse a full HTML document.
    pub fn parse(html: &str, markup: &Markup) -> Result<Self> {
        let doc = Html::parse_document(html);
        let reader = SlotReader::new(markup)?;

        // Every container becomes an exhibit, whether or not a trigger uses it
        let container_sel = compile(&format!(".{}", markup.container_class))?;
        let mut exhibits = Vec::new();
        let mut by_node = HashMap::new();
        let mut by_id = HashMap::new();
        for container in doc.select(&container_sel) {
            let exhibit = ExhibitId(exhibits.len());
            exhibits.push(reader.read(container));
            by_node.insert(container.id(), exhibit);
            if let Some(id) = container.value().id() {
                by_id.insert(id.to_string(), exhibit);
            }
        }

        let trigger_sel = compile(&markup.trigger)?;
        let mut triggers = Vec::new();
        for el in doc.select(&trigger_sel) {
            let id = TriggerId(triggers.len());

            let explicit = el.value().attr(&markup.exhibit_attr).and_then(|name| {
                let found = by_id.get(name.trim()).copied();
                if found.is_none() {
                    tracing::warn!(
                        trigger = %id,
                        exhibit = %name,
                        "Trigger names an unknown exhibit, falling back to sibling search"
                    );
                }
                found
            });

            let (exhibit, association) = match explicit {
                Some(exhibit) => (Some(exhibit), Association::Explicit),
                None => match locate_data_container(el, &markup.container_class)
                    .and_then(|container| by_node.get(&container.id()).copied())
                {
                    Some(exhibit) => (Some(exhibit), Association::Sibling),
                    None => (None, Association::None),
                },
            };

            triggers.push(Trigger {
                id,
                label: trigger_label(el, &markup.title_attr),
                exhibit,
                association,
            });
        }

        let surface = SurfaceReport::inspect(&doc, &markup.surface)?;

        let reveal_sel = compile(&markup.reveal)?;
        let reveal_candidates = doc
            .select(&reveal_sel)
            .enumerate()
            .map(|(index, el)| RevealCandidate {
                index,
                tag: el.value().name().to_string(),
                element_id: el.value().id().map(str::to_string),
            })
            .collect();

        let unbound = triggers
            .iter()
            .filter(|t| t.association == Association::None)
            .count();

        tracing::info!(
            triggers = triggers.len(),
            exhibits = exhibits.len(),
            unbound,
            surface_complete = surface.is_complete(),
            "Assembled page"
        );

        Ok(Self {
            triggers,
            exhibits,
            surface,
            reveal_candidates,
        })
    }

    /// Read and parse an HTML file.
    pub fn load(path: &Path, markup: &Markup) -> Result<Self> {
        let html = std::fs::read_to_string(path)?;
        Self::parse(&html, markup)
    }

    /// A page assembled without markup, e.g. for hosts that build exhibits
    /// programmatically.
    pub fn from_parts(
        triggers: Vec<Trigger>,
        exhibits: Vec<ExhibitSource>,
        surface: SurfaceReport,
    ) -> Self {
        Self {
            triggers,
            exhibits,
            surface,
            reveal_candidates: Vec::new(),
        }
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    pub fn trigger(&self, id: TriggerId) -> Option<&Trigger> {
        self.triggers.get(id.0)
    }

    pub fn exhibit(&self, id: ExhibitId) -> Option<&ExhibitSource> {
        self.exhibits.get(id.0)
    }

    /// Data source of a trigger, or `None` if the trigger is unknown or has
    /// no container.
    pub fn exhibit_for(&self, trigger: TriggerId) -> Option<&ExhibitSource> {
        self.trigger(trigger)
            .and_then(|t| t.exhibit)
            .and_then(|id| self.exhibit(id))
    }

    pub fn exhibits(&self) -> &[ExhibitSource] {
        &self.exhibits
    }

    pub fn surface(&self) -> &SurfaceReport {
        &self.surface
    }

    pub fn reveal_candidates(&self) -> &[RevealCandidate] {
        &self.reveal_candidates
    }
}

fn trigger_label(el: ElementRef<'_>, title_attr: &str) -> String {
    if let Some(title) = el.value().attr(title_attr) {
        let cleaned = normalize_whitespace(title);
        if !cleaned.is_empty() {
            return cleaned;
        }
    }
    normalize_whitespace(&el.text().collect::<Vec<_>>().join(" "))
}

fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use exhibit_content::{Slot, SlotSource};

    const PAGE: &str = r#"<!doctype html>
<html><body>
  <section class="card">
    <h3>Metro Flow</h3>
    <button class="code-btn" onclick="openModal(this)">View   Code</button>
    <br>
    <div class="code-data" style="display:none">
      <pre class="data-cpp">int main(){}</pre>
      <pre class="data-output" data-src="/codes/out.txt"></pre>
    </div>
  </section>
  <section class="card">
    <button class="code-btn" data-exhibit="power" data-title="Power Grid">View</button>
  </section>
  <section class="card">
    <button class="code-btn">Orphan</button>
  </section>
  <div class="code-data" id="power">
    <pre class="data-cpp" data-src="codes/power.cpp"></pre>
    <pre class="data-input">3 4</pre>
    <pre class="data-output">7</pre>
  </div>
  <div id="codeModal"><div class="code-window">
    <span class="close-btn">&times;</span>
    <button class="tab-btn">C++</button><button class="tab-btn">Input</button><button class="tab-btn">Output</button>
    <div id="cpp"><code></code></div><div id="input"><code></code></div><div id="output"><code></code></div>
  </div></div>
</body></html>"#;

    #[test]
    fn test_assembles_triggers_and_exhibits() {
        let page = Page::parse(PAGE, &Markup::default()).unwrap();

        assert_eq!(page.triggers().len(), 3);
        assert_eq!(page.exhibits().len(), 2);
        assert!(page.surface().is_complete());
    }

    #[test]
    fn test_sibling_association() {
        let page = Page::parse(PAGE, &Markup::default()).unwrap();
        let trigger = page.trigger(TriggerId(0)).unwrap();

        assert_eq!(trigger.association, Association::Sibling);
        assert_eq!(trigger.label, "View Code");

        let source = page.exhibit_for(TriggerId(0)).unwrap();
        assert_eq!(source.code, SlotSource::Inline("int main(){}".to_string()));
        assert!(source.input.is_absent());
        assert_eq!(
            source.output,
            SlotSource::Remote("/codes/out.txt".to_string())
        );
    }

    #[test]
    fn test_explicit_association() {
        let page = Page::parse(PAGE, &Markup::default()).unwrap();
        let trigger = page.trigger(TriggerId(1)).unwrap();

        assert_eq!(trigger.association, Association::Explicit);
        assert_eq!(trigger.label, "Power Grid");
        let source = page.exhibit_for(TriggerId(1)).unwrap();
        assert_eq!(source.get(Slot::Input), &SlotSource::Inline("3 4".to_string()));
    }

    #[test]
    fn test_orphan_trigger_has_no_exhibit() {
        let page = Page::parse(PAGE, &Markup::default()).unwrap();
        assert_eq!(
            page.trigger(TriggerId(2)).unwrap().association,
            Association::None
        );
        assert!(page.exhibit_for(TriggerId(2)).is_none());
        assert!(page.exhibit_for(TriggerId(99)).is_none());
    }

    #[test]
    fn test_unknown_explicit_reference_falls_back_to_siblings() {
        let html = r#"<div>
            <button class="code-btn" data-exhibit="nope">View</button>
            <div class="code-data"><pre class="data-cpp">x</pre></div>
        </div>"#;
        let page = Page::parse(html, &Markup::default()).unwrap();
        assert_eq!(page.triggers()[0].association, Association::Sibling);
    }

    #[test]
    fn test_reveal_candidates_and_missing_surface() {
        let html = r#"<section>
            <h2>Title</h2>
            <p>Body</p>
            <div class="efficiency-box">O(n log n)</div>
            <div class="container"><span>plain</span></div>
        </section>"#;
        let page = Page::parse(html, &Markup::default()).unwrap();

        let tags: Vec<&str> = page
            .reveal_candidates()
            .iter()
            .map(|c| c.tag.as_str())
            .collect();
        // Plain sections are not animated, only their contents
        assert_eq!(tags, vec!["h2", "p", "div", "div"]);
        assert!(!page.surface().is_complete());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        std::fs::write(&path, PAGE).unwrap();

        let page = Page::load(&path, &Markup::default()).unwrap();
        assert_eq!(page.triggers().len(), 3);
    }
}
