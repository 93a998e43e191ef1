//! Showcase: one page, its exhibit panel and its reveal monitor
//!
//! Hosts feed typed [`PageEvent`]s in and render from panel snapshots.

use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use exhibit_content::{ContentResolver, Fetcher};
use exhibit_page::Page;
use exhibit_panel::{PanelController, PanelSnapshot, Viewport};
use exhibit_reveal::{Bounds, RevealId, RevealMonitor, ScrollIndicators};

use crate::config::Config;
use crate::error::CoreError;
use crate::event::{Outcome, PageEvent};
use crate::Result;

pub struct Showcase {
    config: Config,
    page: Arc<Page>,
    panel: PanelController,
    reveal: Arc<RwLock<RevealMonitor>>,
}

impl Showcase {
    /// Build a showcase around an assembled page, fetching remote slots the
    /// way `config.fetch` describes. Must be called inside a Tokio runtime.
    pub fn new(config: Config, page: Page) -> Result<Self> {
        let fetcher = config.fetch.fetcher()?;
        Self::with_fetcher(config, page, fetcher)
    }

    pub fn with_fetcher(config: Config, page: Page, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        config.validate()?;

        let page = Arc::new(page);
        let resolver = ContentResolver::new(fetcher, config.fetch.cache_buster());
        let panel = PanelController::new(Arc::clone(&page), resolver, config.panel.clone())?;
        let reveal = RevealMonitor::new(config.reveal)?;

        tracing::info!(
            triggers = page.triggers().len(),
            exhibits = page.exhibits().len(),
            presentation = ?panel.presentation(),
            "Showcase ready"
        );

        Ok(Self {
            config,
            page,
            panel,
            reveal: Arc::new(RwLock::new(reveal)),
        })
    }

    pub fn from_html(config: Config, html: &str) -> Result<Self> {
        let page = Page::parse(html, &config.markup)?;
        Self::new(config, page)
    }

    /// Load a page from disk. Without a base URL or site root, relative
    /// slot paths are read from the page's own directory.
    pub fn load(mut config: Config, path: &Path) -> Result<Self> {
        let page = Page::load(path, &config.markup)?;

        let fetch = &mut config.fetch;
        if fetch.base_url.is_none() && fetch.site_root.is_none() {
            fetch.site_root = Some(match path.parent() {
                Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
                _ => PathBuf::from("."),
            });
        }

        Self::new(config, page)
    }

    /// Dispatch one page event.
    pub fn handle(&self, event: PageEvent) -> Outcome {
        match event {
            PageEvent::Activate { trigger, anchor } => {
                Outcome::Opened(self.panel.open(trigger, anchor))
            }
            PageEvent::SelectTab(slot) => match self.panel.select_tab(slot) {
                Some(change) => Outcome::TabChanged(change),
                None => Outcome::Ignored,
            },
            PageEvent::CloseControl => closing(self.panel.close()),
            PageEvent::Pointer(target) => closing(self.panel.on_pointer(target)),
            PageEvent::Key(key) => closing(self.panel.on_key(&key)),
            PageEvent::Scroll(viewport) => Outcome::Revealed(self.scroll(&viewport)),
        }
    }

    /// Record where a reveal candidate sits in the document. Candidates are
    /// numbered in document order as found at page assembly.
    pub fn lay_out(&self, index: usize, bounds: Bounds) -> Result<bool> {
        if index >= self.page.reveal_candidates().len() {
            return Err(CoreError::Config(format!(
                "No reveal candidate at index {}",
                index
            )));
        }
        Ok(self.reveal.write().observe(RevealId(index), bounds)?)
    }

    /// Reveal whatever the visible area now shows enough of.
    pub fn scroll(&self, viewport: &Viewport) -> Vec<RevealId> {
        let visible = Bounds::new(
            viewport.scroll_x,
            viewport.scroll_y,
            viewport.width,
            viewport.height,
        );
        self.reveal.write().update(visible)
    }

    pub fn scroll_indicators(&self, viewport: &Viewport, document_height: f64) -> ScrollIndicators {
        ScrollIndicators::measure(
            viewport.scroll_y,
            viewport.height,
            document_height,
            self.config.reveal.back_to_top_offset,
        )
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.reveal.read().is_revealed(RevealId(index))
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        self.panel.snapshot()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn panel(&self) -> &PanelController {
        &self.panel
    }
}

impl Clone for Showcase {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            page: Arc::clone(&self.page),
            panel: self.panel.clone(),
            reveal: Arc::clone(&self.reveal),
        }
    }
}

fn closing(accepted: bool) -> Outcome {
    if accepted {
        Outcome::Closing
    } else {
        Outcome::Ignored
    }
}
