//! Panel controller
//!
//! Owns the panel's state, its tab selection and the content of the exhibit
//! currently shown. Nothing else writes them; background fetches go through
//! the controller's token check before touching content.

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use exhibit_content::{
    ContentResolver, ContentSink, ExhibitSource, RequestToken, Resolution, ResolvedContent, Slot,
    SlotContent, TokenIssuer,
};
use exhibit_page::{Page, SurfaceElement, TriggerId};

use crate::error::PanelError;
use crate::position::{Anchor, Point};
use crate::settings::{PanelSettings, PanelVariant};
use crate::snapshot::{PanelSnapshot, Presentation};
use crate::state::PanelState;
use crate::tabs::{TabChange, TabSelector};
use crate::Result;

/// Where a pointer activation landed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerTarget {
    /// The backdrop around the panel, not the panel itself
    Backdrop,
    /// Anywhere inside the panel window
    Panel,
    /// Elsewhere on the page
    Page,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Other(String),
}

struct PanelInner {
    state: PanelState,
    /// Bumped on every state change; phase timers only act on their own epoch
    epoch: u64,
    tabs: TabSelector,
    content: Option<ResolvedContent>,
    trigger: Option<TriggerId>,
    title: Option<String>,
    position: Option<Point>,
}

impl PanelInner {
    fn transition_to(&mut self, next: PanelState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(PanelError::InvalidTransition {
                from: self.state.to_string(),
                to: next.to_string(),
            });
        }

        tracing::debug!(from = %self.state, to = %next, "Panel state transition");

        self.state = next;
        self.epoch += 1;
        Ok(())
    }
}

struct Shared {
    inner: RwLock<PanelInner>,
    presentation: Presentation,
    updates: watch::Sender<PanelSnapshot>,
    tasks: Mutex<Vec<JoinHandle<bool>>>,
}

impl Shared {
    fn snapshot_of(&self, inner: &PanelInner) -> PanelSnapshot {
        PanelSnapshot::new(
            inner.state,
            self.presentation,
            inner.tabs.active(),
            inner.trigger,
            inner.title.clone(),
            inner.position,
            inner.content.as_ref(),
        )
    }

    fn publish(&self, inner: &PanelInner) {
        self.updates.send_replace(self.snapshot_of(inner));
    }

    /// End a timed phase, unless something else happened since it began.
    fn finish_phase(&self, epoch: u64, next: PanelState) -> bool {
        let mut inner = self.inner.write();
        if inner.epoch != epoch {
            return false;
        }
        if let Err(e) = inner.transition_to(next) {
            tracing::warn!(error = %e, "Dropped phase timer");
            return false;
        }

        if next == PanelState::Closed {
            inner.content = None;
            inner.trigger = None;
            inner.title = None;
            inner.position = None;
            tracing::info!("Exhibit panel closed");
        }

        self.publish(&inner);
        true
    }

    fn track(&self, handles: Vec<JoinHandle<bool>>) {
        let mut tasks = self.tasks.lock();
        tasks.retain(|handle| !handle.is_finished());
        tasks.extend(handles);
    }
}

impl ContentSink for Shared {
    fn apply(&self, token: RequestToken, slot: Slot, content: SlotContent) -> bool {
        let mut inner = self.inner.write();
        let applied = match inner.content.as_mut() {
            Some(current) => current.apply(token, slot, content),
            None => false,
        };
        if applied {
            if inner.content.as_ref().is_some_and(ResolvedContent::is_settled) {
                tracing::debug!(token = %token, "Exhibit content settled");
            }
            self.publish(&inner);
        }
        applied
    }
}

pub struct PanelController {
    shared: Arc<Shared>,
    page: Arc<Page>,
    resolver: ContentResolver,
    tokens: Arc<TokenIssuer>,
    settings: PanelSettings,
    runtime: Handle,
}

impl PanelController {
    /// Must be created inside a Tokio runtime; fetches and phase timers are
    /// spawned onto it.
    pub fn new(page: Arc<Page>, resolver: ContentResolver, settings: PanelSettings) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| PanelError::NoRuntime(e.to_string()))?;
        let presentation = choose_presentation(&page, settings.variant);
        let (updates, _) = watch::channel(PanelSnapshot::closed(presentation));

        Ok(Self {
            shared: Arc::new(Shared {
                inner: RwLock::new(PanelInner {
                    state: PanelState::Closed,
                    epoch: 0,
                    tabs: TabSelector::new(),
                    content: None,
                    trigger: None,
                    title: None,
                    position: None,
                }),
                presentation,
                updates,
                tasks: Mutex::new(Vec::new()),
            }),
            page,
            resolver,
            tokens: Arc::new(TokenIssuer::new()),
            settings,
            runtime,
        })
    }

    /// Open the exhibit behind `trigger`.
    ///
    /// Never fails: a trigger without data opens with every slot absent. Any
    /// open or opening exhibit is replaced, and its pending fetches become
    /// stale.
    pub fn open(&self, trigger: TriggerId, anchor: Option<Anchor>) -> RequestToken {
        let source = match self.page.exhibit_for(trigger) {
            Some(source) => source.clone(),
            None => {
                tracing::warn!(trigger = %trigger, "No exhibit data for trigger, showing placeholders");
                ExhibitSource::absent()
            }
        };
        let title = self.page.trigger(trigger).map(|t| t.label.clone());
        let position = self.place(anchor);

        // Minting and installing happen under one lock so the newest token is
        // always the installed one
        let (token, remote, epoch) = {
            let mut inner = self.shared.inner.write();
            let token = self.tokens.mint();
            let Resolution { content, remote } = self.resolver.begin(&source, token);

            if let Err(e) = inner.transition_to(PanelState::Opening) {
                tracing::warn!(error = %e, "Unexpected transition on open");
            }
            inner.tabs.reset();
            inner.content = Some(content);
            inner.trigger = Some(trigger);
            inner.title = title;
            inner.position = position;
            self.shared.publish(&inner);
            (token, remote, inner.epoch)
        };

        tracing::info!(
            trigger = %trigger,
            token = %token,
            remote = remote.len(),
            "Opening exhibit"
        );

        let sink: Arc<dyn ContentSink> = self.shared.clone();
        let _guard = self.runtime.enter();
        let mut handles = self.resolver.spawn(token, remote, sink);
        handles.push(self.schedule(epoch, self.settings.opening(), PanelState::Open));
        self.shared.track(handles);

        token
    }

    /// Start closing. Returns false if the panel is not shown.
    pub fn close(&self) -> bool {
        let epoch = {
            let mut inner = self.shared.inner.write();
            if !inner.state.is_shown() {
                return false;
            }
            if let Err(e) = inner.transition_to(PanelState::Closing) {
                tracing::warn!(error = %e, "Unexpected transition on close");
                return false;
            }
            self.shared.publish(&inner);
            inner.epoch
        };

        tracing::debug!("Closing exhibit panel");

        let handle = self.schedule(epoch, self.settings.closing(), PanelState::Closed);
        self.shared.track(vec![handle]);
        true
    }

    /// Pointer activation; only a direct hit on the backdrop closes.
    pub fn on_pointer(&self, target: PointerTarget) -> bool {
        match target {
            PointerTarget::Backdrop => self.close(),
            PointerTarget::Panel | PointerTarget::Page => false,
        }
    }

    pub fn on_key(&self, key: &Key) -> bool {
        match key {
            Key::Escape => self.close(),
            Key::Other(_) => false,
        }
    }

    /// Switch tabs while the panel is shown.
    pub fn select_tab(&self, slot: Slot) -> Option<TabChange> {
        self.switch_tab(|tabs| Ok(tabs.select(slot))).unwrap_or(None)
    }

    /// Switch tabs by control name (`code`, `cpp`, `input`, `output`).
    /// Ignored, name unchecked, while the panel is not shown.
    pub fn select_tab_named(&self, name: &str) -> Result<Option<TabChange>> {
        self.switch_tab(|tabs| tabs.select_named(name))
    }

    pub fn state(&self) -> PanelState {
        self.shared.inner.read().state
    }

    pub fn active_tab(&self) -> Slot {
        self.shared.inner.read().tabs.active()
    }

    pub fn presentation(&self) -> Presentation {
        self.shared.presentation
    }

    pub fn snapshot(&self) -> PanelSnapshot {
        let inner = self.shared.inner.read();
        self.shared.snapshot_of(&inner)
    }

    /// Receive a snapshot after every change
    pub fn subscribe(&self) -> watch::Receiver<PanelSnapshot> {
        self.shared.updates.subscribe()
    }

    /// Wait until every fetch and phase timer spawned so far has finished.
    pub async fn settled(&self) {
        loop {
            let handles = std::mem::take(&mut *self.shared.tasks.lock());
            if handles.is_empty() {
                break;
            }
            for handle in handles {
                if let Err(e) = handle.await {
                    tracing::warn!(error = %e, "Panel task failed");
                }
            }
        }
    }

    fn switch_tab(
        &self,
        select: impl FnOnce(&mut TabSelector) -> Result<Option<TabChange>>,
    ) -> Result<Option<TabChange>> {
        let mut inner = self.shared.inner.write();
        if !inner.state.is_shown() {
            tracing::debug!(state = %inner.state, "Ignoring tab switch");
            return Ok(None);
        }
        let change = select(&mut inner.tabs)?;
        if change.is_some() {
            self.shared.publish(&inner);
        }
        Ok(change)
    }

    fn place(&self, anchor: Option<Anchor>) -> Option<Point> {
        match (self.shared.presentation, anchor) {
            (Presentation::Floating, Some(anchor)) => Some(self.settings.placement.place(
                anchor.trigger,
                self.settings.panel_size(),
                anchor.viewport,
            )),
            _ => None,
        }
    }

    fn schedule(&self, epoch: u64, delay: Duration, next: PanelState) -> JoinHandle<bool> {
        let shared = Arc::clone(&self.shared);
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            shared.finish_phase(epoch, next)
        })
    }
}

impl Clone for PanelController {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            page: Arc::clone(&self.page),
            resolver: self.resolver.clone(),
            tokens: Arc::clone(&self.tokens),
            settings: self.settings.clone(),
            runtime: self.runtime.clone(),
        }
    }
}

fn choose_presentation(page: &Page, variant: PanelVariant) -> Presentation {
    let surface = page.surface();
    if !surface.is_complete() {
        let missing = surface
            .missing()
            .iter()
            .map(SurfaceElement::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        tracing::warn!(missing = %missing, "Page is missing panel surface elements");
    }

    if !surface.has_regions() {
        return Presentation::Minimal;
    }

    match variant {
        PanelVariant::Floating => Presentation::Floating,
        PanelVariant::Modal => Presentation::Modal,
    }
}
