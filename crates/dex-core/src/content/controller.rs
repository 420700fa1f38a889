//! Animated content controller
//!
//! Binds index changes to one shared load per key and successful loads to
//! per-slot typewriter reveals. Every write to a slot happens under that
//! slot's lock and only if the writer's generation is still the active one,
//! so a superseded load or reveal can never touch the view even if its task
//! has not been reaped.

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::loader::{CancellableLoader, LoadHandle, LoadOutcome};
use super::reveal::{RevealHandle, RevealSequence, RevealUnit, TypewriterRevealer};
use super::slot::{ContentRecord, ContentSlot, SlotPhase, SlotView};
use crate::catalog::{EntryDetails, RemoteCatalog};
use crate::error::CatalogError;
use crate::navigation::{CircularIndex, NavigationStep, NavigationView, DEFAULT_CATALOG_SIZE};

/// Timing and fallback settings for the controller
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub catalog_size: NonZeroU32,
    /// Quiet period after the last navigation before a lookup is issued
    pub debounce: Duration,
    /// Delay between reveal frames
    pub reveal_interval: Duration,
    /// How long a navigation direction stays set
    pub transition: Duration,
    pub reveal_unit: RevealUnit,
    pub name_fallback: String,
    pub description_fallback: String,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            catalog_size: NonZeroU32::new(DEFAULT_CATALOG_SIZE).unwrap_or(NonZeroU32::MIN),
            debounce: Duration::from_millis(250),
            reveal_interval: Duration::from_millis(25),
            transition: Duration::from_millis(300),
            reveal_unit: RevealUnit::Char,
            name_fallback: "???".to_string(),
            description_fallback: "No description available.".to_string(),
        }
    }
}

impl ControllerSettings {
    pub fn fallback(&self, slot: ContentSlot) -> &str {
        match slot {
            ContentSlot::Name => &self.name_fallback,
            ContentSlot::Description => &self.description_fallback,
        }
    }
}

/// Index plus a move counter so stale direction resets can be detected
struct NavigationState {
    index: CircularIndex,
    moves: u64,
}

/// Work owned by one slot
struct SlotRuntime {
    revealer: Option<RevealHandle>,
    reveal_task: Option<JoinHandle<()>>,
    /// Generation allowed to write to the view
    active: Option<u64>,
}

impl SlotRuntime {
    fn cancel_active(&mut self) {
        self.active = None;
        if let Some(task) = self.reveal_task.take() {
            task.abort();
        }
        if let Some(revealer) = self.revealer.take() {
            revealer.cancel();
        }
    }

    fn is_armed(&self) -> bool {
        self.reveal_task.as_ref().is_some_and(|task| !task.is_finished())
            || self.revealer.as_ref().is_some_and(|revealer| !revealer.is_cancelled())
    }
}

struct SlotDriver {
    slot: ContentSlot,
    state: Mutex<SlotRuntime>,
    view_tx: watch::Sender<SlotView>,
}

impl SlotDriver {
    fn new(slot: ContentSlot) -> Self {
        let (view_tx, _) = watch::channel(SlotView::default());
        Self {
            slot,
            state: Mutex::new(SlotRuntime {
                revealer: None,
                reveal_task: None,
                active: None,
            }),
            view_tx,
        }
    }

    /// Cancel whatever the slot is doing and hand it to `generation`
    fn begin(&self, key: u32, generation: u64) {
        let mut state = self.state.lock();
        state.cancel_active();
        state.active = Some(generation);

        self.view_tx.send_replace(SlotView {
            key,
            phase: SlotPhase::Debouncing,
            text: String::new(),
            failure: None,
        });
    }

    /// Start revealing `content` if `generation` still owns the slot
    fn start_reveal(
        self: &Arc<Self>,
        generation: u64,
        content: &ContentRecord,
        settings: &ControllerSettings,
        runtime: &Handle,
    ) {
        let mut state = self.state.lock();
        if state.active != Some(generation) {
            return;
        }

        let revealer = TypewriterRevealer::new(settings.reveal_unit);
        let (sequence, handle) = revealer.play(&content.display_text, settings.reveal_interval);
        if let Some(previous) = state.revealer.replace(handle) {
            previous.cancel();
        }
        self.view_tx.send_modify(|view| view.phase = SlotPhase::Revealing);

        let task = runtime.spawn(Arc::clone(self).reveal(
            generation,
            sequence,
            content.display_text.clone(),
        ));
        if let Some(previous) = state.reveal_task.replace(task) {
            previous.abort();
        }
    }

    async fn reveal(self: Arc<Self>, generation: u64, mut sequence: RevealSequence, text: String) {
        while let Some(frame) = sequence.next().await {
            if !self.apply(generation, |view| view.text = frame.text) {
                return;
            }
        }

        let mut state = self.state.lock();
        if state.active == Some(generation) {
            state.revealer = None;
            state.reveal_task = None;
            self.view_tx.send_modify(|view| view.phase = SlotPhase::Idle);
            debug!(slot = self.slot.label(), %text, "Reveal finished");
        }
    }

    /// Show the fallback text and settle in `Idle` with the failure recorded
    fn fail(&self, generation: u64, err: CatalogError, fallback: &str) {
        let state = self.state.lock();
        if state.active != Some(generation) {
            return;
        }

        let key = self.view_tx.borrow().key;
        warn!(slot = self.slot.label(), key, error = %err, "Load failed, showing fallback");

        self.view_tx.send_modify(|view| {
            view.phase = SlotPhase::Idle;
            view.text = fallback.to_string();
            view.failure = Some(err);
        });
    }

    /// Run `f` only while `generation` owns the slot
    fn if_active(&self, generation: u64, f: impl FnOnce()) -> bool {
        let state = self.state.lock();
        if state.active != Some(generation) {
            return false;
        }
        f();
        true
    }

    /// Apply `update` to the view if `generation` still owns the slot
    fn apply(&self, generation: u64, update: impl FnOnce(&mut SlotView)) -> bool {
        self.if_active(generation, || self.view_tx.send_modify(update))
    }

    fn cancel(&self) {
        let mut state = self.state.lock();
        state.cancel_active();
        self.view_tx.send_if_modified(|view| {
            let busy = view.is_busy();
            view.phase = SlotPhase::Idle;
            busy
        });
    }

    fn is_armed(&self) -> bool {
        self.state.lock().is_armed()
    }
}

/// Wait on one load and feed its outcome to every slot.
///
/// The record is fetched once; each slot reveals its own projection or falls
/// back on its own if that projection failed.
async fn dispatch_load(
    mut handle: LoadHandle,
    slots: [Arc<SlotDriver>; 2],
    settings: Arc<ControllerSettings>,
    details_tx: Arc<watch::Sender<Option<EntryDetails>>>,
    runtime: Handle,
) {
    let generation = handle.generation();
    let key = handle.key();

    if handle.fetch_started().await {
        for driver in &slots {
            driver.apply(generation, |view| view.phase = SlotPhase::Fetching);
        }
    }

    match handle.outcome().await {
        LoadOutcome::Success(entry) => {
            for driver in &slots {
                if driver.slot == ContentSlot::Name {
                    driver.if_active(generation, || {
                        details_tx.send_replace(Some(entry.details().clone()));
                    });
                }
                match entry.content(driver.slot) {
                    Ok(content) => driver.start_reveal(generation, content, &settings, &runtime),
                    Err(err) => driver.fail(generation, err.clone(), settings.fallback(driver.slot)),
                }
            }
        }
        LoadOutcome::Failure(err) => {
            for driver in &slots {
                driver.fail(generation, err.clone(), settings.fallback(driver.slot));
            }
        }
        LoadOutcome::Cancelled => debug!(key, "Load cancelled"),
    }
}

/// Drives the name and description slots from navigation input.
///
/// The view talks to it through [`on_navigate`](Self::on_navigate) and
/// [`on_jump_to`](Self::on_jump_to) and observes it through watch channels.
/// Keyboard arrows and on-screen arrows both go through `on_navigate`.
pub struct AnimatedContentController {
    runtime: Handle,
    settings: Arc<ControllerSettings>,
    navigation: Arc<Mutex<NavigationState>>,
    navigation_tx: Arc<watch::Sender<NavigationView>>,
    details_tx: Arc<watch::Sender<Option<EntryDetails>>>,
    /// One lookup per navigation, shared by every slot
    loader: Mutex<CancellableLoader>,
    /// Waits on the current load and hands its outcome to the slots
    dispatch: Mutex<Option<JoinHandle<()>>>,
    slots: [Arc<SlotDriver>; 2],
    direction_reset: Mutex<Option<JoinHandle<()>>>,
    disposed: AtomicBool,
}

impl AnimatedContentController {
    /// Create a controller positioned at entry 1. Nothing is loaded until
    /// [`start`](Self::start) or the first navigation.
    pub fn new(catalog: Arc<dyn RemoteCatalog>, settings: ControllerSettings, runtime: Handle) -> Self {
        let index = CircularIndex::new(settings.catalog_size);
        let (navigation_tx, _) = watch::channel(index.view());
        let (details_tx, _) = watch::channel(None);

        let loader = CancellableLoader::new(catalog, runtime.clone());
        let slots = ContentSlot::ALL.map(|slot| Arc::new(SlotDriver::new(slot)));

        Self {
            runtime,
            loader: Mutex::new(loader),
            dispatch: Mutex::new(None),
            settings: Arc::new(settings),
            navigation: Arc::new(Mutex::new(NavigationState { index, moves: 0 })),
            navigation_tx: Arc::new(navigation_tx),
            details_tx: Arc::new(details_tx),
            slots,
            direction_reset: Mutex::new(None),
            disposed: AtomicBool::new(false),
        }
    }

    /// Load the entry at the current index
    pub fn start(&self) {
        if self.is_disposed() {
            return;
        }
        let index = self.current_index();
        info!(index, size = self.settings.catalog_size.get(), "Starting content controller");
        self.load(index);
    }

    /// Step forward or backward, wrapping at the catalogue ends
    pub fn on_navigate(&self, step: NavigationStep) -> u32 {
        if self.is_disposed() {
            debug!(?step, "Ignoring navigation after teardown");
            return self.current_index();
        }

        let (index, moves) = {
            let mut state = self.navigation.lock();
            let (index, direction) = state.index.step(step);
            state.moves += 1;
            self.navigation_tx.send_replace(state.index.view());
            debug!(index, ?direction, "Navigated");
            (index, state.moves)
        };

        self.schedule_direction_reset(moves);
        self.load(index);
        index
    }

    /// Jump straight to `value`.
    ///
    /// Out-of-range values are rejected and leave every slot untouched.
    pub fn on_jump_to(&self, value: i64) -> Result<u32, CatalogError> {
        if self.is_disposed() {
            return Err(CatalogError::Cancelled);
        }

        let index = {
            let mut state = self.navigation.lock();
            let (index, _) = state.index.jump_to(value).map_err(|err| {
                debug!(value, error = %err, "Rejected direct lookup");
                err
            })?;
            state.moves += 1;
            self.navigation_tx.send_replace(state.index.view());
            index
        };

        if let Some(task) = self.direction_reset.lock().take() {
            task.abort();
        }
        self.load(index);
        Ok(index)
    }

    /// Cancel every load, reveal and timer. Safe to call more than once.
    pub fn teardown(&self) {
        let first = !self.disposed.swap(true, Ordering::SeqCst);

        if let Some(task) = self.direction_reset.lock().take() {
            task.abort();
        }
        if let Some(task) = self.dispatch.lock().take() {
            task.abort();
        }
        self.loader.lock().cancel();
        for driver in &self.slots {
            driver.cancel();
        }

        if first {
            debug!("Content controller torn down");
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Whether any timer, lookup or reveal is still outstanding
    pub fn is_armed(&self) -> bool {
        let reset_pending = self
            .direction_reset
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished());
        let dispatch_pending = self
            .dispatch
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished());
        reset_pending
            || dispatch_pending
            || self.loader.lock().is_armed()
            || self.slots.iter().any(|driver| driver.is_armed())
    }

    pub fn current_index(&self) -> u32 {
        self.navigation.lock().index.current()
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn navigation(&self) -> watch::Receiver<NavigationView> {
        self.navigation_tx.subscribe()
    }

    pub fn navigation_view(&self) -> NavigationView {
        *self.navigation_tx.borrow()
    }

    pub fn slot(&self, slot: ContentSlot) -> watch::Receiver<SlotView> {
        self.driver(slot).view_tx.subscribe()
    }

    pub fn slot_view(&self, slot: ContentSlot) -> SlotView {
        self.driver(slot).view_tx.borrow().clone()
    }

    pub fn details(&self) -> watch::Receiver<Option<EntryDetails>> {
        self.details_tx.subscribe()
    }

    pub fn details_view(&self) -> Option<EntryDetails> {
        self.details_tx.borrow().clone()
    }

    fn driver(&self, slot: ContentSlot) -> &Arc<SlotDriver> {
        match slot {
            ContentSlot::Name => &self.slots[0],
            ContentSlot::Description => &self.slots[1],
        }
    }

    fn load(&self, key: u32) {
        let mut loader = self.loader.lock();
        let mut dispatch = self.dispatch.lock();
        if let Some(task) = dispatch.take() {
            task.abort();
        }

        let handle = loader.request(key, self.settings.debounce);
        let generation = handle.generation();
        for driver in &self.slots {
            driver.begin(key, generation);
        }
        self.details_tx.send_replace(None);

        *dispatch = Some(self.runtime.spawn(dispatch_load(
            handle,
            self.slots.clone(),
            Arc::clone(&self.settings),
            Arc::clone(&self.details_tx),
            self.runtime.clone(),
        )));
    }

    fn schedule_direction_reset(&self, moves: u64) {
        let mut pending = self.direction_reset.lock();
        if let Some(task) = pending.take() {
            task.abort();
        }

        let navigation = Arc::clone(&self.navigation);
        let navigation_tx = Arc::clone(&self.navigation_tx);
        let window = self.settings.transition;

        *pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(window).await;
            let mut state = navigation.lock();
            if state.moves == moves {
                state.index.reset_direction();
                navigation_tx.send_replace(state.index.view());
            }
        }));
    }
}

impl Drop for AnimatedContentController {
    fn drop(&mut self) {
        self.teardown();
    }
}
