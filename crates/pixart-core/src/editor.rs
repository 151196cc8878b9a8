//! Editor - grid painting, tools and preset loading state
//!
//! The editor owns the grid, the tool state and the persistence store. Hosts
//! feed it pointer and control events and drain [`EditorEvent`]s to drive
//! their presentation (toasts, erase animations, alerts).

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::color::Color;
use crate::grid::Grid;
use crate::persistence::{decode_snapshot, encode_snapshot, PersistenceStore, SAVE_KEY};
use crate::preset::FALLBACK_PRESET;
use crate::toast::{ToastDebouncer, ToastEvent};
use crate::translations::Translations;

/// Delay before an erased cell is shown white, covering its animation
pub const ERASE_REVEAL_DELAY: Duration = Duration::from_millis(300);

/// Active painting tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Paint the active color
    #[default]
    Draw,
    /// Paint white
    Erase,
}

/// Mutable tool and control state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    /// Current tool
    pub tool: Tool,
    /// Color written by the draw tool
    pub active_color: Color,
    /// Pointer held down over the grid
    pub painting: bool,
    /// Preset controls accept input
    pub preset_controls_enabled: bool,
    /// Busy cursor shown
    pub busy: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            tool: Tool::Draw,
            active_color: Color::BLACK,
            painting: false,
            preset_controls_enabled: true,
            busy: false,
        }
    }
}

/// Notifications for the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// Cell displayed color changed
    CellChanged {
        /// Cell index
        index: usize,
        /// New displayed color
        color: Color,
    },
    /// A painted cell was erased; play the explosion for `color`
    Explosion {
        /// Cell index
        index: usize,
        /// Color the cell had before erasing
        color: Color,
        /// When to show the erased cell as white
        reveal_after: Duration,
    },
    /// Whole grid replaced (restore, reset, preset)
    GridReplaced,
    /// Snapshot written to the store
    Saved,
    /// Save acknowledgment toast
    Toast(ToastEvent),
    /// Tool switched
    ToolChanged(Tool),
    /// Preset control enabled state or busy cursor changed
    PresetControls {
        /// Controls accept input
        enabled: bool,
        /// Busy cursor shown
        busy: bool,
    },
    /// User-visible error message
    Alert(String),
}

/// Result of a paint attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOutcome {
    /// Cell already showed the target color
    Unchanged,
    /// Cell painted with a color
    Painted,
    /// Painted cell erased
    Erased,
}

/// Handle for one in-flight preset load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetTicket {
    name: String,
    generation: u64,
}

impl PresetTicket {
    /// Requested preset name
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Result of finishing a preset load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetLoadOutcome {
    /// Grid replaced by the preset
    Applied,
    /// A newer action happened while loading; result dropped
    Superseded,
    /// Load failed and an alert was raised
    Failed,
}

/// Entry of the preset selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetOption {
    /// Preset name
    pub name: String,
    /// Display label
    pub label: String,
}

/// The pixel editor
pub struct Editor<S: PersistenceStore> {
    grid: Grid,
    state: EditorState,
    store: S,
    translations: Translations,
    toast: ToastDebouncer,
    preset_names: Vec<String>,
    events: Vec<EditorEvent>,
    /// Bumped by every grid-changing user action
    generation: u64,
    loads_in_flight: usize,
}

impl<S: PersistenceStore> Editor<S> {
    /// Create an editor and restore any saved snapshot from `store`
    pub fn new(store: S, translations: Translations) -> Self {
        let mut editor = Self {
            grid: Grid::new(),
            state: EditorState::default(),
            store,
            translations,
            toast: ToastDebouncer::default(),
            preset_names: Vec::new(),
            events: Vec::new(),
            generation: 0,
            loads_in_flight: 0,
        };
        editor.restore();
        editor
    }

    /// Current grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current tool state
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Text configuration
    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    /// Persistence store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Take the pending events
    pub fn drain_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    /// Load the saved snapshot, if a valid one exists
    pub fn restore(&mut self) -> bool {
        let raw = match self.store.get(SAVE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(e) => {
                error!("Failed to read saved art: {}", e);
                return false;
            }
        };

        match decode_snapshot(&raw) {
            Some(grid) => {
                self.grid = grid;
                self.events.push(EditorEvent::GridReplaced);
                debug!("Restored saved art");
                true
            }
            None => {
                warn!("Ignoring malformed saved art");
                false
            }
        }
    }

    /// Write the snapshot and schedule the save toast
    pub fn save_state(&mut self) {
        self.save_state_at(Instant::now());
    }

    fn save_state_at(&mut self, now: Instant) {
        let result = encode_snapshot(&self.grid).and_then(|raw| self.store.set(SAVE_KEY, &raw));
        match result {
            Ok(()) => {
                self.events.push(EditorEvent::Saved);
                self.toast.notify_save(now);
            }
            Err(e) => error!("Failed to save art: {}", e),
        }
    }

    /// Advance timers to now
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Advance timers to `now`
    pub fn tick_at(&mut self, now: Instant) {
        while let Some(event) = self.toast.poll(now) {
            self.events.push(EditorEvent::Toast(event));
        }
    }

    /// Switch tool
    pub fn set_tool(&mut self, tool: Tool) {
        self.state.tool = tool;
        self.events.push(EditorEvent::ToolChanged(tool));
    }

    /// Pick the draw color; this also selects the draw tool
    pub fn set_active_color(&mut self, color: Color) {
        self.state.active_color = color;
        self.set_tool(Tool::Draw);
    }

    /// Paint one cell with the current tool.
    ///
    /// White on an already white cell and the same color on a cell are
    /// no-ops and do not save.
    pub fn paint(&mut self, index: usize) -> PaintOutcome {
        let target = match self.state.tool {
            Tool::Draw => self.state.active_color,
            Tool::Erase => Color::WHITE,
        };
        let previous = self.grid.get(index);
        let current = previous.unwrap_or(Color::WHITE);
        let was_colored = previous.is_some();

        if current == target || (target.is_white() && !was_colored) {
            return PaintOutcome::Unchanged;
        }

        if self.grid.set(index, Some(target)).is_err() {
            warn!("Ignoring paint outside the grid: {}", index);
            return PaintOutcome::Unchanged;
        }
        self.generation += 1;

        let outcome = if self.state.tool == Tool::Erase && was_colored {
            self.events.push(EditorEvent::Explosion {
                index,
                color: current,
                reveal_after: ERASE_REVEAL_DELAY,
            });
            PaintOutcome::Erased
        } else {
            PaintOutcome::Painted
        };

        self.events.push(EditorEvent::CellChanged {
            index,
            color: target,
        });
        self.save_state();
        outcome
    }

    /// Pointer pressed on a cell: start a drag session and paint it
    pub fn pointer_down(&mut self, index: usize) -> PaintOutcome {
        self.state.painting = true;
        self.paint(index)
    }

    /// Pointer moved over a cell; paints only during a drag session
    pub fn pointer_move(&mut self, index: usize) -> PaintOutcome {
        if !self.state.painting {
            return PaintOutcome::Unchanged;
        }
        self.paint(index)
    }

    /// Pointer released anywhere
    pub fn pointer_up(&mut self) {
        self.state.painting = false;
    }

    /// Pointer left the grid
    pub fn pointer_leave(&mut self) {
        self.state.painting = false;
    }

    /// Clear the grid and save
    pub fn reset(&mut self) {
        self.grid.clear();
        self.generation += 1;
        self.events.push(EditorEvent::GridReplaced);
        info!("Grid reset");
        self.save_state();
    }

    /// Store the fetched preset names
    pub fn set_preset_names(&mut self, names: Vec<String>) {
        if names.is_empty() {
            warn!("Preset list is empty");
        }
        self.preset_names = names;
    }

    /// Known preset names, in discovery order
    pub fn preset_names(&self) -> &[String] {
        &self.preset_names
    }

    /// Selector entries with their display labels
    pub fn preset_options(&self) -> Vec<PresetOption> {
        self.preset_names
            .iter()
            .map(|name| PresetOption {
                name: name.clone(),
                label: self.translations.preset_label(name),
            })
            .collect()
    }

    /// Pick a random known preset, or the fallback when none are known
    pub fn random_preset<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.preset_names
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| FALLBACK_PRESET.to_string())
    }

    /// Start loading a preset: disables the preset controls and shows the
    /// busy cursor until the matching [`Editor::finish_preset_load`]
    pub fn begin_preset_load(&mut self, name: impl Into<String>) -> PresetTicket {
        self.generation += 1;
        self.loads_in_flight += 1;
        self.set_preset_controls(false, true);
        PresetTicket {
            name: name.into(),
            generation: self.generation,
        }
    }

    /// Start a preset load whose in-flight slot is released when the
    /// returned guard is dropped, finished or not
    pub fn start_preset_load(&mut self, name: impl Into<String>) -> PendingPresetLoad<'_, S> {
        let ticket = self.begin_preset_load(name);
        PendingPresetLoad {
            editor: self,
            ticket: Some(ticket),
        }
    }

    /// Give up on a load without applying anything
    pub fn cancel_preset_load(&mut self, ticket: PresetTicket) {
        debug!("Preset load '{}' cancelled", ticket.name);
        self.release_preset_load();
    }

    fn release_preset_load(&mut self) {
        self.loads_in_flight = self.loads_in_flight.saturating_sub(1);
        if self.loads_in_flight == 0 {
            self.set_preset_controls(true, false);
        }
    }

    /// Finish a preset load. Controls are re-enabled once no load is in
    /// flight, whatever the result.
    pub fn finish_preset_load<E: fmt::Display>(
        &mut self,
        ticket: PresetTicket,
        result: std::result::Result<Grid, E>,
    ) -> PresetLoadOutcome {
        self.release_preset_load();

        match result {
            Ok(grid) if ticket.generation == self.generation => {
                self.grid = grid;
                self.events.push(EditorEvent::GridReplaced);
                info!("Loaded preset '{}'", ticket.name);
                self.save_state();
                PresetLoadOutcome::Applied
            }
            Ok(_) => {
                debug!("Dropping stale preset '{}'", ticket.name);
                PresetLoadOutcome::Superseded
            }
            Err(e) => {
                error!("Error loading preset '{}': {}", ticket.name, e);
                self.events
                    .push(EditorEvent::Alert(self.translations.error_loading.clone()));
                PresetLoadOutcome::Failed
            }
        }
    }

    fn set_preset_controls(&mut self, enabled: bool, busy: bool) {
        if self.state.preset_controls_enabled == enabled && self.state.busy == busy {
            return;
        }
        self.state.preset_controls_enabled = enabled;
        self.state.busy = busy;
        self.events.push(EditorEvent::PresetControls { enabled, busy });
    }
}

/// In-flight preset load holding the editor.
///
/// Dropping it without [`PendingPresetLoad::finish`] cancels the load.
pub struct PendingPresetLoad<'a, S: PersistenceStore> {
    editor: &'a mut Editor<S>,
    ticket: Option<PresetTicket>,
}

impl<S: PersistenceStore> PendingPresetLoad<'_, S> {
    /// Requested preset name
    pub fn name(&self) -> &str {
        self.ticket.as_ref().map(PresetTicket::name).unwrap_or_default()
    }

    /// Apply the fetch result
    pub fn finish<E: fmt::Display>(
        mut self,
        result: std::result::Result<Grid, E>,
    ) -> PresetLoadOutcome {
        match self.ticket.take() {
            Some(ticket) => self.editor.finish_preset_load(ticket, result),
            None => PresetLoadOutcome::Superseded,
        }
    }
}

impl<S: PersistenceStore> Drop for PendingPresetLoad<'_, S> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            self.editor.cancel_preset_load(ticket);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, Result};
    use crate::persistence::MemoryStore;

    /// Store that rejects every write
    struct FailingStore;

    impl PersistenceStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(CoreError::Store("disk full".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    fn editor() -> Editor<MemoryStore> {
        Editor::new(MemoryStore::new(), Translations::default())
    }

    fn saves(events: &[EditorEvent]) -> usize {
        events.iter().filter(|e| **e == EditorEvent::Saved).count()
    }

    #[test]
    fn test_draw_then_same_color_is_noop() {
        let mut ed = editor();
        ed.set_active_color(Color::rgb(200, 0, 0));
        assert_eq!(ed.paint(10), PaintOutcome::Painted);
        ed.drain_events();

        assert_eq!(ed.paint(10), PaintOutcome::Unchanged);
        assert_eq!(saves(&ed.drain_events()), 0);
    }

    #[test]
    fn test_erase_white_cell_is_noop() {
        let mut ed = editor();
        ed.set_tool(Tool::Erase);
        ed.drain_events();
        assert_eq!(ed.paint(0), PaintOutcome::Unchanged);
        assert!(ed.drain_events().is_empty());
    }

    #[test]
    fn test_erase_colored_cell_explodes() {
        let mut ed = editor();
        let red = Color::rgb(255, 0, 0);
        ed.set_active_color(red);
        ed.paint(7);
        ed.set_tool(Tool::Erase);
        ed.drain_events();

        assert_eq!(ed.paint(7), PaintOutcome::Erased);
        assert_eq!(ed.grid().get(7), None);

        let events = ed.drain_events();
        assert!(events.contains(&EditorEvent::Explosion {
            index: 7,
            color: red,
            reveal_after: ERASE_REVEAL_DELAY,
        }));
        assert_eq!(saves(&events), 1);
    }

    #[test]
    fn test_drawing_white_clears_without_explosion() {
        let mut ed = editor();
        ed.set_active_color(Color::BLACK);
        ed.paint(3);
        ed.set_active_color(Color::WHITE);
        ed.drain_events();

        assert_eq!(ed.paint(3), PaintOutcome::Painted);
        assert_eq!(ed.grid().get(3), None);
        assert!(!ed
            .drain_events()
            .iter()
            .any(|e| matches!(e, EditorEvent::Explosion { .. })));
    }

    #[test]
    fn test_out_of_range_paint_is_ignored() {
        let mut ed = editor();
        assert_eq!(ed.paint(400), PaintOutcome::Unchanged);
    }

    #[test]
    fn test_drag_session() {
        let mut ed = editor();
        ed.set_active_color(Color::BLACK);

        assert_eq!(ed.pointer_move(1), PaintOutcome::Unchanged);
        assert_eq!(ed.pointer_down(2), PaintOutcome::Painted);
        assert_eq!(ed.pointer_move(3), PaintOutcome::Painted);
        ed.pointer_leave();
        assert_eq!(ed.pointer_move(4), PaintOutcome::Unchanged);
        ed.pointer_down(5);
        ed.pointer_up();
        assert_eq!(ed.pointer_move(6), PaintOutcome::Unchanged);

        let painted: Vec<usize> = ed.grid().painted().map(|(i, _)| i).collect();
        assert_eq!(painted, vec![2, 3, 5]);
    }

    #[test]
    fn test_color_pick_selects_draw() {
        let mut ed = editor();
        ed.set_tool(Tool::Erase);
        ed.set_active_color(Color::rgb(0, 0, 255));
        assert_eq!(ed.state().tool, Tool::Draw);
    }

    #[test]
    fn test_saves_are_restored_by_new_editor() {
        let mut ed = editor();
        ed.set_active_color(Color::rgb(0, 255, 0));
        ed.paint(42);
        let store = ed.store().clone();

        let restored = Editor::new(store, Translations::default());
        assert_eq!(restored.grid().get(42), Some(Color::rgb(0, 255, 0)));
    }

    #[test]
    fn test_malformed_save_is_ignored() {
        let mut store = MemoryStore::new();
        store.set(SAVE_KEY, "[1, 2, 3]").unwrap();
        let ed = Editor::new(store, Translations::default());
        assert!(ed.grid().is_blank());
    }

    #[test]
    fn test_reset_clears_and_saves() {
        let mut ed = editor();
        ed.set_active_color(Color::BLACK);
        ed.paint(0);
        ed.drain_events();

        ed.reset();
        assert!(ed.grid().is_blank());
        assert_eq!(saves(&ed.drain_events()), 1);
        let saved = ed.store().get(SAVE_KEY).unwrap().unwrap();
        assert!(decode_snapshot(&saved).unwrap().is_blank());
    }

    #[test]
    fn test_save_burst_shows_one_toast() {
        let mut ed = editor();
        ed.set_active_color(Color::BLACK);
        let start = Instant::now();
        for i in 0..10 {
            ed.paint(i);
        }
        ed.drain_events();

        ed.tick_at(start + Duration::from_secs(60));
        let toasts: Vec<EditorEvent> = ed
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, EditorEvent::Toast(_)))
            .collect();
        assert_eq!(
            toasts,
            vec![
                EditorEvent::Toast(ToastEvent::Shown),
                EditorEvent::Toast(ToastEvent::Hidden)
            ]
        );
    }

    #[test]
    fn test_failed_save_shows_no_toast() {
        let mut ed = Editor::new(FailingStore, Translations::default());
        ed.set_active_color(Color::BLACK);
        let start = Instant::now();

        assert_eq!(ed.paint(3), PaintOutcome::Painted);
        ed.tick_at(start + Duration::from_secs(1));
        ed.tick_at(start + Duration::from_secs(60));

        let events = ed.drain_events();
        assert_eq!(saves(&events), 0);
        assert!(!events.iter().any(|e| matches!(e, EditorEvent::Toast(_))));
        assert_eq!(ed.grid().get(3), Some(Color::BLACK));
    }

    #[test]
    fn test_preset_load_applies_and_reenables() {
        let mut ed = editor();
        let ticket = ed.begin_preset_load("heart");
        assert!(!ed.state().preset_controls_enabled);
        assert!(ed.state().busy);

        let mut grid = Grid::new();
        grid.set(0, Some(Color::BLACK)).unwrap();
        let outcome = ed.finish_preset_load::<String>(ticket, Ok(grid.clone()));

        assert_eq!(outcome, PresetLoadOutcome::Applied);
        assert_eq!(ed.grid(), &grid);
        assert!(ed.state().preset_controls_enabled);
        assert!(!ed.state().busy);
        assert_eq!(saves(&ed.drain_events()), 1);
    }

    #[test]
    fn test_preset_load_failure_alerts() {
        let mut ed = editor();
        let ticket = ed.begin_preset_load("missing");
        let outcome = ed.finish_preset_load(ticket, Err("HTTP 404"));

        assert_eq!(outcome, PresetLoadOutcome::Failed);
        assert!(ed.state().preset_controls_enabled);
        let events = ed.drain_events();
        assert!(events.contains(&EditorEvent::Alert("Error loading drawing.".to_string())));
        assert_eq!(saves(&events), 0);
    }

    #[test]
    fn test_stale_preset_does_not_clobber_paint() {
        let mut ed = editor();
        let ticket = ed.begin_preset_load("mario");

        ed.set_active_color(Color::BLACK);
        ed.paint(9);

        let outcome = ed.finish_preset_load::<String>(ticket, Ok(Grid::new()));
        assert_eq!(outcome, PresetLoadOutcome::Superseded);
        assert_eq!(ed.grid().get(9), Some(Color::BLACK));
    }

    #[test]
    fn test_overlapping_loads_last_wins() {
        let mut ed = editor();
        let first = ed.begin_preset_load("a");
        let second = ed.begin_preset_load("b");

        let mut b = Grid::new();
        b.set(1, Some(Color::BLACK)).unwrap();

        assert_eq!(
            ed.finish_preset_load::<String>(second, Ok(b.clone())),
            PresetLoadOutcome::Applied
        );
        // Still one load in flight
        assert!(!ed.state().preset_controls_enabled);
        assert_eq!(
            ed.finish_preset_load::<String>(first, Ok(Grid::new())),
            PresetLoadOutcome::Superseded
        );
        assert!(ed.state().preset_controls_enabled);
        assert_eq!(ed.grid(), &b);
    }

    #[test]
    fn test_dropped_pending_load_reenables_controls() {
        let mut ed = editor();
        {
            let pending = ed.start_preset_load("heart");
            assert_eq!(pending.name(), "heart");
        }
        assert!(ed.state().preset_controls_enabled);
        assert!(!ed.state().busy);
        assert!(ed.grid().is_blank());
        assert_eq!(saves(&ed.drain_events()), 0);

        let mut grid = Grid::new();
        grid.set(5, Some(Color::BLACK)).unwrap();
        let pending = ed.start_preset_load("heart");
        let outcome = pending.finish::<String>(Ok(grid.clone()));
        assert_eq!(outcome, PresetLoadOutcome::Applied);
        assert_eq!(ed.grid(), &grid);
        assert!(ed.state().preset_controls_enabled);
    }

    #[test]
    fn test_cancelled_load_keeps_other_load_busy() {
        let mut ed = editor();
        let first = ed.begin_preset_load("a");
        let second = ed.begin_preset_load("b");

        ed.cancel_preset_load(second);
        assert!(!ed.state().preset_controls_enabled);
        assert!(ed.state().busy);

        // Superseded by the cancelled second load
        assert_eq!(
            ed.finish_preset_load::<String>(first, Ok(Grid::new())),
            PresetLoadOutcome::Superseded
        );
        assert!(ed.state().preset_controls_enabled);
        assert!(!ed.state().busy);
    }

    #[test]
    fn test_random_preset_fallback_and_choice() {
        let mut ed = editor();
        let mut rng = rand::thread_rng();
        assert_eq!(ed.random_preset(&mut rng), "mario");

        ed.set_preset_names(vec!["heart".to_string(), "star".to_string()]);
        for _ in 0..20 {
            let pick = ed.random_preset(&mut rng);
            assert!(pick == "heart" || pick == "star");
        }
    }

    #[test]
    fn test_preset_options_use_labels() {
        let mut translations = Translations::default();
        translations
            .preset_name_labels
            .insert("mario".to_string(), "Mario Bros".to_string());
        let mut ed = Editor::new(MemoryStore::new(), translations);
        ed.set_preset_names(vec!["mario".to_string(), "heart".to_string()]);

        let labels: Vec<String> = ed.preset_options().into_iter().map(|o| o.label).collect();
        assert_eq!(labels, vec!["Mario Bros", "Heart"]);
    }
}
