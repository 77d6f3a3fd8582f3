use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crate::Config;
use crate::config::ParsedKeyBindings;
use crate::host::FieldFile;
use crate::tui::error::TuiError;
use crate::tui::layout::ChipPlacement;
use crate::widget::{EventRouter, InputEvent, Outcome, RenderSurface, TagWidget};

/// Which part of the widget receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Entry,
    Chips { selected: usize },
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

pub struct App {
    pub config: Config,
    pub bindings: ParsedKeyBindings,
    pub widget: TagWidget<FieldFile>,
    pub router: EventRouter,
    pub surface: RenderSurface,
    pub focus: Focus,
    pub status: StatusState,
    pub field_name: String,
    /// First chip row shown in the container
    pub chip_row_offset: u16,
    /// Chips drawn by the last render, used for mouse hit-testing
    pub chip_hitboxes: Vec<ChipPlacement>,
    output_changed: Rc<Cell<bool>>,
}

impl App {
    pub fn new(config: Config, field: FieldFile) -> Result<Self, TuiError> {
        let bindings = config
            .key_bindings
            .parse()
            .map_err(|e| TuiError::KeyBindingError(e.to_string()))?;

        let field_name = field.display_name();
        let output_changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&output_changed);
        let mut widget = TagWidget::new(field, Box::new(move || flag.set(true)), bindings.commit)?;

        let mut router = EventRouter::new();
        let mut surface = RenderSurface::default();
        surface.apply(widget.mount(&mut router));

        Ok(Self {
            config,
            bindings,
            widget,
            router,
            surface,
            focus: Focus::Entry,
            status: StatusState::default(),
            field_name,
            chip_row_offset: 0,
            chip_hitboxes: Vec::new(),
            output_changed,
        })
    }

    /// Push the value into the field file if the widget reported a change.
    /// The change stays pending until a write succeeds.
    pub fn sync_output(&mut self) -> Result<bool, TuiError> {
        if !self.output_changed.get() {
            return Ok(false);
        }
        self.widget.update_view()?;
        self.output_changed.set(false);
        tracing::info!(value = %self.widget.get_outputs(), "field updated");
        Ok(true)
    }

    /// Sync from the event loop: a failed write becomes a status message and
    /// is retried on the next pass
    pub fn save_pending(&mut self) {
        if let Err(e) = self.sync_output() {
            tracing::warn!(error = %e, "field write failed");
            self.set_status_message(format!("Failed to save tags: {}", e));
        }
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.output_changed.get()
    }

    /// Final sync and teardown
    pub fn shutdown(&mut self) -> Result<(), TuiError> {
        self.sync_output()?;
        self.widget.dispose(&mut self.router);
        Ok(())
    }

    fn dispatch(&mut self, event: InputEvent) -> Outcome {
        let outcome = self.router.dispatch(event, &mut self.widget);
        self.surface.apply_all(outcome.ops().iter().cloned());
        outcome
    }

    /// Handle a key press. Returns true when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<bool, TuiError> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        if self.bindings.quit.matches(&key) {
            if let Focus::Chips { .. } = self.focus {
                self.focus = Focus::Entry;
                return Ok(false);
            }
            return Ok(true);
        }

        if self.bindings.toggle_focus.matches(&key) {
            self.toggle_focus();
            return Ok(false);
        }

        match self.focus {
            Focus::Entry => self.handle_entry_key(key),
            Focus::Chips { selected } => self.handle_chip_key(key, selected),
        }
        Ok(false)
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Entry if self.surface.chips.is_empty() => {
                self.set_status_message("No tags to select".to_string());
                Focus::Entry
            }
            Focus::Entry => Focus::Chips {
                selected: self.surface.chips.len() - 1,
            },
            Focus::Chips { .. } => Focus::Entry,
        };
    }

    fn handle_entry_key(&mut self, key: KeyEvent) {
        if self.bindings.paste.matches(&key) {
            self.paste_from_clipboard();
            return;
        }

        let is_commit = self.bindings.commit.matches(&key);
        match self.dispatch(InputEvent::KeyPress(key)) {
            Outcome::Added { id, .. } => {
                if let Some(tag) = self.widget.store().get(id) {
                    let message = format!("Added '{}'", tag.text);
                    self.set_status_message(message);
                }
            }
            _ if is_commit => {}
            _ => {
                self.widget.entry_mut().apply_key(key);
            }
        }
    }

    fn handle_chip_key(&mut self, key: KeyEvent, selected: usize) {
        let count = self.surface.chips.len();
        if count == 0 {
            self.focus = Focus::Entry;
            return;
        }
        let selected = selected.min(count - 1);

        if self.bindings.chip_left.matches(&key) {
            self.focus = Focus::Chips {
                selected: selected.saturating_sub(1),
            };
        } else if self.bindings.chip_right.matches(&key) {
            self.focus = Focus::Chips {
                selected: (selected + 1).min(count - 1),
            };
        } else if self.bindings.remove_chip.matches(&key)
            || self.bindings.commit.matches(&key)
            || key.code == KeyCode::Backspace
        {
            self.close_chip_at(selected);
        }
    }

    /// Activate the close control of the chip at `index` on the surface
    pub fn close_chip_at(&mut self, index: usize) {
        let Some(id) = self.surface.chips.get(index).map(|chip| chip.id) else {
            return;
        };
        if let Outcome::Removed { tag, .. } = self.dispatch(InputEvent::CloseActivated(id)) {
            self.set_status_message(format!("Removed '{}'", tag.text));
        }

        let count = self.surface.chips.len();
        self.focus = match self.focus {
            Focus::Chips { .. } if count == 0 => Focus::Entry,
            Focus::Chips { selected } => Focus::Chips {
                selected: selected.min(count - 1),
            },
            Focus::Entry => Focus::Entry,
        };
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let position = Position::new(mouse.column, mouse.row);
        let Some(hit) = self
            .chip_hitboxes
            .iter()
            .find(|p| p.area.contains(position))
            .cloned()
        else {
            return;
        };

        if hit.close_area.contains(position) {
            self.focus = match self.focus {
                Focus::Chips { .. } => Focus::Chips { selected: hit.index },
                Focus::Entry => Focus::Entry,
            };
            self.close_chip_at(hit.index);
        } else {
            self.focus = Focus::Chips { selected: hit.index };
        }
    }

    fn paste_from_clipboard(&mut self) {
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text()) {
            Ok(text) => self.widget.entry_mut().insert_str(&text),
            Err(e) => {
                tracing::warn!(error = %e, "clipboard paste failed");
                self.set_status_message("Clipboard unavailable".to_string());
            }
        }
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status.message = Some(message);
        self.status.message_time = Some(Instant::now());
    }

    pub fn clear_status_message(&mut self) {
        self.status.message = None;
        self.status.message_time = None;
    }

    /// Check if status message should be auto-cleared (after 3 seconds)
    pub fn check_status_message_timeout(&mut self) {
        const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 3;
        if let Some(time) = self.status.message_time {
            if time.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.clear_status_message();
            }
        }
    }
}
