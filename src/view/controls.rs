//! Interactive control state and the guards that always restore it.
//!
//! A [`BusyGuard`] disables a button for the length of an async operation
//! and puts its label back on drop, whatever path the operation took.
//! A [`LoadingIndicator`] is removed from the overlay list the same way.

use std::sync::{Arc, Mutex, MutexGuard};

pub const SUBMIT_LABEL: &str = "Predict Risk";
pub const SEND_EMAIL_LABEL: &str = "Send Email";

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonState {
    pub label: String,
    pub enabled: bool,
}

impl ButtonState {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Submit,
    SendEmail,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub id: u64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    pub submit: ButtonState,
    pub send_email: ButtonState,
    pub overlays: Vec<Overlay>,
    next_overlay: u64,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            submit: ButtonState::new(SUBMIT_LABEL),
            send_email: ButtonState::new(SEND_EMAIL_LABEL),
            overlays: Vec::new(),
            next_overlay: 0,
        }
    }
}

impl ControlState {
    fn button_mut(&mut self, button: Button) -> &mut ButtonState {
        match button {
            Button::Submit => &mut self.submit,
            Button::SendEmail => &mut self.send_email,
        }
    }

    pub fn button(&self, button: Button) -> &ButtonState {
        match button {
            Button::Submit => &self.submit,
            Button::SendEmail => &self.send_email,
        }
    }
}

#[derive(Clone, Default)]
pub struct Controls(Arc<Mutex<ControlState>>);

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ControlState> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> ControlState {
        self.lock().clone()
    }

    /// Disables `button` and shows `busy_label`. `None` when the button is
    /// already disabled, i.e. an earlier operation is still in flight.
    pub fn try_busy(&self, button: Button, busy_label: &str) -> Option<BusyGuard> {
        let mut state = self.lock();
        let slot = state.button_mut(button);
        if !slot.enabled {
            return None;
        }
        let original_label = std::mem::replace(&mut slot.label, busy_label.to_string());
        slot.enabled = false;
        Some(BusyGuard {
            controls: self.clone(),
            button,
            original_label,
        })
    }

    pub fn show_loading(&self, text: &str) -> LoadingIndicator {
        let mut state = self.lock();
        let id = state.next_overlay;
        state.next_overlay += 1;
        state.overlays.push(Overlay {
            id,
            text: text.to_string(),
        });
        LoadingIndicator {
            controls: self.clone(),
            id,
        }
    }
}

pub struct BusyGuard {
    controls: Controls,
    button: Button,
    original_label: String,
}

impl BusyGuard {
    /// Progress text while still disabled.
    pub fn relabel(&self, label: &str) {
        self.controls.lock().button_mut(self.button).label = label.to_string();
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let mut state = self.controls.lock();
        let slot = state.button_mut(self.button);
        slot.label = std::mem::take(&mut self.original_label);
        slot.enabled = true;
    }
}

pub struct LoadingIndicator {
    controls: Controls,
    id: u64,
}

impl Drop for LoadingIndicator {
    fn drop(&mut self) {
        self.controls.lock().overlays.retain(|o| o.id != self.id);
    }
}
