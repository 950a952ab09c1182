//! Inline per-field error display.
//!
//! A reporter is a pure projection of "message or no message" onto a field's
//! error slot and input indicator. Showing or clearing twice with the same
//! arguments has no effect beyond the first call.

use crate::config::ERROR_SLOT_SUFFIX;
use std::collections::HashMap;

/// Visual state of a field's input border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldIndicator {
    #[default]
    Neutral,
    Errored,
}

impl FieldIndicator {
    /// Class applied to the input element for this state.
    pub fn class(&self) -> &'static str {
        match self {
            FieldIndicator::Neutral => "field-neutral",
            FieldIndicator::Errored => "field-error",
        }
    }
}

/// What a single field's error slot currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrorView {
    pub message: String,
    pub indicator: FieldIndicator,
}

impl FieldErrorView {
    pub fn is_visible(&self) -> bool {
        !self.message.is_empty()
    }
}

/// Sink for per-field validation messages.
pub trait FieldErrorReporter {
    fn show_error(&mut self, field_id: &str, message: &str);
    fn clear_error(&mut self, field_id: &str);
}

/// Id of the element that holds the error text for `field_id`.
pub fn error_slot_id(field_id: &str) -> String {
    format!("{}{}", field_id, ERROR_SLOT_SUFFIX)
}

/// In-memory error slots, rendered by the form components.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorSlots {
    slots: HashMap<String, FieldErrorView>,
}

impl ErrorSlots {
    /// View for `field_id`; fields never reported on are neutral.
    pub fn view(&self, field_id: &str) -> FieldErrorView {
        self.slots.get(field_id).cloned().unwrap_or_default()
    }

    pub fn message(&self, field_id: &str) -> &str {
        self.slots.get(field_id).map_or("", |v| v.message.as_str())
    }

    pub fn indicator(&self, field_id: &str) -> FieldIndicator {
        self.slots.get(field_id).map_or(FieldIndicator::Neutral, |v| v.indicator)
    }

    pub fn has_errors(&self) -> bool {
        self.slots.values().any(FieldErrorView::is_visible)
    }
}

impl FieldErrorReporter for ErrorSlots {
    fn show_error(&mut self, field_id: &str, message: &str) {
        let view = self.slots.entry(field_id.to_string()).or_default();
        view.message = message.to_string();
        view.indicator = FieldIndicator::Errored;
    }

    fn clear_error(&mut self, field_id: &str) {
        // Fields that never showed an error stay absent.
        if let Some(view) = self.slots.get_mut(field_id) {
            view.message.clear();
            view.indicator = FieldIndicator::Neutral;
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_then_clear_returns_to_neutral() {
        let mut slots = ErrorSlots::default();
        slots.show_error("name", "Name is required");
        assert_eq!(slots.message("name"), "Name is required");
        assert_eq!(slots.indicator("name"), FieldIndicator::Errored);

        slots.clear_error("name");
        assert_eq!(slots.message("name"), "");
        assert_eq!(slots.view("name"), FieldErrorView::default());
        assert!(!slots.has_errors());
    }

    #[test]
    fn repeated_calls_are_idempotent() {
        let mut once = ErrorSlots::default();
        once.show_error("email", "Email is required");

        let mut twice = ErrorSlots::default();
        twice.show_error("email", "Email is required");
        twice.show_error("email", "Email is required");
        assert_eq!(once, twice);

        twice.clear_error("email");
        let snapshot = twice.clone();
        twice.clear_error("email");
        assert_eq!(snapshot, twice);
    }

    #[test]
    fn clearing_unknown_field_is_a_no_op() {
        let mut slots = ErrorSlots::default();
        slots.clear_error("phone");
        assert_eq!(slots, ErrorSlots::default());
    }

    #[test]
    fn slot_id_uses_fixed_suffix() {
        assert_eq!(error_slot_id("message"), "messageError");
    }
}
