//! Contact and newsletter form behaviour.
//!
//! The contact form runs a small state machine:
//! `Idle -> Validating -> {Invalid, SubmittedOk}`, returning to `Idle` on the
//! next interaction. Submission never leaves the page; a valid submit shows a
//! confirmation, resets the fields and drops the saved drafts.

use crate::config::{
    CONTACT_FORM_ID, CONTACT_SUCCESS_MESSAGE, NEWSLETTER_INVALID_MESSAGE, NEWSLETTER_SUCCESS_MESSAGE,
};
use crate::notification::{NotificationKind, Notifier};
use crate::report::FieldErrorReporter;
use crate::storage::{DraftStore, KeyValueStore};
use crate::validation::{is_valid_email, validate, validate_all, ValidationResult};
use crate::FieldValue;
use log::{debug, info, warn};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Validating,
    Invalid,
    SubmittedOk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one field failed; nothing was reset.
    Invalid,
    /// Every field passed; the form was reset and its drafts purged.
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub id: &'static str,
    pub value: FieldValue,
}

impl Field {
    pub fn text(id: &'static str) -> Self {
        Self {
            id,
            value: FieldValue::Text(String::new()),
        }
    }

    pub fn checkbox(id: &'static str) -> Self {
        Self {
            id,
            value: FieldValue::Checked(false),
        }
    }
}

/// Drives validation, error display and drafts for one form.
pub struct FormController {
    fields: Vec<Field>,
    state: FormState,
    drafts: DraftStore,
    success_message: &'static str,
}

impl FormController {
    pub fn new(
        form_id: &str,
        fields: Vec<Field>,
        store: Rc<dyn KeyValueStore>,
        success_message: &'static str,
    ) -> Self {
        Self {
            fields,
            state: FormState::Idle,
            drafts: DraftStore::new(form_id, store),
            success_message,
        }
    }

    /// The site's contact form: name, email, phone, subject, message, terms.
    pub fn contact(store: Rc<dyn KeyValueStore>) -> Self {
        let fields = vec![
            Field::text("name"),
            Field::text("email"),
            Field::text("phone"),
            Field::text("subject"),
            Field::text("message"),
            Field::checkbox("terms"),
        ];
        Self::new(CONTACT_FORM_ID, fields, store, CONTACT_SUCCESS_MESSAGE)
    }

    pub fn form_id(&self) -> &str {
        self.drafts.form_id()
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn value(&self, field_id: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.id == field_id).map(|f| &f.value)
    }

    /// Repopulate fields from saved drafts. Returns how many were restored.
    pub fn restore(&mut self) -> usize {
        let mut restored = 0;
        for field in &mut self.fields {
            match self.drafts.load(field.id, &field.value) {
                Ok(Some(value)) => {
                    field.value = value;
                    restored += 1;
                }
                Ok(None) => {}
                Err(e) => warn!("Could not restore draft for '{}': {}", field.id, e),
            }
        }
        if restored > 0 {
            info!("restored {} saved field(s) for '{}'", restored, self.form_id());
        }
        restored
    }

    /// A field changed: store it, hide its error without re-validating, and
    /// save the draft.
    pub fn input<R>(&mut self, field_id: &str, value: FieldValue, reporter: &mut R)
    where
        R: FieldErrorReporter + ?Sized,
    {
        let Some(field) = self.fields.iter_mut().find(|f| f.id == field_id) else {
            debug!("input for unknown field '{}' ignored", field_id);
            return;
        };
        field.value = value;
        self.state = FormState::Idle;
        reporter.clear_error(field_id);
        if let Err(e) = self.drafts.save(field_id, &field.value) {
            warn!("Could not save draft for '{}': {}", field_id, e);
        }
    }

    /// A field lost focus: re-validate that field alone.
    pub fn blur<R>(&mut self, field_id: &str, reporter: &mut R) -> ValidationResult
    where
        R: FieldErrorReporter + ?Sized,
    {
        let Some(field) = self.fields.iter().find(|f| f.id == field_id) else {
            return ValidationResult::Valid;
        };
        self.state = FormState::Idle;
        let result = validate(field.id, &field.value);
        match result {
            ValidationResult::Valid => reporter.clear_error(field_id),
            ValidationResult::Invalid(msg) => reporter.show_error(field_id, msg),
        }
        result
    }

    /// Validate the whole form and, if it passes, confirm and reset it.
    pub fn submit<R, N>(&mut self, reporter: &mut R, notifier: &mut N) -> SubmitOutcome
    where
        R: FieldErrorReporter + ?Sized,
        N: Notifier + ?Sized,
    {
        self.state = FormState::Validating;
        let valid = validate_all(self.fields.iter().map(|f| (f.id, &f.value)), reporter);
        if !valid {
            self.state = FormState::Invalid;
            debug!("'{}' submission rejected", self.form_id());
            return SubmitOutcome::Invalid;
        }

        notifier.notify(self.success_message, NotificationKind::Success);
        for field in &mut self.fields {
            field.value = field.value.cleared();
        }
        if let Err(e) = self.drafts.purge(self.fields.iter().map(|f| f.id)) {
            warn!("Could not clear drafts for '{}': {}", self.form_id(), e);
        }
        self.state = FormState::SubmittedOk;
        info!("'{}' submitted", self.form_id());
        SubmitOutcome::Submitted
    }
}

/// Newsletter sign-up: a single email field, answered with a notification.
///
/// Returns `true` when the address was accepted and the input should reset.
pub fn submit_newsletter<N>(email: &str, notifier: &mut N) -> bool
where
    N: Notifier + ?Sized,
{
    if is_valid_email(email) {
        notifier.notify(NEWSLETTER_SUCCESS_MESSAGE, NotificationKind::Success);
        true
    } else {
        notifier.notify(NEWSLETTER_INVALID_MESSAGE, NotificationKind::Error);
        false
    }
}
