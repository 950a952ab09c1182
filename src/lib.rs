//! Browser-side behaviour for the course catalog site.
//!
//! The library holds the page logic (validation, error slots, the contact form
//! state machine, toast notifications, drafts and preferences, counters and the
//! course catalog) with no direct DOM access, so it runs and tests natively.
//! The Yew binary in `main.rs` wires it to the page.

pub mod catalog;
pub mod config;
pub mod counter;
pub mod form;
pub mod notification;
pub mod page;
pub mod report;
pub mod storage;
pub mod validation;

/// Current value of a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text inputs, selects and text areas.
    Text(String),
    /// Checkbox-like fields.
    Checked(bool),
}

impl FieldValue {
    /// Text content; checkboxes read as empty.
    pub fn text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Checked(_) => "",
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(self, FieldValue::Checked(true))
    }

    /// Empty value of the same shape, used when a form resets.
    pub fn cleared(&self) -> Self {
        match self {
            FieldValue::Text(_) => FieldValue::Text(String::new()),
            FieldValue::Checked(_) => FieldValue::Checked(false),
        }
    }

    /// Raw string written to storage (`"true"`/`"false"` for checkboxes).
    pub fn to_stored(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Checked(b) => b.to_string(),
        }
    }

    /// Parse a stored string into a value shaped like `self`.
    pub fn with_stored(&self, raw: &str) -> Self {
        match self {
            FieldValue::Text(_) => FieldValue::Text(raw.to_string()),
            FieldValue::Checked(_) => FieldValue::Checked(raw == "true"),
        }
    }
}

/// Milliseconds since the Unix epoch.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleared_keeps_shape() {
        assert_eq!(FieldValue::Text("x".into()).cleared(), FieldValue::Text(String::new()));
        assert_eq!(FieldValue::Checked(true).cleared(), FieldValue::Checked(false));
    }

    #[test]
    fn stored_checkbox_strings() {
        let tmpl = FieldValue::Checked(false);
        assert_eq!(FieldValue::Checked(true).to_stored(), "true");
        assert_eq!(tmpl.with_stored("true"), FieldValue::Checked(true));
        assert_eq!(tmpl.with_stored("yes"), FieldValue::Checked(false));
    }
}
