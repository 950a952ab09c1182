//! Named visual states for the page chrome.
//!
//! Each element that changes appearance has a small finite set of states; the
//! components map a state to class names instead of writing inline styles.

use crate::config::SUBMIT_BUSY_LABEL;

/// Mobile navigation menu, toggled by the hamburger button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavMenu {
    #[default]
    Closed,
    Open,
}

impl NavMenu {
    pub fn toggled(self) -> Self {
        match self {
            NavMenu::Closed => NavMenu::Open,
            NavMenu::Open => NavMenu::Closed,
        }
    }

    /// Class for both the hamburger and the menu list.
    pub fn class(self, base: &str) -> String {
        match self {
            NavMenu::Closed => base.to_string(),
            NavMenu::Open => format!("{} active", base),
        }
    }
}

/// Submit control during the cosmetic post-click debounce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitButtonState {
    #[default]
    Ready,
    Busy,
}

impl SubmitButtonState {
    pub fn label<'a>(&self, idle_label: &'a str) -> &'a str {
        match self {
            SubmitButtonState::Ready => idle_label,
            SubmitButtonState::Busy => SUBMIT_BUSY_LABEL,
        }
    }

    pub fn disabled(&self) -> bool {
        matches!(self, SubmitButtonState::Busy)
    }
}

/// Image whose real source is assigned once it scrolls into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LazyImageState {
    #[default]
    Pending,
    Loaded,
}

impl LazyImageState {
    pub fn class(self) -> &'static str {
        match self {
            LazyImageState::Pending => "lazy",
            LazyImageState::Loaded => "",
        }
    }

    /// `src` to render: nothing until the image has been seen.
    pub fn src<'a>(self, data_src: &'a str) -> Option<&'a str> {
        match self {
            LazyImageState::Pending => None,
            LazyImageState::Loaded => Some(data_src),
        }
    }
}
