//! Application-level configuration constants.

// Timings
pub const NOTIFICATION_DURATION_MS: u32 = 5_000;
pub const DISMISS_ANIMATION_MS: u32 = 300;
pub const SUBMIT_BUSY_MS: u32 = 2_000;
pub const COUNTER_STEPS: u32 = 50;
pub const COUNTER_TICK_MS: u32 = 50;

// Visibility observers
pub const COUNTER_VISIBILITY_THRESHOLD: f64 = 0.5;
pub const COUNTER_ROOT_MARGIN: &str = "0px 0px -50px 0px";

// Persisted keys
pub const DARK_MODE_KEY: &str = "darkMode";
pub const DRAFT_KEY_PREFIX: &str = "form_";

// Markup contract
pub const DARK_MODE_CLASS: &str = "dark-mode";
pub const ERROR_SLOT_SUFFIX: &str = "Error";
pub const CONTACT_FORM_ID: &str = "contactForm";
pub const NEWSLETTER_FORM_ID: &str = "newsletterForm";

// Button labels
pub const SUBMIT_BUSY_LABEL: &str = "Sending...";

// User-facing messages
pub const CONTACT_SUCCESS_MESSAGE: &str = "Thank you for your message! We'll get back to you soon.";
pub const NEWSLETTER_SUCCESS_MESSAGE: &str = "Thank you for subscribing to our newsletter!";
pub const NEWSLETTER_INVALID_MESSAGE: &str = "Please enter a valid email address.";
