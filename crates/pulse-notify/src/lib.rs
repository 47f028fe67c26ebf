//! Status reporting and webhook notifications.

mod logging;
mod reporter;
mod webhook;

pub use logging::setup_logging;
pub use reporter::{price_bar, StatusReporter};
pub use webhook::WebhookNotifier;
