// Calswitch Library
// Client-side state machine and group coordination for calendar sync toggles

pub mod availability;
pub mod cache;
pub mod error;
pub mod group;
pub mod http_config;
pub mod models;
pub mod notify;
pub mod switch;
pub mod ui_state;
pub mod utils;

// Re-export commonly used types
pub use availability::{AvailabilityClient, SelectedCalendarPayload};
pub use cache::{CacheRegion, LogCache, QueryCache};
pub use error::{AppError, AppResult};
pub use group::{GroupBus, GroupSubscription, GROUP_TOGGLE_EVENT};
pub use models::{GroupToggleSignal, SwitchProps, ToggleState};
pub use notify::{LogNotifier, Notifier, Severity};
pub use switch::{CalendarSwitch, SwitchContext};
pub use ui_state::SwitchSnapshot;
