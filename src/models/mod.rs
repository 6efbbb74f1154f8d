// Declare modules
pub mod switch;
pub mod toggle;

// Re-export all public types so imports like `use calswitch::SwitchProps`
// keep working for external callers.
pub use switch::SwitchProps;
pub use toggle::{GroupToggleSignal, ToggleState};
