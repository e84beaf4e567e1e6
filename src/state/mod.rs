pub mod app;
pub mod console;
pub mod devices;
pub mod events;
pub mod listing;
pub mod mode;
pub mod navigator;
pub mod pane;
pub mod preview;
pub mod transfers;
pub mod ui_state;

pub use console::Console;
pub use ui_state::UiState;
