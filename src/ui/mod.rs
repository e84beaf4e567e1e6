//! Terminal widgets

mod console;
pub mod dialog;
mod dialog_helpers;
pub mod listing;
pub mod preview;
pub mod spinner;
pub mod status;
pub mod theme;
pub mod viewer;

pub use console::ConsoleArea;
pub use dialog::{NoticeDialog, PromptDialog};
pub use listing::ListingWidget;
pub use preview::PreviewWidget;
pub use status::{FunctionKeyBar, HeaderBar, StatusBar};
pub use theme::Theme;
pub use viewer::TextViewer;
