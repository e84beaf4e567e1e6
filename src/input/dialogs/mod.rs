//! Dialog mode handlers

mod notice;
mod prompt;

pub use notice::handle_notice_mode;
pub use prompt::{handle_prompt_mode, paste_into_prompt};
