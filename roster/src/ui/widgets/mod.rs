//! TUI widgets for the roster builder

pub mod card;
pub mod history;
pub mod input;
pub mod status_bar;

pub use card::{CardWidget, EmptySlot};
pub use history::HistoryWidget;
pub use input::InputWidget;
pub use status_bar::{HotkeyBarWidget, StatusBarWidget};
