// Terminal UI implementation using ratatui
pub mod app;
pub mod runner;
pub mod ui;

pub use app::{App, CommentForm, DetailView, InputMode, Surface};
pub use runner::run_tui;
