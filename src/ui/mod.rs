//! UI rendering module for newsdesk
//!
//! Terminal rendering uses ratatui; `plain` renders the same page as text.

pub mod help_overlay;
pub mod news_page;
pub mod plain;

pub use help_overlay::render as render_help_overlay;
pub use news_page::render as render_news_page;
pub use plain::render_plain;
