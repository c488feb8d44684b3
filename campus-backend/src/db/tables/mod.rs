//! Per-collection database operations.
//!
//! Each module contains an `impl Database` block for one table.

mod academics;
mod alumni;
mod auth_sessions;
mod careers;
mod news;
mod ordering;
mod sections;
mod site_content;
mod submissions;
