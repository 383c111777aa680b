//! TUI views
//!
//! Each view draws one part of a [`curator_core::ViewModel`]; none of them
//! hold state of their own.

mod article;
mod detail;
mod menu;
mod tabs;

pub use article::ArticleHeader;
pub use detail::DetailView;
pub use menu::MenuView;
pub use tabs::TabStrip;
