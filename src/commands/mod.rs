pub mod config;
pub mod image;
pub mod key;
pub mod theme;
pub mod types;
pub mod widget;
