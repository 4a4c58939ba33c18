#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod data_url;
pub mod element;
pub mod error;
pub mod export;
pub mod file_handler;
pub mod gesture;
pub mod image_source;
pub mod panels;
pub mod store;
pub mod texture_manager;
pub mod widgets;

pub use app::MoodboardApp;
pub use command::BoardCommand;
pub use config::BoardConfig;
pub use element::{Element, ElementContent, ElementId, ElementKind, NewElement, Position, Size};
pub use gesture::{GestureController, GestureState};
pub use store::ElementStore;
