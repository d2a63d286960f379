pub mod app;
pub mod args;
pub mod batch;
pub mod editor;
pub mod logging;
pub mod path;
pub mod rename;
pub mod terminal;
