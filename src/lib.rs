pub mod app;
pub mod audio;
pub mod cli;
pub mod engine;
pub mod library;
pub mod scene;
pub mod shell;
pub mod ui;
