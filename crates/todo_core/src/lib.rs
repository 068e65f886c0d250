pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod id;
pub mod input;
pub mod model;
pub mod render;
pub mod route;
pub mod storage;
pub mod task_store;
pub mod templates;
pub mod view;
