#![forbid(unsafe_code)]

pub mod config;
pub mod constants;
pub mod coordinator;
pub mod gui;
pub mod ipc;
pub mod lifecycle;
pub mod notify;
pub mod types;
pub mod window;
