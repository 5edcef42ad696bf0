pub mod config;
pub mod logging;

pub mod date;
pub mod dom;
pub mod fetch;
pub mod headers;
pub mod manifest;
pub mod naming;
pub mod orchestrator;
pub mod save;
pub mod scanner;
