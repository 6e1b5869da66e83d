pub mod ai;
pub mod analysis;
pub mod api;
pub mod assistant;
pub mod cli;
pub mod context;
pub mod core;
pub mod openai;
pub mod session;
