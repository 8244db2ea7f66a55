pub mod engine;
pub mod import;
pub mod output;
pub mod session;
