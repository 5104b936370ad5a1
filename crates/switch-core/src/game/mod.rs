pub mod engine;
pub mod observer;
pub mod policy;
pub mod snapshot;
pub mod state;
