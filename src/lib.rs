pub mod auth;
pub mod client;
pub mod error;
pub mod extractors;
pub mod flow;
pub mod handlers;
pub mod reconcile;
pub mod selection;
pub mod state;
pub mod stores;
pub mod types;
