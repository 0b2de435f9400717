//! Proxy gateway: upstream pass-through plus normalized disease routes.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
