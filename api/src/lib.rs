//! HTTP surface of the RT Management session-token authority

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
