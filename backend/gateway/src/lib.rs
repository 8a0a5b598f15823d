//! CamGate Gateway HTTP API Server
//!
//! Hosts the camera view endpoint in front of the admission gate, plus a
//! health endpoint and demo seed data.

pub mod health_api;
pub mod html;
pub mod seed;
pub mod server;
pub mod view_api;

pub use server::{router, start_server, GatewayState};
pub use view_api::decide;
