//! HTTP adapter for the gateway under test
//!
//! Provides the outbound client and the request/response audit log.

pub mod audit;
mod client;

pub use client::{GatewayClient, GatewayResponse, HttpError, RequestOutcome};
