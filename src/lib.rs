//! Black-box security test harness for authentication gateways
//!
//! Probes an external authentication gateway for injection, authentication
//! bypass, token forgery, and abuse-resistance weaknesses. Every scenario
//! sends a crafted request and asserts the response falls within a
//! security-safe range; the gateway itself is never implemented here.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod forge;
pub mod http;
pub mod models;
pub mod output;
pub mod runner;
pub mod scenarios;
