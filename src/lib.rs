//! Chatrelay - minimal HTTP relay for LLM chat completions
//!
//! Accepts a chat message over HTTP, forwards it to an upstream
//! OpenAI-compatible completion API, and returns the model's reply along
//! with wall-clock latency metadata.

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod telemetry;
pub mod upstream;
