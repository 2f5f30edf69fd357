//! Gemini API implementation
//!
//! A small REST client for Google's Gemini Developer API, limited to
//! single-shot text generation.

mod client;
mod http;
mod models;
pub mod types;

pub use client::Client;
pub use models::ModelsService;
