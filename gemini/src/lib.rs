mod client;
mod gemini_url;
pub mod models;

pub(crate) use gemini_url::*;

pub use client::*;
