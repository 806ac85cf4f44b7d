// src/lib.rs

pub mod config;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod gemini;
pub mod output;
pub mod runner;
