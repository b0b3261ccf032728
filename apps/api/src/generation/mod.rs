//! Prompt Template Engine — the three AI generation operations.
//!
//! Each operation fills a fixed prompt template, submits it through the
//! LLM client, and validates the structured payload that comes back.

pub mod engine;
pub mod handlers;
pub mod prompts;
