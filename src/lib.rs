//! Clarity: monthly wellbeing check-ins, a private journal, and progress
//! across check-ins, all kept in a local key-value store.

pub mod cli;
pub mod config;
pub mod model;
pub mod progress;
pub mod score;
pub mod storage;
pub mod store;
pub mod wizard;
