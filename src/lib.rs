//! Pulso - hourly social engagement pipeline for sports clubs
//!
//! This library collects per-(club, source) engagement metrics into hourly
//! buckets, normalizes them per source, and rolls them up into daily
//! summaries that a read-only reporting API serves.
//!
//! # Features
//! - **server**: reporting API mode (default)
//! - **cli**: pipeline stage commands (default)
//! - **full**: All features enabled
//!
//! # Architecture
//! - `pipeline`: bucket clock, collector, normalizer and daily rollups
//! - `storage`: store contract and the SeaORM backend
//! - `api`: HTTP reporting facade
//! - `interfaces`: command-line stage runners
//! - `config`: Configuration management
//! - `runtime`: execution modes
//! - `system`: logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod pipeline;
pub mod runtime;
pub mod storage;
pub mod system;
