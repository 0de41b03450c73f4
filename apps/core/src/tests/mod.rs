//! Test Module
//!
//! Suite-level tests for the research chat core.
//!
//! ## Test Categories
//! - `brain_tests`: query analysis, sectioning, extraction, charts, follow-ups
//! - `client_tests`: HTTP backend client against a wiremock server
//! - `config_tests`: environment-driven configuration
//! - `report_source_tests`: loading reports from disk
//! - `integration_tests`: research, analyze and follow-up flows

pub mod brain_tests;
pub mod config_tests;
