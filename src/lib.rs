//! querykit - a backend-agnostic filter, sort and paginate contract
//!
//! - `query`: the `QuerySpec` contract, results and validation
//! - `engine`: deterministic in-memory execution
//! - `datasource`: the backend contract, in-memory and push-down backends
//! - `service`: collection services bound to one data source

pub mod cli;
pub mod config;
pub mod datasource;
pub mod engine;
pub mod mock;
pub mod observability;
pub mod query;
pub mod service;
