//! Exchange-List Diet Engine (exdiet) Library
//!
//! Core functionality for exchange-list diet planning and nutrition tracking.

pub mod build_info;
pub mod catalog;
pub mod db;
pub mod models;
pub mod nutrition;
pub mod session;
