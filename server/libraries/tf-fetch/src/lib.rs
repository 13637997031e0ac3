//
// Copyright 2025 Tabs Data Inc.
//

pub mod cache;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod format;
