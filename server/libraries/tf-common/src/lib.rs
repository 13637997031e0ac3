//
// Copyright 2025 Tabs Data Inc.
//

pub mod cli;
pub mod config;
pub mod env;
pub mod logging;
pub mod status;
