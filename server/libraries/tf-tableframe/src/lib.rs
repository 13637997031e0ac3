//
// Copyright 2025 Tabs Data Inc.
//

pub mod catalog;
pub mod dataset;
pub mod decode;
pub mod error;
pub mod frame;
