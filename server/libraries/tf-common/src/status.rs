//
// Copyright 2025 Tabs Data Inc.
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    NoAction,
    GeneralError,
    TabfetchError,
    ConfigError,
}

impl ExitStatus {
    pub fn code(&self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::NoAction => 206,
            ExitStatus::GeneralError => 201,
            ExitStatus::TabfetchError => 202,
            ExitStatus::ConfigError => 203,
        }
    }
}
