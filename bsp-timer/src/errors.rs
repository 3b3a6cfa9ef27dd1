// Copyright 2023 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Status reported by the vendor clock and LPTMR drivers
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// Generic failure
    Failed,
    /// Peripheral is busy with a previous request
    Busy,
    /// Peripheral did not answer in time
    Timeout,
    /// Operation or clock not supported by this part
    Unsupported,
}

/// Timer driver errors
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// Operation attempted before a successful init, or after deinit
    NotInitialized,
    /// Zero period or missing callback
    InvalidArgument,
    /// Port is not served by this driver
    UnknownPort(u32),
    /// Counter is running, compare value can't be changed
    Busy,
    /// Underlying vendor driver failure
    Hal(HalError),
}

impl From<HalError> for TimerError {
    fn from(v: HalError) -> Self {
        Self::Hal(v)
    }
}

