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

//! Low-power timer (LPTMR) board support driver
//!
//! The main entry point is [BspTimer]. It owns the single LPTMR unit of the
//! board, configures it through the vendor driver wrapped by the [hal]
//! traits, and dispatches one user callback whenever the compare flag fires.
//!
//! The driver is meant to live in a `static`, with the interrupt vector
//! calling a small trampoline that forwards to [BspTimer::on_interrupt]:
//!
//! ```ignore
//! use bsp_timer::{BspTimer, DAC_PORT};
//!
//! static TIMER: BspTimer<Lptmr0, Scg, Nvic> =
//!     BspTimer::new(Lptmr0, Scg, Nvic, lptmr0_isr);
//!
//! fn lptmr0_isr() {
//!     TIMER.on_interrupt();
//! }
//!
//! fn on_timeout() {
//!     // feed the DAC
//! }
//!
//! TIMER.init();
//! TIMER.stop(DAC_PORT);
//! TIMER.period_set(DAC_PORT, 16_000)?;
//! TIMER.cb_set(DAC_PORT, Some(on_timeout))?;
//! TIMER.start(DAC_PORT);
//! ```
#![no_std]

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "defmt")]
pub(crate) use defmt::{debug, error, info};
#[cfg(not(feature = "defmt"))]
pub(crate) use log::{debug, error, info};

pub mod config;
pub mod errors;
pub mod hal;
#[cfg(feature = "std")]
pub mod mock;
mod timer;

pub use config::{LptmrConfig, TIMER_CONFIG};
pub use errors::{HalError, TimerError};
pub use timer::{ticks_for_period, BspTimer, TimeoutCallback, DAC_PORT, LPTMR_INSTANCE};
