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

//! Host implementation of the [crate::hal] traits
//!
//! [MockHw] holds the simulated registers and a journal of every driver
//! call. The handles it hands out borrow it, and it is const-constructible,
//! so a `static` driver can be built on top of a `static` mock:
//!
//! ```
//! # use bsp_timer::mock::{MockClock, MockHw, MockIntc, MockLptmr};
//! # use bsp_timer::BspTimer;
//! static HW: MockHw = MockHw::new();
//! static TIMER: BspTimer<MockLptmr, MockClock, MockIntc> =
//!     BspTimer::new(HW.lptmr(), HW.clock(), HW.intc(), isr);
//! fn isr() {
//!     TIMER.on_interrupt();
//! }
//!
//! TIMER.init();
//! assert!(TIMER.is_initialized());
//! ```

use std::sync::{Mutex, MutexGuard};
use std::vec::Vec;

use crate::config::LptmrConfig;
use crate::errors::HalError;
use crate::hal::{Clock, ClockName, InterruptController, Irq, IrqHandler, Lptmr};

/// Clock frequency reported until [MockHw::set_clock] is called
pub const DEFAULT_CLOCK_HZ: u32 = 8_000_000;

/// One recorded driver call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Init {
        config: LptmrConfig,
        start_counter: bool,
    },
    Deinit,
    StartCounter,
    StopCounter,
    IsRunning,
    SetCompareValue(u16),
    CompareFlag,
    ClearCompareFlag,
    InstallHandler(Irq),
    EnableIrq(Irq),
    DisableIrq(Irq),
    Frequency(ClockName),
}

struct State {
    calls: Vec<Call>,
    clock: Result<u32, HalError>,
    init_status: Result<(), HalError>,
    start_on_init: bool,
    compare_status: Result<(), HalError>,
    running: bool,
    compare_value: Option<u16>,
    compare_flag: bool,
    handler: Option<IrqHandler>,
    irq_enabled: bool,
}

/// Simulated LPTMR, clock service and interrupt controller.
///
/// By default the counter only runs after `start_counter`: the start flag
/// passed to `init` is recorded but not acted upon, so tests drive the
/// running state explicitly. [MockHw::set_start_on_init] makes `init` honour
/// the flag like the vendor driver does.
pub struct MockHw {
    state: Mutex<State>,
}

impl MockHw {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(State {
                calls: Vec::new(),
                clock: Ok(DEFAULT_CLOCK_HZ),
                init_status: Ok(()),
                start_on_init: false,
                compare_status: Ok(()),
                running: false,
                compare_value: None,
                compare_flag: false,
                handler: None,
                irq_enabled: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A failed assert in one test must not poison a shared static mock
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: Call) -> MutexGuard<'_, State> {
        let mut state = self.lock();
        state.calls.push(call);
        state
    }

    pub const fn lptmr(&self) -> MockLptmr<'_> {
        MockLptmr { hw: self }
    }

    pub const fn clock(&self) -> MockClock<'_> {
        MockClock { hw: self }
    }

    pub const fn intc(&self) -> MockIntc<'_> {
        MockIntc { hw: self }
    }

    /// Result of the next clock queries
    pub fn set_clock(&self, clock: Result<u32, HalError>) {
        self.lock().clock = clock;
    }

    pub fn set_init_status(&self, status: Result<(), HalError>) {
        self.lock().init_status = status;
    }

    /// Start the counter when `init` is asked to
    pub fn set_start_on_init(&self, start_on_init: bool) {
        self.lock().start_on_init = start_on_init;
    }

    /// Result of the next compare value writes
    pub fn set_compare_status(&self, status: Result<(), HalError>) {
        self.lock().compare_status = status;
    }

    pub fn set_running(&self, running: bool) {
        self.lock().running = running;
    }

    /// Simulate a compare match
    pub fn raise_compare_flag(&self) {
        self.lock().compare_flag = true;
    }

    pub fn is_running(&self) -> bool {
        self.lock().running
    }

    pub fn compare_flag(&self) -> bool {
        self.lock().compare_flag
    }

    /// Last compare value written, `None` if never written since init
    pub fn compare_value(&self) -> Option<u16> {
        self.lock().compare_value
    }

    pub fn irq_enabled(&self) -> bool {
        self.lock().irq_enabled
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Raise the IRQ line. Runs the installed handler if the line is
    /// enabled, returns whether it ran.
    pub fn fire(&self) -> bool {
        let handler = {
            let state = self.lock();
            if state.irq_enabled {
                state.handler
            } else {
                None
            }
        };
        match handler {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }
}

impl Default for MockHw {
    fn default() -> Self {
        Self::new()
    }
}

pub struct MockLptmr<'a> {
    hw: &'a MockHw,
}

impl Lptmr for MockLptmr<'_> {
    fn init(&mut self, config: &LptmrConfig, start_counter: bool) -> Result<(), HalError> {
        let mut state = self.hw.record(Call::Init {
            config: *config,
            start_counter,
        });
        state.compare_value = None;
        state.compare_flag = false;
        if state.start_on_init {
            state.running = start_counter;
        }
        state.init_status
    }

    fn deinit(&mut self) {
        let mut state = self.hw.record(Call::Deinit);
        state.running = false;
        state.compare_value = None;
        state.compare_flag = false;
    }

    fn start_counter(&mut self) {
        self.hw.record(Call::StartCounter).running = true;
    }

    fn stop_counter(&mut self) {
        self.hw.record(Call::StopCounter).running = false;
    }

    fn is_running(&mut self) -> bool {
        self.hw.record(Call::IsRunning).running
    }

    fn set_compare_value_by_count(&mut self, ticks: u16) -> Result<(), HalError> {
        let mut state = self.hw.record(Call::SetCompareValue(ticks));
        let status = state.compare_status;
        if status.is_ok() {
            state.compare_value = Some(ticks);
        }
        status
    }

    fn compare_flag(&mut self) -> bool {
        self.hw.record(Call::CompareFlag).compare_flag
    }

    fn clear_compare_flag(&mut self) {
        self.hw.record(Call::ClearCompareFlag).compare_flag = false;
    }
}

pub struct MockClock<'a> {
    hw: &'a MockHw,
}

impl Clock for MockClock<'_> {
    fn frequency(&mut self, name: ClockName) -> Result<u32, HalError> {
        self.hw.record(Call::Frequency(name)).clock
    }
}

pub struct MockIntc<'a> {
    hw: &'a MockHw,
}

impl InterruptController for MockIntc<'_> {
    fn install_handler(&mut self, irq: Irq, handler: IrqHandler) -> Option<IrqHandler> {
        self.hw.record(Call::InstallHandler(irq)).handler.replace(handler)
    }

    fn enable_irq(&mut self, irq: Irq) {
        self.hw.record(Call::EnableIrq(irq)).irq_enabled = true;
    }

    fn disable_irq(&mut self, irq: Irq) {
        self.hw.record(Call::DisableIrq(irq)).irq_enabled = false;
    }
}
