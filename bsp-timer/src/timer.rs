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

use core::cell::{Cell, RefCell};
use critical_section::Mutex;

use crate::config::TIMER_CONFIG;
use crate::errors::TimerError;
use crate::hal::{Clock, ClockName, InterruptController, IrqHandler, Lptmr, LPTMR0_IRQ};
use crate::{debug, error, info};

/// Callback invoked from interrupt context on every compare match
pub type TimeoutCallback = fn();

/// The only port served by this driver, dedicated to the DAC
pub const DAC_PORT: u32 = 0;

/// LPTMR unit driven by [BspTimer]
pub const LPTMR_INSTANCE: u32 = 0;

const LPTMR_CLOCK: ClockName = ClockName::SoscDiv2;

/// Number of counter ticks for a timeout of `period_hz`.
///
/// The result is truncated to the 16 bit compare register, there is no
/// overflow check.
///
/// # Panics
///
/// * If `period_hz` is 0
pub fn ticks_for_period(clock_freq_hz: u32, period_hz: u16) -> u16 {
    (clock_freq_hz / period_hz as u32) as u16
}

struct Inner<L, C, I> {
    lptmr: L,
    clock: C,
    intc: I,
    initialized: bool,
    clock_freq_hz: u32,
}

/// Driver for the board's single LPTMR unit.
///
/// Owns the peripheral handle, so there is exactly one of these per unit.
/// Every method takes `&self` and runs inside a critical section, which lets
/// the driver live in a `static` shared with the interrupt handler.
pub struct BspTimer<L, C, I> {
    inner: Mutex<RefCell<Inner<L, C, I>>>,
    timeout_cb: Mutex<Cell<Option<TimeoutCallback>>>,
    isr: IrqHandler,
}

impl<L, C, I> BspTimer<L, C, I> {
    /// BspTimer constructor.
    ///
    /// # Arguments
    ///
    /// * `lptmr` - The LPTMR unit handle.
    /// * `clock` - Clock service, queried for the LPTMR input frequency.
    /// * `intc` - Interrupt controller the handler is installed with.
    /// * `isr` - Handler installed for the LPTMR IRQ. It must forward to
    ///   [BspTimer::on_interrupt] of this instance.
    pub const fn new(lptmr: L, clock: C, intc: I, isr: IrqHandler) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Inner {
                lptmr,
                clock,
                intc,
                initialized: false,
                clock_freq_hz: 0,
            })),
            timeout_cb: Mutex::new(Cell::new(None)),
            isr,
        }
    }
}

impl<L: Lptmr, C: Clock, I: InterruptController> BspTimer<L, C, I> {
    /// Configure the LPTMR unit, install and enable its interrupt.
    ///
    /// Only a successful clock query marks the driver initialized. Nothing
    /// is reported back, check [BspTimer::is_initialized] if needed.
    pub fn init(&self) {
        critical_section::with(|cs| {
            let mut inner = self.inner.borrow_ref_mut(cs);

            if let Err(err) = inner.lptmr.init(&TIMER_CONFIG, true) {
                error!("LPTMR driver init failed: {:?}", err);
            }

            if inner.intc.install_handler(LPTMR0_IRQ, self.isr).is_some() {
                debug!("Replaced previous handler for irq {}", LPTMR0_IRQ.0);
            }
            inner.intc.enable_irq(LPTMR0_IRQ);

            let status = inner.clock.frequency(LPTMR_CLOCK);
            debug!(
                "Timer Init; instance:{}, clock:{:?}",
                LPTMR_INSTANCE, status
            );

            match status {
                Ok(hz) => {
                    inner.clock_freq_hz = hz;
                    inner.initialized = true;
                    info!("Initialized");
                }
                Err(_) => {
                    inner.clock_freq_hz = 0;
                    inner.initialized = false;
                    error!("Init Fail");
                }
            }
        })
    }

    /// Stop the unit, reset its registers and disable the interrupt.
    ///
    /// The registered callback is dropped.
    pub fn deinit(&self) {
        critical_section::with(|cs| {
            let mut inner = self.inner.borrow_ref_mut(cs);
            if !inner.initialized {
                error!("Deinit requested before init");
                return;
            }

            inner.lptmr.deinit();
            inner.intc.disable_irq(LPTMR0_IRQ);
            inner.initialized = false;
            inner.clock_freq_hz = 0;
            self.timeout_cb.borrow(cs).set(None);

            info!("Deinitialized");
        })
    }

    /// Set the timeout frequency of `port`.
    ///
    /// The counter has to be stopped first. [BspTimer::init] leaves it
    /// running, so call [BspTimer::stop] before the first period change.
    pub fn period_set(&self, port: u32, period_hz: u16) -> Result<(), TimerError> {
        let result = critical_section::with(|cs| {
            let mut inner = self.inner.borrow_ref_mut(cs);
            if !inner.initialized {
                return Err(TimerError::NotInitialized);
            }
            if period_hz == 0 {
                return Err(TimerError::InvalidArgument);
            }
            if port != DAC_PORT {
                return Err(TimerError::UnknownPort(port));
            }
            if inner.lptmr.is_running() {
                return Err(TimerError::Busy);
            }

            let ticks = ticks_for_period(inner.clock_freq_hz, period_hz);
            let status = inner.lptmr.set_compare_value_by_count(ticks);
            debug!(
                "Timer Period Set; instance:{}, tick:{}, status:{:?}",
                LPTMR_INSTANCE, ticks, status
            );
            status.map_err(TimerError::from)
        });

        if let Err(err) = result {
            error!("Timer Period Set Fail: {:?}", err);
        }
        result
    }

    /// Start the counter of `port`. Ignored before init.
    pub fn start(&self, port: u32) {
        self.counter_op(port, "start", L::start_counter);
    }

    /// Stop the counter of `port`. Ignored before init.
    pub fn stop(&self, port: u32) {
        self.counter_op(port, "stop", L::stop_counter);
    }

    fn counter_op(&self, port: u32, name: &str, op: fn(&mut L)) {
        critical_section::with(|cs| {
            let mut inner = self.inner.borrow_ref_mut(cs);
            if !inner.initialized {
                return;
            }
            if port == DAC_PORT {
                op(&mut inner.lptmr);
            } else {
                error!("Unknown port in {}; port:{}", name, port);
            }
        })
    }

    /// Register the timeout callback of `port`, replacing the previous one.
    ///
    /// `None` is rejected, the callback can only be dropped by
    /// [BspTimer::deinit].
    pub fn cb_set(&self, port: u32, callback: Option<TimeoutCallback>) -> Result<(), TimerError> {
        critical_section::with(|cs| {
            if !self.inner.borrow_ref(cs).initialized {
                error!("Timer not initialized");
                return Err(TimerError::NotInitialized);
            }
            let Some(callback) = callback else {
                error!("Invalid argument in cb_set");
                return Err(TimerError::InvalidArgument);
            };
            if port != DAC_PORT {
                error!("Unknown port in cb_set; port:{}", port);
                return Err(TimerError::UnknownPort(port));
            }

            self.timeout_cb.borrow(cs).set(Some(callback));
            Ok(())
        })
    }

    /// LPTMR interrupt entry.
    ///
    /// Call this from the handler passed to [BspTimer::new]. The callback runs
    /// outside of the critical section and before the compare flag is
    /// cleared, so it sees the flag still set.
    pub fn on_interrupt(&self) {
        let Some(callback) = critical_section::with(|cs| self.timeout_cb.borrow(cs).get()) else {
            debug!("NULL callback variable");
            return;
        };

        let pending =
            critical_section::with(|cs| self.inner.borrow_ref_mut(cs).lptmr.compare_flag());
        if pending {
            callback();
            critical_section::with(|cs| self.inner.borrow_ref_mut(cs).lptmr.clear_compare_flag());
        }
    }

    pub fn is_initialized(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).initialized)
    }

    /// Cached LPTMR input clock, `None` while not initialized
    pub fn clock_frequency_hz(&self) -> Option<u32> {
        critical_section::with(|cs| {
            let inner = self.inner.borrow_ref(cs);
            inner.initialized.then_some(inner.clock_freq_hz)
        })
    }
}
