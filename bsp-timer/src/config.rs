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

/// Compare value loaded at init. At the nominal clock this gives a
/// 32 kHz-class timeout, [crate::BspTimer::period_set] overrides it.
pub const TIMEOUT_VALUE_INIT: u32 = 1250;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkMode {
    Timer,
    PulseCounter,
}

/// Counter clock input
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSelect {
    SircDiv2,
    Lpo1k,
    Rtc,
    /// Peripheral clock selected in PCC
    Pcc,
}

/// Prescaler in timer mode, glitch filter width in pulse counter mode
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prescaler {
    Div2 = 0,
    Div4,
    Div8,
    Div16,
    Div32,
    Div64,
    Div128,
    Div256,
    Div512,
    Div1024,
    Div2048,
    Div4096,
    Div8192,
    Div16384,
    Div32768,
    Div65536,
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterUnits {
    Ticks,
    Microseconds,
}

/// Pulse counter input pin
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinSelect {
    Trgmux,
    Alt1,
    Alt2,
    Alt3,
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinPolarity {
    Rising,
    Falling,
}

/// LPTMR unit configuration
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LptmrConfig {
    pub dma_request: bool,
    pub interrupt_enable: bool,
    pub free_run: bool,
    pub work_mode: WorkMode,
    pub clock_select: ClockSelect,
    pub prescaler: Prescaler,
    pub bypass_prescaler: bool,
    pub compare_value: u32,
    pub counter_units: CounterUnits,
    pub pin_select: PinSelect,
    pub pin_polarity: PinPolarity,
}

impl LptmrConfig {
    /// Register reset values
    pub const fn new() -> Self {
        Self {
            dma_request: false,
            interrupt_enable: false,
            free_run: false,
            work_mode: WorkMode::Timer,
            clock_select: ClockSelect::SircDiv2,
            prescaler: Prescaler::Div2,
            bypass_prescaler: false,
            compare_value: 0,
            counter_units: CounterUnits::Ticks,
            pin_select: PinSelect::Trgmux,
            pin_polarity: PinPolarity::Rising,
        }
    }
}

impl Default for LptmrConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration applied by [crate::BspTimer::init]
pub const TIMER_CONFIG: LptmrConfig = LptmrConfig {
    interrupt_enable: true,
    clock_select: ClockSelect::Pcc,
    bypass_prescaler: true,
    compare_value: TIMEOUT_VALUE_INIT,
    ..LptmrConfig::new()
};
