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

//! Vendor driver seams
//!
//! The board crate wraps the vendor SDK (or raw registers) in these traits.
//! A host implementation lives in [crate::mock].

use crate::config::LptmrConfig;
use crate::errors::HalError;

/// Interrupt handler as installed in the vector table
pub type IrqHandler = fn();

/// Interrupt request line number
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Irq(pub u16);

/// LPTMR0 interrupt line
pub const LPTMR0_IRQ: Irq = Irq(58);

/// Clock names known to the clock service
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockName {
    CoreClk,
    BusClk,
    SircDiv2,
    FircDiv2,
    /// System oscillator, second divider. Feeds the LPTMR through PCC.
    SoscDiv2,
    SplldDiv2,
}

/// Clock service
pub trait Clock {
    /// Current frequency of `name` in Hz
    fn frequency(&mut self, name: ClockName) -> Result<u32, HalError>;
}

/// Trait for driving one LPTMR unit
///
/// The implementing type stands for one hardware instance, so none of the
/// methods take an instance number.
pub trait Lptmr {
    /// Apply `config`, optionally starting the counter right away
    fn init(&mut self, config: &LptmrConfig, start_counter: bool) -> Result<(), HalError>;
    /// Stop the counter and restore reset register values
    fn deinit(&mut self);
    fn start_counter(&mut self);
    fn stop_counter(&mut self);
    fn is_running(&mut self) -> bool;
    /// Program the compare register in counter ticks
    fn set_compare_value_by_count(&mut self, ticks: u16) -> Result<(), HalError>;
    fn compare_flag(&mut self) -> bool;
    fn clear_compare_flag(&mut self);
}

/// Interrupt controller
pub trait InterruptController {
    /// Install `handler` for `irq`, returning the one it replaces
    fn install_handler(&mut self, irq: Irq, handler: IrqHandler) -> Option<IrqHandler>;
    fn enable_irq(&mut self, irq: Irq);
    fn disable_irq(&mut self, irq: Irq);
}
