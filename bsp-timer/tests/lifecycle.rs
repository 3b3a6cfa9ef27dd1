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

use bsp_timer::hal::{ClockName, LPTMR0_IRQ};
use bsp_timer::mock::{Call, MockClock, MockHw, MockIntc, MockLptmr};
use bsp_timer::{BspTimer, HalError, TimerError, DAC_PORT, TIMER_CONFIG};

type Timer<'a> = BspTimer<MockLptmr<'a>, MockClock<'a>, MockIntc<'a>>;

fn isr() {}

fn timeout() {}

fn make_timer(hw: &MockHw) -> Timer<'_> {
    BspTimer::new(hw.lptmr(), hw.clock(), hw.intc(), isr)
}

/// Runs every port operation and returns what reached the hardware
fn exercise(timer: &Timer, hw: &MockHw) -> ([Result<(), TimerError>; 2], Vec<Call>) {
    hw.clear_calls();
    timer.start(DAC_PORT);
    timer.stop(DAC_PORT);
    let results = [
        timer.period_set(DAC_PORT, 32),
        timer.cb_set(DAC_PORT, Some(timeout)),
    ];
    (results, hw.calls())
}

#[test_log::test]
fn test_deinit_restores_fresh_state() {
    let fresh_hw = MockHw::new();
    let fresh = make_timer(&fresh_hw);
    let before = exercise(&fresh, &fresh_hw);

    let hw = MockHw::new();
    let timer = make_timer(&hw);
    timer.init();
    timer.deinit();
    let after = exercise(&timer, &hw);

    assert_eq!(before, after);
    assert_eq!(
        after.0,
        [
            Err(TimerError::NotInitialized),
            Err(TimerError::NotInitialized)
        ]
    );
    assert!(after.1.is_empty());
    assert_eq!(timer.clock_frequency_hz(), None);
}

#[test_log::test]
fn test_dac_period_at_32khz_clock() {
    let hw = MockHw::new();
    hw.set_clock(Ok(32_000));
    let timer = make_timer(&hw);
    timer.init();

    assert_eq!(timer.period_set(DAC_PORT, 32), Ok(()));
    assert_eq!(hw.calls().last(), Some(&Call::SetCompareValue(1000)));
}

#[test_log::test]
fn test_clock_failure_blocks_start() {
    let hw = MockHw::new();
    hw.set_clock(Err(HalError::Failed));
    let timer = make_timer(&hw);
    timer.init();

    // The IRQ is still set up, only the clock decides
    assert_eq!(
        hw.calls(),
        [
            Call::Init {
                config: TIMER_CONFIG,
                start_counter: true
            },
            Call::InstallHandler(LPTMR0_IRQ),
            Call::EnableIrq(LPTMR0_IRQ),
            Call::Frequency(ClockName::SoscDiv2),
        ]
    );

    hw.clear_calls();
    timer.start(DAC_PORT);
    assert!(!hw.calls().contains(&Call::StartCounter));
    assert!(!hw.is_running());
}

#[test_log::test]
fn test_period_change_needs_stopped_counter() {
    let hw = MockHw::new();
    hw.set_clock(Ok(32_000));
    let timer = make_timer(&hw);
    timer.init();

    timer.start(DAC_PORT);
    assert_eq!(timer.period_set(DAC_PORT, 16), Err(TimerError::Busy));
    assert_eq!(hw.compare_value(), None);

    timer.stop(DAC_PORT);
    assert_eq!(timer.period_set(DAC_PORT, 16), Ok(()));
    assert_eq!(hw.compare_value(), Some(2000));
}

#[test_log::test]
fn test_counter_runs_after_init() {
    let hw = MockHw::new();
    hw.set_clock(Ok(32_000));
    hw.set_start_on_init(true);
    let timer = make_timer(&hw);
    timer.init();
    assert!(hw.is_running());

    assert_eq!(timer.period_set(DAC_PORT, 32), Err(TimerError::Busy));
    assert!(!hw.calls().contains(&Call::SetCompareValue(1000)));

    timer.stop(DAC_PORT);
    assert_eq!(timer.period_set(DAC_PORT, 32), Ok(()));
    assert_eq!(hw.compare_value(), Some(1000));
}
