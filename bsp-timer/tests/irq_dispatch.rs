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

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use bsp_timer::mock::{MockClock, MockHw, MockIntc, MockLptmr};
use bsp_timer::{BspTimer, DAC_PORT};

static HW: MockHw = MockHw::new();
static TIMER: BspTimer<MockLptmr, MockClock, MockIntc> =
    BspTimer::new(HW.lptmr(), HW.clock(), HW.intc(), lptmr0_isr);

fn lptmr0_isr() {
    TIMER.on_interrupt();
}

static HITS: AtomicU32 = AtomicU32::new(0);
static FLAG_CLEARED_EARLY: AtomicBool = AtomicBool::new(false);

fn on_timeout() {
    if !HW.compare_flag() {
        FLAG_CLEARED_EARLY.store(true, Ordering::SeqCst);
    }
    // Third timeout stops the counter from inside the callback
    if HITS.fetch_add(1, Ordering::SeqCst) == 2 {
        TIMER.stop(DAC_PORT);
    }
}

#[test_log::test]
fn test_installed_handler_reaches_static_driver() {
    HW.set_clock(Ok(48_000));
    TIMER.init();
    assert!(TIMER.is_initialized());

    assert_eq!(TIMER.period_set(DAC_PORT, 16_000), Ok(()));
    assert_eq!(HW.compare_value(), Some(3));
    assert_eq!(TIMER.cb_set(DAC_PORT, Some(on_timeout)), Ok(()));
    TIMER.start(DAC_PORT);
    assert!(HW.is_running());

    for _ in 0..3 {
        HW.raise_compare_flag();
        assert!(HW.fire());
        assert!(!HW.compare_flag());
    }
    assert_eq!(HITS.load(Ordering::SeqCst), 3);
    assert!(!FLAG_CLEARED_EARLY.load(Ordering::SeqCst));
    assert!(!HW.is_running());

    // Spurious interrupt, flag not set
    assert!(HW.fire());
    assert_eq!(HITS.load(Ordering::SeqCst), 3);

    TIMER.deinit();
    HW.raise_compare_flag();
    assert!(!HW.fire());
    TIMER.on_interrupt();
    assert_eq!(HITS.load(Ordering::SeqCst), 3);
    assert!(HW.compare_flag());
}
