//! Unit tests for perf module.

use std::thread;
use std::time::Duration;
use unipointer::perf::ScopedTimer;

#[test]
fn test_elapsed_grows_while_timer_lives() {
    // High threshold, so dropping it never warns
    let timer = ScopedTimer::new("test_op", 1000.0);
    let first = timer.elapsed_ms();
    thread::sleep(Duration::from_millis(2));
    assert!(timer.elapsed_ms() >= first + 1.0);
}

#[test]
fn test_slow_handler_timer_drops_cleanly() {
    let timer = ScopedTimer::for_handler("pointer_callbacks");
    thread::sleep(Duration::from_millis(6));
    assert!(timer.elapsed_ms() > unipointer::constants::SLOW_HANDLER_MS);
    drop(timer);

    let quick = ScopedTimer::for_profiling("pointer_step");
    assert!(quick.elapsed_ms() < 1000.0);
}

#[test]
fn test_profile_scope_leaves_scope_value_intact() {
    fn step() -> u32 {
        unipointer::profile_scope!("step");
        (1..=10).sum()
    }
    assert_eq!(step(), 55);
}
