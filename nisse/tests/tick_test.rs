pub mod common;

use nisse::KeyCode;
use nisse::tick::{PollClock, PollGate};

use crate::common::*;

static CLOCK: PollClock = PollClock::new();

#[test]
fn test_task_runs_once_per_tick() {
    let mut engine = engine();
    let mut gate = PollGate::new();
    engine.reader_mut().press(5, 1);

    let mut reports = Vec::new();
    let mut tasks = 0;
    for _ in 0..4 {
        CLOCK.on_interrupt();
        // The loop spins several times between interrupts
        for _ in 0..3 {
            if gate.poll(&CLOCK) {
                tasks += 1;
                reports.extend(tick(&mut engine));
            }
        }
    }
    assert_eq!(tasks, 4);
    assert_eq!(reports, vec![report(0, &[KeyCode::Q])]);
}

#[test]
fn test_interrupt_from_another_thread() {
    let clock = PollClock::new();
    std::thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..100 {
                clock.on_interrupt();
            }
        });
    });
    assert_eq!(clock.now(), 100);
}
