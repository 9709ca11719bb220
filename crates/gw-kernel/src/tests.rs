//! Kernel tests: scheduling order, events, stores, error paths.

use crate::{Command, Env, EventId, Kernel, KernelError, KernelResult, Process, SimTime, StoreId, Wake};

/// Test world: an append-only log of `label@time` strings.
type Log = Vec<String>;
type TestKernel = Kernel<Log, u32>;

fn entry(label: &str, env: &Env<'_, Log, u32>) -> String {
    format!("{}@{}", label, env.now().0)
}

// ── Helper processes ──────────────────────────────────────────────────────────

/// Sleeps `delay` once, logs its label, halts.
struct SleepOnce {
    label: &'static str,
    delay: f64,
}

impl Process<Log, u32> for SleepOnce {
    fn resume(&mut self, env: &mut Env<'_, Log, u32>, log: &mut Log, wake: Wake<u32>) -> KernelResult<Command> {
        match wake {
            Wake::Started => Ok(Command::Timeout(self.delay)),
            _ => {
                log.push(entry(self.label, env));
                Ok(Command::Halt)
            }
        }
    }
}

/// Logs its label immediately on start, then halts.
struct LogAndHalt(&'static str);

impl Process<Log, u32> for LogAndHalt {
    fn resume(&mut self, env: &mut Env<'_, Log, u32>, log: &mut Log, _wake: Wake<u32>) -> KernelResult<Command> {
        log.push(entry(self.0, env));
        Ok(Command::Halt)
    }
}

/// Waits on an event, logs when it fires.
struct Waiter {
    label: &'static str,
    event: EventId,
}

impl Process<Log, u32> for Waiter {
    fn resume(&mut self, env: &mut Env<'_, Log, u32>, log: &mut Log, wake: Wake<u32>) -> KernelResult<Command> {
        match wake {
            Wake::Started => Ok(Command::WaitEvent(self.event)),
            Wake::EventFired => {
                log.push(entry(self.label, env));
                Ok(Command::Halt)
            }
            _ => unreachable!("waiter only waits on its event"),
        }
    }
}

/// Fires an event after a delay.
struct FireAfter {
    event: EventId,
    delay: f64,
}

impl Process<Log, u32> for FireAfter {
    fn resume(&mut self, env: &mut Env<'_, Log, u32>, _log: &mut Log, wake: Wake<u32>) -> KernelResult<Command> {
        match wake {
            Wake::Started => Ok(Command::Timeout(self.delay)),
            _ => {
                env.fire(self.event)?;
                Ok(Command::Halt)
            }
        }
    }
}

/// Puts a fixed item sequence into a store after a delay (0 = immediately on
/// the start instant), then halts.
struct PutAfter {
    store: StoreId,
    items: Vec<u32>,
    delay: f64,
}

impl Process<Log, u32> for PutAfter {
    fn resume(&mut self, env: &mut Env<'_, Log, u32>, _log: &mut Log, wake: Wake<u32>) -> KernelResult<Command> {
        match wake {
            Wake::Started => Ok(Command::Timeout(self.delay)),
            _ => {
                for item in self.items.drain(..) {
                    env.put(self.store, item)?;
                }
                Ok(Command::Halt)
            }
        }
    }
}

/// After `delay`, gets one item from a store and logs `label:item@time`.
struct GetOne {
    label: &'static str,
    store: StoreId,
    delay: f64,
}

impl Process<Log, u32> for GetOne {
    fn resume(&mut self, env: &mut Env<'_, Log, u32>, log: &mut Log, wake: Wake<u32>) -> KernelResult<Command> {
        match wake {
            Wake::Started => Ok(Command::Timeout(self.delay)),
            Wake::TimerElapsed => Ok(Command::Get(self.store)),
            Wake::Received(item) => {
                log.push(format!("{}:{}@{}", self.label, item, env.now().0));
                Ok(Command::Halt)
            }
            _ => unreachable!("getter only gets"),
        }
    }
}

fn run(kernel: &mut TestKernel, horizon: f64) -> KernelResult<Log> {
    let mut log = Log::new();
    kernel.run_until(&mut log, SimTime(horizon))?;
    Ok(log)
}

// ── Clock & scheduling order ──────────────────────────────────────────────────

mod scheduling {
    use super::*;

    #[test]
    fn equal_time_wakeups_resume_in_scheduling_order() {
        let mut k = TestKernel::new();
        k.spawn(Box::new(SleepOnce { label: "a", delay: 5.0 })).unwrap();
        k.spawn(Box::new(SleepOnce { label: "b", delay: 5.0 })).unwrap();
        let log = run(&mut k, 10.0).unwrap();
        assert_eq!(log, vec!["a@5", "b@5"]);
    }

    #[test]
    fn zero_timeout_runs_after_already_queued_wakeups() {
        // a's zero-delay timer is scheduled after b's start, so b logs first.
        let mut k = TestKernel::new();
        k.spawn(Box::new(SleepOnce { label: "a", delay: 0.0 })).unwrap();
        k.spawn(Box::new(LogAndHalt("b"))).unwrap();
        let log = run(&mut k, 1.0).unwrap();
        assert_eq!(log, vec!["b@0", "a@0"]);
    }

    #[test]
    fn horizon_truncates_without_executing() {
        let mut k = TestKernel::new();
        k.spawn(Box::new(SleepOnce { label: "late", delay: 10.0 })).unwrap();
        let log = run(&mut k, 7.0).unwrap();
        assert!(log.is_empty(), "wakeup beyond horizon must not execute");
        assert_eq!(k.now(), SimTime(7.0), "clock finishes at the horizon");
    }

    #[test]
    fn wakeup_exactly_at_horizon_executes() {
        let mut k = TestKernel::new();
        k.spawn(Box::new(SleepOnce { label: "edge", delay: 7.0 })).unwrap();
        let log = run(&mut k, 7.0).unwrap();
        assert_eq!(log, vec!["edge@7"]);
    }

    #[test]
    fn negative_timeout_is_fatal() {
        let mut k = TestKernel::new();
        k.spawn(Box::new(SleepOnce { label: "bad", delay: -1.0 })).unwrap();
        let err = run(&mut k, 10.0).unwrap_err();
        assert_eq!(err, KernelError::NegativeTimeout(-1.0));
    }

    #[test]
    fn spawn_from_within_a_process_runs_at_current_time() {
        struct Spawner;
        impl Process<Log, u32> for Spawner {
            fn resume(&mut self, env: &mut Env<'_, Log, u32>, log: &mut Log, _w: Wake<u32>) -> KernelResult<Command> {
                log.push(entry("spawner", env));
                env.spawn(Box::new(LogAndHalt("child")))?;
                Ok(Command::Halt)
            }
        }
        let mut k = TestKernel::new();
        k.spawn(Box::new(SleepOnce { label: "unused", delay: 100.0 })).unwrap();
        k.spawn(Box::new(Spawner)).unwrap();
        let log = run(&mut k, 1.0).unwrap();
        assert_eq!(log, vec!["spawner@0", "child@0"]);
    }
}

// ── One-shot events ───────────────────────────────────────────────────────────

mod events {
    use super::*;

    #[test]
    fn fire_wakes_waiters_in_registration_order() {
        let mut k = TestKernel::new();
        let ev = k.create_event();
        k.spawn(Box::new(Waiter { label: "w1", event: ev })).unwrap();
        k.spawn(Box::new(Waiter { label: "w2", event: ev })).unwrap();
        k.spawn(Box::new(FireAfter { event: ev, delay: 3.0 })).unwrap();
        let log = run(&mut k, 10.0).unwrap();
        assert_eq!(log, vec!["w1@3", "w2@3"]);
    }

    #[test]
    fn waiting_on_fired_event_resumes_immediately() {
        let mut k = TestKernel::new();
        let ev = k.create_event();
        k.spawn(Box::new(FireAfter { event: ev, delay: 1.0 })).unwrap();
        // Late waiter sleeps past the fire, then waits: resumes at its own t=5.
        struct LateWaiter(EventId);
        impl Process<Log, u32> for LateWaiter {
            fn resume(&mut self, env: &mut Env<'_, Log, u32>, log: &mut Log, wake: Wake<u32>) -> KernelResult<Command> {
                match wake {
                    Wake::Started => Ok(Command::Timeout(5.0)),
                    Wake::TimerElapsed => Ok(Command::WaitEvent(self.0)),
                    Wake::EventFired => {
                        log.push(entry("late", env));
                        Ok(Command::Halt)
                    }
                    _ => unreachable!(),
                }
            }
        }
        k.spawn(Box::new(LateWaiter(ev))).unwrap();
        let log = run(&mut k, 10.0).unwrap();
        assert_eq!(log, vec!["late@5"]);
    }

    #[test]
    fn firing_twice_is_fatal() {
        let mut k = TestKernel::new();
        let ev = k.create_event();
        k.spawn(Box::new(FireAfter { event: ev, delay: 1.0 })).unwrap();
        k.spawn(Box::new(FireAfter { event: ev, delay: 2.0 })).unwrap();
        let err = run(&mut k, 10.0).unwrap_err();
        assert_eq!(err, KernelError::EventAlreadyFired(ev));
    }
}

// ── Stores ────────────────────────────────────────────────────────────────────

mod stores {
    use super::*;

    #[test]
    fn buffered_items_come_out_fifo() {
        // Puts land at t=0, getters arrive at t=1: all three read the buffer.
        let mut k = TestKernel::new();
        let s = k.create_store();
        k.spawn(Box::new(PutAfter { store: s, items: vec![1, 2, 3], delay: 0.0 })).unwrap();
        k.spawn(Box::new(GetOne { label: "g1", store: s, delay: 1.0 })).unwrap();
        k.spawn(Box::new(GetOne { label: "g2", store: s, delay: 1.0 })).unwrap();
        k.spawn(Box::new(GetOne { label: "g3", store: s, delay: 1.0 })).unwrap();
        let log = run(&mut k, 2.0).unwrap();
        assert_eq!(log, vec!["g1:1@1", "g2:2@1", "g3:3@1"]);
    }

    #[test]
    fn pending_getters_are_satisfied_in_request_order() {
        let mut k = TestKernel::new();
        let s = k.create_store();
        // Getters suspend first, putter delivers at t=3.
        k.spawn(Box::new(GetOne { label: "first", store: s, delay: 0.0 })).unwrap();
        k.spawn(Box::new(GetOne { label: "second", store: s, delay: 0.0 })).unwrap();
        k.spawn(Box::new(PutAfter { store: s, items: vec![7, 8], delay: 3.0 })).unwrap();
        let log = run(&mut k, 10.0).unwrap();
        assert_eq!(log, vec!["first:7@3", "second:8@3"]);
    }

    #[test]
    fn handoff_to_waiting_getter_bypasses_buffer() {
        let mut k = TestKernel::new();
        let s = k.create_store();
        k.spawn(Box::new(GetOne { label: "g", store: s, delay: 0.0 })).unwrap();
        k.spawn(Box::new(PutAfter { store: s, items: vec![42], delay: 1.0 })).unwrap();
        run(&mut k, 10.0).unwrap();
        assert_eq!(k.store_len(s), 0, "handed-off item must not linger in the buffer");
    }

    #[test]
    fn store_len_reports_buffered_depth_without_consuming() {
        let mut k = TestKernel::new();
        let s = k.create_store();
        k.spawn(Box::new(PutAfter { store: s, items: vec![1, 2, 3], delay: 0.0 })).unwrap();
        run(&mut k, 10.0).unwrap();
        assert_eq!(k.store_len(s), 3);
        assert_eq!(k.store_len(s), 3);
    }

    #[test]
    fn get_on_empty_store_suspends_until_put() {
        let mut k = TestKernel::new();
        let s = k.create_store();
        k.spawn(Box::new(GetOne { label: "g", store: s, delay: 0.0 })).unwrap();
        k.spawn(Box::new(PutAfter { store: s, items: vec![9], delay: 6.0 })).unwrap();
        let log = run(&mut k, 10.0).unwrap();
        assert_eq!(log, vec!["g:9@6"], "getter resumes only when the item arrives");
    }
}
