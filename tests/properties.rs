//! Property-based tests for the step primitives.
//!
//! Generates small random recipe graphs and random launch/wait sequences,
//! then checks the state invariants after every step.

use proptest::prelude::*;
use u_procsim::models::{Config, ConfigBuilder, Process, is_monotonic};
use u_procsim::sim::SimState;

const ITEMS: [&str; 4] = ["ore", "bar", "gear", "coin"];

// ===========================================================================
// Generators
// ===========================================================================

fn arb_lines() -> impl Strategy<Value = Vec<(usize, i64)>> {
    proptest::collection::vec((0..ITEMS.len(), 1..=3i64), 0..=2)
}

fn arb_process() -> impl Strategy<Value = (Vec<(usize, i64)>, Vec<(usize, i64)>, u64)> {
    (arb_lines(), arb_lines(), 0..=5u64)
}

/// A random unpruned `time` configuration with up to `max_processes` processes.
fn arb_config(max_processes: usize) -> impl Strategy<Value = Config> {
    (
        proptest::collection::vec(0..=10i64, ITEMS.len()),
        proptest::collection::vec(arb_process(), 1..=max_processes),
    )
        .prop_map(|(stocks, processes)| {
            let mut builder = ConfigBuilder::new();
            for (name, qty) in ITEMS.iter().zip(stocks) {
                builder = builder.with_stock(*name, qty);
            }
            for (i, (needs, results, duration)) in processes.into_iter().enumerate() {
                let mut process = Process::new(format!("p{i}")).with_duration(duration);
                for (item, qty) in needs {
                    process = process.with_need(ITEMS[item], qty);
                }
                for (item, qty) in results {
                    process = process.with_result(ITEMS[item], qty);
                }
                builder = builder.with_process(process);
            }
            builder
                .with_objective("time")
                .without_pruning()
                .build()
                .unwrap()
        })
}

/// Each step either launches the `n % (runnable + 1)`-th runnable process
/// or, when that index is one past the end, waits.
fn arb_steps(max_steps: usize) -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(0..16usize, 1..=max_steps)
}

fn step(cfg: &Config, state: &mut SimState, choice: usize) {
    let mut runnable = state.runnable().to_vec();
    runnable.sort_unstable();
    let pick = choice % (runnable.len() + 1);
    match runnable.get(pick) {
        Some(&pid) => {
            assert!(state.needs_satisfied(cfg, pid));
            assert!(state.launch(cfg, pid));
        }
        None => {
            state.wait(cfg);
        }
    }
}

fn assert_runnable_consistent(cfg: &Config, state: &SimState) {
    let mut incremental = state.runnable().to_vec();
    incremental.sort_unstable();
    assert_eq!(incremental, state.rescan_runnable(cfg));
    for pid in 0..cfg.process_count() {
        assert_eq!(state.missing(pid) == 0, state.is_runnable(pid));
    }
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Launching only satisfied processes never drives a stock negative.
    #[test]
    fn stocks_stay_non_negative(cfg in arb_config(5), steps in arb_steps(60)) {
        let mut state = SimState::new(&cfg);
        for choice in steps {
            step(&cfg, &mut state, choice);
            prop_assert!(state.stocks().iter().all(|&q| q >= 0));
        }
        state.finish(&cfg);
        prop_assert!(state.stocks().iter().all(|&q| q >= 0));
    }

    /// The incremental runnable set always matches a full rescan.
    #[test]
    fn runnable_set_matches_rescan(cfg in arb_config(5), steps in arb_steps(60)) {
        let mut state = SimState::new(&cfg);
        assert_runnable_consistent(&cfg, &state);
        for choice in steps {
            step(&cfg, &mut state, choice);
            assert_runnable_consistent(&cfg, &state);
        }
    }

    /// Recorded launches never go back in time.
    #[test]
    fn trace_is_monotonic(cfg in arb_config(5), steps in arb_steps(60)) {
        let mut state = SimState::new(&cfg);
        let mut last_cycle = 0;
        for choice in steps {
            step(&cfg, &mut state, choice);
            prop_assert!(state.cycle() >= last_cycle);
            last_cycle = state.cycle();
        }
        prop_assert!(is_monotonic(state.trace()));
    }

    /// Waiting with nothing in flight changes nothing.
    #[test]
    fn idle_wait_is_noop(cfg in arb_config(5), steps in arb_steps(30)) {
        let mut state = SimState::new(&cfg);
        for choice in steps {
            step(&cfg, &mut state, choice);
        }
        state.finish(&cfg);
        prop_assert_eq!(state.in_flight(), 0);

        let cycle = state.cycle();
        let stocks = state.stocks().to_vec();
        prop_assert!(!state.wait(&cfg));
        prop_assert_eq!(state.cycle(), cycle);
        prop_assert_eq!(state.stocks(), stocks.as_slice());
    }
}
