//! End-to-end scenarios: parse, search, render, replay.

use std::time::Duration;

use u_procsim::beam::{BeamConfig, BeamSearch};
use u_procsim::ga::GaConfig;
use u_procsim::logging;
use u_procsim::models::Config;
use u_procsim::parser::{load_config_str, parse_config};
use u_procsim::scheduler::{SearchReport, Solver, Strategy, StrategyKind};
use u_procsim::verify::{verify_files, verify_trace};
use u_procsim::VerifyError;

const SCENARIO_A: &str = "\
euro:100
buy:(euro:10):(item:1):5
optimize:(item)
";

const SCENARIO_B: &str = "\
x:1
forth:(x:1):(y:1):1
back:(y:1):(x:1):1
sell:(x:1):(gold:1):2
optimize:(gold)
";

const SCENARIO_C: &str = "\
a:1
p:(a:1):(b:1):5
optimize:(time)
";

const WORKSHOP: &str = "\
# a small workshop
euro:30
buy:(euro:10):(plank:2):5
saw:(plank:1):(leg:2):3
top:(plank:1):(board:1):4
assemble:(leg:4;board:1):(table:1):6
sell:(table:1):(euro:40):2
optimize:(euro)
";

const WITH_IDLE: &str = "\
euro:100
zz:1
buy:(euro:10):(item:1):5
idle:(zz:1):(dust:1):1
optimize:(item)
";

const TIMED: &str = "\
euro:30
buy:(euro:10):(item:1):5
craft:(item:2):(tool:1):3
optimize:(time)
";

fn small_ga() -> GaConfig {
    GaConfig::default()
        .with_population_size(20)
        .with_max_generations(15)
        .with_max_cycles(500)
}

fn solve_genetic(cfg: &Config, seed: u64) -> SearchReport {
    Solver::new()
        .with_strategy(Strategy::Genetic(small_ga()))
        .with_seed(seed)
        .solve(cfg)
}

fn assert_replay_agrees(cfg: &Config, report: &SearchReport) {
    let replay = verify_trace(cfg, &report.render()).unwrap();
    assert_eq!(replay.launches, report.launches());
    assert_eq!(replay.cycle, report.cycle);
    assert_eq!(replay.final_stocks, report.final_stocks);
}

#[test]
fn scenario_a_buy_until_broke() {
    logging::init_test();
    let cfg = load_config_str(SCENARIO_A).unwrap();
    let report = solve_genetic(&cfg, 42);

    let launches = report.launches() as i64;
    assert!(launches <= 10);
    assert!(report.trace.iter().all(|(_, name)| name == "buy"));
    assert_eq!(report.stock("euro"), Some(100 - 10 * launches));
    assert_eq!(report.stock("item"), Some(launches));
    assert!(report.stock("item").unwrap() <= 10);
}

#[test]
fn scenario_b_loop_is_flagged_and_search_terminates() {
    let cfg = load_config_str(SCENARIO_B).unwrap();
    let forth = cfg.process_id("forth").unwrap();
    let back = cfg.process_id("back").unwrap();
    let sell = cfg.process_id("sell").unwrap();
    assert!(cfg.process(forth).in_cycle);
    assert!(cfg.process(back).in_cycle);
    assert!(!cfg.process(sell).in_cycle);

    let report = solve_genetic(&cfg, 7);
    assert_eq!(report.stock("gold"), Some(1));
    assert_eq!(report.trace, vec![(0, "sell".to_string())]);
    assert_eq!(report.cycle, 2);
}

#[test]
fn scenario_c_beam_single_launch() {
    let cfg = load_config_str(SCENARIO_C).unwrap();
    let outcome = BeamSearch::new(&cfg, BeamConfig::default().with_beam_width(1)).run();
    assert_eq!(outcome.makespan, Some(5));
    assert_eq!(outcome.cycle_or_sentinel(), 5);
    assert_eq!(outcome.trace.len(), 1);

    let report = Solver::new().solve(&cfg);
    assert_eq!(report.strategy, StrategyKind::Beam);
    assert_eq!(report.cycle, 5);
    assert_eq!(report.makespan, Some(5));
}

#[test]
fn scenario_d_unknown_process() {
    let cfg = load_config_str(SCENARIO_A).unwrap();
    let err = verify_trace(&cfg, "0:buy\n3:unknown_process\n").unwrap_err();
    match err {
        VerifyError::UnknownProcess { cycle, process } => {
            assert_eq!(cycle, 3);
            assert_eq!(process, "unknown_process");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn genetic_traces_replay_exactly() {
    let cfg = load_config_str(WORKSHOP).unwrap();
    for seed in [1, 2, 3] {
        let report = solve_genetic(&cfg, seed);
        assert_replay_agrees(&cfg, &report);
    }
}

#[test]
fn beam_traces_replay_exactly() {
    let cfg = load_config_str(TIMED).unwrap();
    let report = Solver::new()
        .with_strategy(Strategy::Beam(BeamConfig::default().with_beam_width(8)))
        .solve(&cfg);
    assert!(report.makespan.is_some());
    assert_replay_agrees(&cfg, &report);
}

#[test]
fn same_seed_same_result() {
    let cfg = load_config_str(WORKSHOP).unwrap();
    let first = solve_genetic(&cfg, 99);
    let second = solve_genetic(&cfg, 99);
    assert_eq!(first.trace, second.trace);
    assert_eq!(first.final_stocks, second.final_stocks);
}

#[test]
fn unpruned_config_accepts_idle_processes() {
    let text = "euro:10\nbuy:(euro:10):(item:1):5\nidle:(euro:1):(dust:1):1\noptimize:(item)\n";
    let pruned = load_config_str(text).unwrap();
    assert!(pruned.process_id("idle").is_none());
    assert!(matches!(
        verify_trace(&pruned, "0:idle\n"),
        Err(VerifyError::UnknownProcess { .. })
    ));

    let full = parse_config(text).unwrap().without_pruning().build().unwrap();
    let replay = verify_trace(&full, "0:idle\n").unwrap();
    assert_eq!(replay.stock("dust"), Some(1));
}

#[test]
fn short_budget_still_reports() {
    let cfg = load_config_str(WORKSHOP).unwrap();
    let report = Solver::new()
        .with_seed(5)
        .with_time_budget(Duration::from_millis(50))
        .solve(&cfg);
    assert_eq!(report.strategy, StrategyKind::Genetic);
    assert_replay_agrees(&cfg, &report);
}

#[test]
fn replay_from_files_matches_search() {
    let cfg = load_config_str(WITH_IDLE).unwrap();
    assert!(cfg.process_id("idle").is_none());
    let report = solve_genetic(&cfg, 11);

    let dir = std::env::temp_dir().join(format!("procsim-replay-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let config_path = dir.join("shop.krp");
    let trace_path = dir.join("shop.trace");
    std::fs::write(&config_path, WITH_IDLE).unwrap();
    std::fs::write(&trace_path, report.render()).unwrap();

    let replay = verify_files(&config_path, &trace_path).unwrap();
    std::fs::remove_dir_all(&dir).unwrap();

    assert_eq!(replay.launches, report.launches());
    assert_eq!(replay.cycle, report.cycle);
    assert_eq!(replay.final_stocks, report.final_stocks);
    assert_eq!(replay.stock("dust"), Some(0));
}
