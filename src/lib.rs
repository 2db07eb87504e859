//! Process-chain scheduling simulator.
//!
//! A configuration declares starting stocks, processes that consume some
//! items and produce others after a fixed duration, and an objective:
//! maximise one resource, or finish as early as possible (`time`). This
//! crate searches for a launch schedule serving that objective and can
//! replay any schedule to check it.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Item`, `Process`, `Config`, `TraceEntry`
//! - **`graph`**: Preprocessing: reachability pruning, distance map,
//!   obvious cycles, stock caps, needers index
//! - **`sim`**: `SimState` step primitives, dispatch filters, scoring
//! - **`ga`**: Genetic search over randomized playouts
//! - **`beam`**: Beam search minimising makespan
//! - **`scheduler`**: `Solver` facade and `SearchReport`
//! - **`parser`**: Textual configuration grammar
//! - **`validation`**: Structural checks before preprocessing
//! - **`verify`**: Trace replay
//! - **`logging`**: `tracing-subscriber` setup for binaries and tests
//!
//! # Quick start
//!
//! ```
//! use std::time::Duration;
//! use u_procsim::parser::load_config_str;
//! use u_procsim::scheduler::Solver;
//! use u_procsim::verify::verify_trace;
//!
//! let cfg = load_config_str(
//!     "euro:30\nbuy:(euro:10):(item:1):5\noptimize:(item)\n",
//! ).unwrap();
//! let report = Solver::new()
//!     .with_seed(42)
//!     .with_time_budget(Duration::from_millis(200))
//!     .solve(&cfg);
//! let replay = verify_trace(&cfg, &report.render()).unwrap();
//! assert_eq!(replay.stock("item"), report.stock("item"));
//! ```

pub mod beam;
pub mod error;
pub mod ga;
pub mod graph;
pub mod logging;
pub mod models;
pub mod parser;
pub mod scheduler;
pub mod sim;
pub mod validation;
pub mod verify;

pub use error::{ConfigError, VerifyError};
