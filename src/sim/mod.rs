//! Discrete-event simulation core.
//!
//! [`SimState`] holds one branch's clock, stocks, in-flight completions
//! and trace, and keeps the runnable set in sync incrementally. The step
//! primitives (`launch`, `wait`, `resolve_completions`) are shared by both
//! searches and by the verifier.
//!
//! [`Dispatcher`] narrows the runnable set with composable
//! [`ActionFilter`]s, and [`score`] holds the value functions both
//! searches rank states with.
//!
//! # Usage
//!
//! ```
//! use u_procsim::models::{ConfigBuilder, Process};
//! use u_procsim::sim::{Dispatcher, SimState};
//!
//! let cfg = ConfigBuilder::new()
//!     .with_stock("euro", 100)
//!     .with_process(Process::new("buy").with_need("euro", 10).with_result("item", 1).with_duration(5))
//!     .with_objective("item")
//!     .build()
//!     .unwrap();
//!
//! let mut state = SimState::new(&cfg);
//! let buy = Dispatcher::standard().candidates(&cfg, &state)[0];
//! assert!(state.launch(&cfg, buy));
//! assert!(state.wait(&cfg));
//! assert_eq!(state.cycle(), 5);
//! ```

mod dispatch;
pub mod score;
mod state;

pub use dispatch::{Action, ActionFilter, CapFilter, CycleFilter, Dispatcher};
pub use score::ScoreWeights;
pub use state::{Completion, SimState};
