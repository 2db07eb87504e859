//! Scheduling domain models.
//!
//! Static description of resources and recipes, resolved to a dense id
//! space once a [`Config`] is built.
//!
//! # Domain Mappings
//!
//! | u-procsim | Manufacturing | Kitchen | Logistics |
//! |-----------|--------------|---------|-----------|
//! | Item | Material | Ingredient | Cargo |
//! | Process | Operation | Recipe step | Transport leg |
//! | Stock | Inventory | Pantry | Depot contents |
//! | Trace | Production plan | Cooking order | Dispatch log |

mod config;
mod item;
mod process;
mod trace;

pub use crate::graph::StockCaps;
pub use config::{Config, ConfigBuilder, Objective, TIME_KEY};
pub use item::{Item, ItemId};
pub use process::{Process, ProcessId};
pub use trace::{TraceEntry, is_monotonic};
