//! The load engine: request budget partitioning, staggered workers, shared
//! run state and the distributor that ties them together.
mod config;
mod context;
mod distributor;
mod plan;
mod worker;


pub use config::RunConfig;
pub use context::RunContext;
pub use distributor::{RunReport, WorkerTotals, run_http_load, run_load};
pub use plan::{WorkerAssignment, plan_shares, plan_workers, stagger_delays};
