//! Kernel module - backend collaborators and server dependencies.

pub mod aggregator;
pub mod backends;
pub mod deps;
pub mod rpc_client;
pub mod test_dependencies;
pub mod traits;

pub use aggregator::{AggregatedResult, BackendAggregator};
pub use deps::ServerDeps;
pub use rpc_client::RpcClient;
pub use test_dependencies::TestDependencies;
pub use traits::*;
