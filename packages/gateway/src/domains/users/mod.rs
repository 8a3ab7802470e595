//! Users domain - shopper and admin accounts, addresses, signup.

pub mod data;
pub mod edges;
pub mod models;
pub mod workflows;

pub use data::{AddressData, UserData};
pub use workflows::{OrchestratedSignup, OrchestrationError, SignupPlan, SignupStep};
