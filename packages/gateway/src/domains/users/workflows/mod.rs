pub mod signup;

pub use signup::{OrchestratedSignup, OrchestrationError, SignupPlan, SignupState, SignupStep};
