//! Equipment lifecycle transitions
//!
//! The validator is pure: it turns (current state, request) into a plan
//! without touching storage. The transition service in `services` is the
//! only component that executes plans.

pub mod plan;
pub mod validator;

pub use plan::{PlannedAction, TransitionPlan, TransitionRequest};
pub use validator::{plan_transition, TransitionError};
