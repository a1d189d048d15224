//! Opening merge requests
//!
//! Three-phase pattern:
//! 1. Inspect - classify the working copy (effectful, read-only)
//! 2. Plan - create a `BranchPlan` (pure, testable)
//! 3. Execute - run the plan, then create the MR (effectful)

mod execute;
mod plan;
mod workflow;

pub use execute::execute_branch_plan;
pub use plan::{
    BranchPlan, BranchStep, PlanInputs, check_source_checked_out, plan_branch_preparation,
    validate_branch_name,
};
pub use workflow::{OpenOutcome, OpenRequest, open_merge_request};
