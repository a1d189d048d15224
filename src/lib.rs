//! gitlab-mr: open, list, check out, and edit GitLab merge requests from a
//! git working copy
//!
//! Workflows are pure orchestration over three seams:
//! - [`repo::VersionControl`] for the working copy
//! - [`platform::ForgeClient`] for the GitLab REST API
//! - [`prompt::Prompter`] for user interaction
//!
//! Planning steps ([`open::plan_branch_preparation`], [`checkout::plan_checkout`],
//! [`edit::SelectedMr`]) are pure and run before any side effect.

pub mod checkout;
pub mod config;
pub mod edit;
pub mod error;
pub mod lifecycle;
pub mod open;
pub mod platform;
pub mod prompt;
pub mod remote;
pub mod repo;
pub mod select;
pub mod types;
