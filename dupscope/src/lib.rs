//! Scope-aware duplicate name detection for declared infrastructure resources.
//!
//! A declared resource collides when a live resource of the same kind already
//! uses its name within the same scope (e.g. a security group name inside a
//! VPC), unless deployment state shows the live resource is the declared one.
//!
//! - **[`core`]**: Pure decision logic (index, scope resolution, duplicate
//!   evaluation). Collaborators are reached only through [`core::ports`].
//! - **[`io`]**: File-backed collaborators (inventory snapshot, variables,
//!   deployment state, declared resources) plus config and rendering.
//!
//! [`detector`] ties the core together in two phases; [`check`] wires it to
//! the file-backed collaborators for the CLI.

pub mod check;
pub mod core;
pub mod detector;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
