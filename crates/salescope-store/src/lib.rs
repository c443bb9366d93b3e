// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Explicit store handle. Every read goes through a [`StoreSession`] that is
//! opened read-only for one call scope and closed on drop.

mod deadline;
mod error;
mod session;

pub use deadline::QueryDeadline;
pub use error::StoreError;
pub use session::{SalesStore, StoreConfig, StoreSession};

pub const CRATE_NAME: &str = "salescope-store";
