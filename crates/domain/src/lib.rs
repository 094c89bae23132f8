// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod admission;
mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use admission::{decide_admission, has_open_slot};
pub use error::DomainError;
pub use types::{Capacity, EventLifecycle, ReactionKind, RegistrationStatus, Role};
pub use validation::{
    validate_capacity, validate_email, validate_event_title, validate_quantity, validate_username,
};
