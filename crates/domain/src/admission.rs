// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The admission decision: confirmed or waitlisted.
//!
//! This is a pure function over the event capacity and the current
//! confirmed count. The caller is responsible for reading the count and
//! writing the resulting row inside a single database transaction so the
//! count reflects a consistent snapshot relative to the write.

use crate::types::{Capacity, RegistrationStatus};

/// Decides the initial status of a new registration.
///
/// An unlimited capacity (zero) always admits as `Confirmed`. Otherwise
/// the registration is `Confirmed` while confirmed seats remain below the
/// limit, and `Waitlist` once the limit is reached.
///
/// # Arguments
///
/// * `capacity` - The event's seat limit
/// * `confirmed_count` - The current number of confirmed registrations
#[must_use]
pub const fn decide_admission(capacity: Capacity, confirmed_count: u32) -> RegistrationStatus {
    if has_open_slot(capacity, confirmed_count) {
        RegistrationStatus::Confirmed
    } else {
        RegistrationStatus::Waitlist
    }
}

/// Returns whether the event can seat one more confirmed registration.
///
/// Used both at admission time and when deciding whether a cancellation
/// freed a slot for waitlist promotion.
#[must_use]
pub const fn has_open_slot(capacity: Capacity, confirmed_count: u32) -> bool {
    capacity.is_unlimited() || confirmed_count < capacity.limit()
}
