// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations, one module per entity.
//!
//! The registration mutations are the heart of the service: admission and
//! cancellation-with-promotion each run inside a single immediate
//! transaction so the capacity check and the write it guards cannot be
//! interleaved with a concurrent writer.

pub mod events;
pub mod reactions;
pub mod registrations;
pub mod sessions;
pub mod users;

pub use registrations::CancellationOutcome;
