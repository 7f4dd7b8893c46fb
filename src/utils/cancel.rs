/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// The error returned by a computation that observed a cancellation request.
///
/// Nothing computed before the interruption is applied to the graph.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("the computation was interrupted")]
pub struct Interrupted;

/// A cooperative cancellation signal shared between a caller and the
/// workers of a computation.
///
/// Clones share the same flag. Long-running loops call
/// [`check`](CancellationToken::check) at their head and propagate the
/// resulting [`Interrupted`] with `?`.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Creates a token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. The request cannot be withdrawn.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Returns [`Interrupted`] if cancellation has been requested.
    #[inline]
    pub fn check(&self) -> Result<(), Interrupted> {
        if self.is_cancelled() {
            Err(Interrupted)
        } else {
            Ok(())
        }
    }
}
