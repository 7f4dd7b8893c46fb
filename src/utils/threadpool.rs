/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/// The number of threads available to a parallel phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threads {
    /// The available hardware parallelism minus one (the controlling thread),
    /// but at least one.
    Default,
    /// A fixed number of threads (zero is treated as one).
    NumThreads(usize),
}

impl Threads {
    /// Returns the number of threads this value stands for.
    pub fn num_threads(self) -> usize {
        match self {
            Self::Default => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .saturating_sub(1)
                .max(1),
            Self::NumThreads(num_threads) => num_threads.max(1),
        }
    }

    /// Builds a thread pool whose threads are named after `phase`.
    pub fn build(self, phase: &'static str) -> rayon::ThreadPool {
        let num_threads = self.num_threads();
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(move |index| format!("{}-{}", phase, index))
            .build()
            .unwrap_or_else(|_| {
                panic!(
                    "Should be able to build custom threadpool with {} threads",
                    num_threads
                )
            })
    }
}

impl Default for Threads {
    fn default() -> Self {
        Self::Default
    }
}
