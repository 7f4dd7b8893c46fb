/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

mod cancel;
pub use cancel::*;

mod position_set;
pub use position_set::PositionSet;

mod threadpool;
pub use threadpool::Threads;

mod workload;
pub use workload::partition;
