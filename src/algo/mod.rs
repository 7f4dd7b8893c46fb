/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Module containing all path-selection algorithms.

pub mod fibonacci_heap;

pub mod shortest_paths;

pub mod reachability;

pub mod betweenness_paths;

pub mod selection;
