/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! A Fibonacci heap with decrease-key.

const NIL: usize = usize::MAX;

/// Errors returned by [`FibonacciHeap::decrease_key`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The new priority is greater than the current one.
    #[error("the new priority is greater than the current priority")]
    PriorityIncrease,
    /// The entry has already been extracted from the heap.
    #[error("the entry has already been extracted")]
    Extracted,
}

/// A handle to an entry of a [`FibonacciHeap`], returned by
/// [`insert`](FibonacciHeap::insert).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryHandle(usize);

#[derive(Debug)]
struct Node<T, P> {
    value: Option<T>,
    priority: P,
    parent: usize,
    child: usize,
    left: usize,
    right: usize,
    degree: usize,
    marked: bool,
}

/// A min-priority queue implemented as a Fibonacci heap.
///
/// Insertion and [`decrease_key`](FibonacciHeap::decrease_key) take constant
/// amortized time, and [`extract_min`](FibonacciHeap::extract_min) takes
/// logarithmic amortized time.
///
/// Nodes live in an arena and are linked by index in circular doubly-linked
/// lists; an [`EntryHandle`] is the index of its node, which doubles as an
/// insertion counter: entries with equal (or incomparable) priorities are
/// extracted in insertion order, so the extraction order is a function of
/// the sequence of operations only.
///
/// # Examples
///
/// ```
/// use graph_path_select::algo::fibonacci_heap::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let a = heap.insert('a', 10);
/// heap.insert('b', 5);
/// heap.decrease_key(a, 1).unwrap();
///
/// assert_eq!(heap.extract_min(), Some(('a', 1)));
/// assert_eq!(heap.extract_min(), Some(('b', 5)));
/// assert!(heap.is_empty());
/// ```
#[derive(Debug)]
pub struct FibonacciHeap<T, P> {
    nodes: Vec<Node<T, P>>,
    min: usize,
    len: usize,
}

impl<T, P: PartialOrd + Copy> Default for FibonacciHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: PartialOrd + Copy> FibonacciHeap<T, P> {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty heap with room for `capacity` insertions.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            min: NIL,
            len: 0,
        }
    }

    /// Returns the number of entries in the heap.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a value with the given priority.
    pub fn insert(&mut self, value: T, priority: P) -> EntryHandle {
        let x = self.nodes.len();
        self.nodes.push(Node {
            value: Some(value),
            priority,
            parent: NIL,
            child: NIL,
            left: x,
            right: x,
            degree: 0,
            marked: false,
        });
        if self.min == NIL {
            self.min = x;
        } else {
            self.splice(x, self.min);
            if self.less(x, self.min) {
                self.min = x;
            }
        }
        self.len += 1;
        EntryHandle(x)
    }

    /// Returns the current priority of an entry, or `None` if the entry
    /// has been extracted.
    pub fn priority(&self, handle: EntryHandle) -> Option<P> {
        let node = &self.nodes[handle.0];
        node.value.as_ref().map(|_| node.priority)
    }

    /// Returns the value and priority of the minimum entry without
    /// extracting it.
    pub fn peek_min(&self) -> Option<(&T, P)> {
        if self.min == NIL {
            return None;
        }
        let node = &self.nodes[self.min];
        node.value.as_ref().map(|value| (value, node.priority))
    }

    /// Lowers the priority of an entry.
    ///
    /// Setting the current priority again is allowed and does nothing.
    pub fn decrease_key(&mut self, handle: EntryHandle, priority: P) -> Result<(), HeapError> {
        let x = handle.0;
        if self.nodes[x].value.is_none() {
            return Err(HeapError::Extracted);
        }
        if priority > self.nodes[x].priority {
            return Err(HeapError::PriorityIncrease);
        }
        self.nodes[x].priority = priority;

        let parent = self.nodes[x].parent;
        if parent != NIL && self.less(x, parent) {
            self.cut(x, parent);
            self.cascading_cut(parent);
        }
        if self.less(x, self.min) {
            self.min = x;
        }
        Ok(())
    }

    /// Removes the entry with minimum priority and returns its value and
    /// priority.
    pub fn extract_min(&mut self) -> Option<(T, P)> {
        let z = self.min;
        if z == NIL {
            return None;
        }

        // Children of the minimum become roots
        let child = self.nodes[z].child;
        if child != NIL {
            for c in self.siblings(child) {
                self.unlink(c);
                self.nodes[c].parent = NIL;
                self.nodes[c].marked = false;
                self.splice(c, z);
            }
            self.nodes[z].child = NIL;
        }

        let right = self.nodes[z].right;
        self.unlink(z);
        if right == z {
            self.min = NIL;
        } else {
            self.min = right;
            self.consolidate();
        }
        self.len -= 1;

        let node = &mut self.nodes[z];
        node.value.take().map(|value| (value, node.priority))
    }

    /// Total order on nodes: priority first, insertion order second.
    #[inline(always)]
    fn less(&self, a: usize, b: usize) -> bool {
        match self.nodes[a]
            .priority
            .partial_cmp(&self.nodes[b].priority)
        {
            Some(std::cmp::Ordering::Less) => true,
            Some(std::cmp::Ordering::Greater) => false,
            _ => a < b,
        }
    }

    /// Returns the nodes of the circular list containing `start`.
    fn siblings(&self, start: usize) -> Vec<usize> {
        let mut result = vec![start];
        let mut curr = self.nodes[start].right;
        while curr != start {
            result.push(curr);
            curr = self.nodes[curr].right;
        }
        result
    }

    /// Inserts the singleton `x` to the right of `y`.
    fn splice(&mut self, x: usize, y: usize) {
        let right = self.nodes[y].right;
        self.nodes[x].left = y;
        self.nodes[x].right = right;
        self.nodes[right].left = x;
        self.nodes[y].right = x;
    }

    /// Removes `x` from its list, leaving it a singleton.
    fn unlink(&mut self, x: usize) {
        let (left, right) = (self.nodes[x].left, self.nodes[x].right);
        self.nodes[left].right = right;
        self.nodes[right].left = left;
        self.nodes[x].left = x;
        self.nodes[x].right = x;
    }

    /// Makes the root `y` a child of the root `x`.
    fn link(&mut self, y: usize, x: usize) {
        self.unlink(y);
        let child = self.nodes[x].child;
        if child == NIL {
            self.nodes[x].child = y;
        } else {
            self.splice(y, child);
        }
        self.nodes[y].parent = x;
        self.nodes[y].marked = false;
        self.nodes[x].degree += 1;
    }

    fn consolidate(&mut self) {
        let mut by_degree: Vec<usize> = Vec::new();
        for root in self.siblings(self.min) {
            let mut x = root;
            let mut degree = self.nodes[x].degree;
            loop {
                if degree >= by_degree.len() {
                    by_degree.resize(degree + 1, NIL);
                }
                let mut y = by_degree[degree];
                if y == NIL {
                    break;
                }
                if self.less(y, x) {
                    std::mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                by_degree[degree] = NIL;
                degree += 1;
            }
            by_degree[degree] = x;
        }

        self.min = NIL;
        for x in by_degree.into_iter().filter(|&x| x != NIL) {
            if self.min == NIL || self.less(x, self.min) {
                self.min = x;
            }
        }
    }

    /// Moves `x` from the children of `parent` to the root list.
    fn cut(&mut self, x: usize, parent: usize) {
        if self.nodes[parent].child == x {
            let right = self.nodes[x].right;
            self.nodes[parent].child = if right == x { NIL } else { right };
        }
        self.unlink(x);
        self.nodes[parent].degree -= 1;
        self.splice(x, self.min);
        self.nodes[x].parent = NIL;
        self.nodes[x].marked = false;
    }

    fn cascading_cut(&mut self, mut y: usize) {
        loop {
            let parent = self.nodes[y].parent;
            if parent == NIL {
                return;
            }
            if !self.nodes[y].marked {
                self.nodes[y].marked = true;
                return;
            }
            self.cut(y, parent);
            y = parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cascading_cuts_keep_heap_order() {
        let mut heap = FibonacciHeap::new();
        let handles: Vec<_> = (0..64).map(|i| heap.insert(i, 100 + i)).collect();
        // Build some trees
        assert_eq!(heap.extract_min(), Some((0, 100)));
        for (i, &handle) in handles.iter().enumerate().skip(1).step_by(3) {
            heap.decrease_key(handle, i / 2).unwrap();
        }
        let mut last = 0;
        let mut count = 0;
        while let Some((_, priority)) = heap.extract_min() {
            assert!(priority >= last);
            last = priority;
            count += 1;
        }
        assert_eq!(count, 63);
    }
}
