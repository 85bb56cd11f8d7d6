//! Circular doubly linked list over an index arena.
//!
//! Entries never move once inserted; `prev`/`next` are indices into the arena.
//! Removed slots go on a free list and are reused by later inserts.

/// One arena slot.
#[derive(Debug, Clone, Copy)]
struct Node<T> {
    value: T,
    prev: usize,
    next: usize,
}

/// A non-empty ring with a cursor ("current" entry).
///
/// Every pointer operation is O(1); rotation is O(steps).
#[derive(Debug, Clone)]
pub struct LinkedRing<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    current: usize,
    len: usize,
}

impl<T: Copy> LinkedRing<T> {
    /// A ring holding only `value`, linked to itself.
    pub fn new(value: T) -> Self {
        Self::with_capacity(value, 1)
    }

    /// Like [`LinkedRing::new`], reserving room for `capacity` entries.
    pub fn with_capacity(value: T, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(Node {
            value,
            prev: 0,
            next: 0,
        });
        Self {
            nodes,
            free: Vec::new(),
            current: 0,
            len: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; a ring keeps at least one entry.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Value under the cursor.
    pub fn current(&self) -> T {
        self.nodes[self.current].value
    }

    /// Move the cursor; positive is clockwise, negative counter-clockwise.
    pub fn rotate(&mut self, steps: isize) {
        if steps >= 0 {
            for _ in 0..steps {
                self.current = self.nodes[self.current].next;
            }
        } else {
            for _ in 0..steps.unsigned_abs() {
                self.current = self.nodes[self.current].prev;
            }
        }
    }

    /// Splice `value` directly clockwise of the cursor and move the cursor onto it.
    pub fn insert_after(&mut self, value: T) {
        let prev = self.current;
        let next = self.nodes[prev].next;
        let node = Node { value, prev, next };

        let index = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };

        self.nodes[prev].next = index;
        self.nodes[next].prev = index;
        self.current = index;
        self.len += 1;
    }

    /// Unlink the entry `offset` steps from the cursor and return its value.
    ///
    /// The cursor lands on the entry clockwise of the removed one. Returns
    /// `None` when only one entry is left.
    pub fn remove_relative(&mut self, offset: isize) -> Option<T> {
        if self.len == 1 {
            return None;
        }
        self.rotate(offset);

        let removed = self.current;
        let Node { value, prev, next } = self.nodes[removed];
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.free.push(removed);
        self.current = next;
        self.len -= 1;
        Some(value)
    }

    /// Values clockwise, starting at the cursor.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        let mut index = self.current;
        (0..self.len).map(move |_| {
            let value = self.nodes[index].value;
            index = self.nodes[index].next;
            value
        })
    }

    /// Whether every live entry satisfies `next.prev == self` and `prev.next == self`.
    pub fn is_consistent(&self) -> bool {
        let mut index = self.current;
        for _ in 0..self.len {
            let node = &self.nodes[index];
            if self.nodes[node.next].prev != index || self.nodes[node.prev].next != index {
                return false;
            }
            index = node.next;
        }
        index == self.current
    }
}
