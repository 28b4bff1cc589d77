use std::collections::BinaryHeap;

/// Pending scanlines, popped from the largest y down.
pub struct Scanbeam {
    heap: BinaryHeap<i64>,
}

impl Scanbeam {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    pub fn insert(&mut self, y: i64) {
        self.heap.push(y);
    }

    pub fn pop(&mut self) -> Option<i64> {
        let y = self.heap.pop()?;

        while self.heap.peek() == Some(&y) {
            self.heap.pop();
        }

        Some(y)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clean(&mut self) {
        self.heap.clear();
    }
}

impl Default for Scanbeam {
    fn default() -> Self {
        Self::new()
    }
}
