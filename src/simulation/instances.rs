//! Fixed-capacity instance transform buffers
//!
//! Buffers are sized once at generation time and never grow afterwards. The
//! renderer reads `live()`; the generator and traffic simulator write in place.

use super::types::InstanceTransform;

#[derive(Debug, Clone, PartialEq)]
pub struct InstanceBuffer {
    transforms: Vec<InstanceTransform>,
    count: usize,
}

impl InstanceBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            transforms: vec![InstanceTransform::default(); capacity],
            count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.transforms.len()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_full(&self) -> bool {
        self.count >= self.transforms.len()
    }

    /// Append a transform; returns `false` without writing once the buffer is full
    pub fn push(&mut self, transform: InstanceTransform) -> bool {
        if self.is_full() {
            return false;
        }
        self.transforms[self.count] = transform;
        self.count += 1;
        true
    }

    /// Overwrite the transform at `index` (must be below `count`)
    pub fn set(&mut self, index: usize, transform: InstanceTransform) {
        debug_assert!(index < self.count, "instance {index} is not live");
        self.transforms[index] = transform;
    }

    pub fn get(&self, index: usize) -> Option<&InstanceTransform> {
        self.live().get(index)
    }

    /// Mark the first `count` slots live (clamped to capacity)
    pub fn set_count(&mut self, count: usize) {
        self.count = count.min(self.transforms.len());
    }

    /// Transforms of the live instances
    pub fn live(&self) -> &[InstanceTransform] {
        &self.transforms[..self.count]
    }
}
