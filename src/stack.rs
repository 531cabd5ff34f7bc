//! Fixed-capacity stack of matrices for hierarchical transforms.

use crate::matrix4::Matrix4;
use anyhow::{Result, bail};

/// A current matrix together with a bounded stack of saved matrices.
///
/// [`Self::push`] saves a copy of the current matrix so that it can be
/// modified while traversing into a child node, and [`Self::pop`] restores
/// it afterwards. The storage for all saved matrices is allocated up front.
#[derive(Clone, Debug, PartialEq)]
pub struct MatrixStack {
    current: Matrix4,
    saved: Vec<Matrix4>,
    capacity: usize,
}

impl MatrixStack {
    /// Creates a stack with the identity as current matrix that can hold up
    /// to `capacity` saved matrices.
    pub fn new(capacity: usize) -> Self {
        Self {
            current: Matrix4::identity(),
            saved: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn current(&self) -> &Matrix4 {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut Matrix4 {
        &mut self.current
    }

    pub fn set_current(&mut self, matrix: Matrix4) {
        self.current = matrix;
    }

    /// Post-multiplies the current matrix by the given matrix, so that it is
    /// applied before the transforms already in the current matrix.
    pub fn apply(&mut self, matrix: &Matrix4) {
        self.current = self.current.product(matrix);
    }

    /// The number of saved matrices.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Saves a copy of the current matrix.
    ///
    /// # Errors
    /// Returns an error if the stack already holds `capacity` matrices.
    pub fn push(&mut self) -> Result<()> {
        if self.saved.len() == self.capacity {
            log::warn!("Matrix stack overflow at capacity {}", self.capacity);
            bail!(
                "Tried to push onto a matrix stack already holding {} matrices",
                self.capacity
            );
        }
        self.saved.push(self.current);
        Ok(())
    }

    /// Replaces the current matrix with the most recently saved one.
    ///
    /// # Errors
    /// Returns an error if no matrix is saved.
    pub fn pop(&mut self) -> Result<()> {
        let Some(matrix) = self.saved.pop() else {
            log::warn!("Matrix stack underflow");
            bail!("Tried to pop from an empty matrix stack");
        };
        self.current = matrix;
        Ok(())
    }

    /// Discards all saved matrices and resets the current matrix to the
    /// identity.
    pub fn clear(&mut self) {
        self.saved.clear();
        self.current = Matrix4::identity();
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new(32)
    }
}
