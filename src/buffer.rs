//! Packing of matrices into flat element buffers, such as the staging
//! memory of a uniform buffer.

use crate::{matrix3::Matrix3, matrix3x2::Matrix3x2};
use anyhow::{Result, bail};

/// An element type that matrices can be written to and read from. `f32`
/// elements are narrowed on write and widened on read.
pub trait BufferElement: Copy {
    fn from_f64(value: f64) -> Self;

    fn to_f64(self) -> f64;
}

impl BufferElement for f64 {
    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

impl BufferElement for f32 {
    #[allow(clippy::cast_possible_truncation)]
    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

/// Writes the given elements into `dest` starting at `offset`.
///
/// # Errors
/// Returns an error if `dest` has fewer than `offset + N` elements.
pub fn write_elements<T: BufferElement, const N: usize>(
    elements: &[f64; N],
    dest: &mut [T],
    offset: usize,
) -> Result<()> {
    let range = checked_range(dest.len(), offset, N)?;
    for (target, &value) in dest[range].iter_mut().zip(elements) {
        *target = T::from_f64(value);
    }
    Ok(())
}

/// Reads `N` elements from `src` starting at `offset`.
///
/// # Errors
/// Returns an error if `src` has fewer than `offset + N` elements.
pub fn read_elements<T: BufferElement, const N: usize>(
    src: &[T],
    offset: usize,
) -> Result<[f64; N]> {
    let range = checked_range(src.len(), offset, N)?;
    let src = &src[range];
    Ok(std::array::from_fn(|idx| src[idx].to_f64()))
}

fn checked_range(len: usize, offset: usize, count: usize) -> Result<std::ops::Range<usize>> {
    match offset.checked_add(count) {
        Some(end) if end <= len => Ok(offset..end),
        _ => bail!(
            "Buffer of {} elements too short for {} elements at offset {}",
            len,
            count,
            offset
        ),
    }
}

impl Matrix3 {
    /// Writes the 9 elements in column-major order into `dest` starting at
    /// `offset`.
    ///
    /// # Errors
    /// Returns an error if `dest` is too short.
    pub fn write_to_slice(&self, dest: &mut [f64], offset: usize) -> Result<()> {
        write_elements(&self.to_cols_array(), dest, offset)
    }

    /// Like [`Self::write_to_slice`], but narrows each element to `f32`.
    ///
    /// # Errors
    /// Returns an error if `dest` is too short.
    pub fn write_to_slice_f32(&self, dest: &mut [f32], offset: usize) -> Result<()> {
        write_elements(&self.to_cols_array(), dest, offset)
    }

    /// Reads 9 elements in column-major order from `src` starting at
    /// `offset`.
    ///
    /// # Errors
    /// Returns an error if `src` is too short.
    pub fn read_from_slice(src: &[f64], offset: usize) -> Result<Self> {
        let elements: [f64; 9] = read_elements(src, offset)?;
        Ok(Self::from_cols_array_2d(bytemuck::cast(elements)))
    }

    /// # Errors
    /// Returns an error if `src` is too short.
    pub fn read_from_slice_f32(src: &[f32], offset: usize) -> Result<Self> {
        let elements: [f64; 9] = read_elements(src, offset)?;
        Ok(Self::from_cols_array_2d(bytemuck::cast(elements)))
    }
}

impl Matrix3x2 {
    /// Writes the 6 elements in column-major order into `dest` starting at
    /// `offset`.
    ///
    /// # Errors
    /// Returns an error if `dest` is too short.
    pub fn write_to_slice(&self, dest: &mut [f64], offset: usize) -> Result<()> {
        write_elements(&self.to_cols_array(), dest, offset)
    }

    /// # Errors
    /// Returns an error if `dest` is too short.
    pub fn write_to_slice_f32(&self, dest: &mut [f32], offset: usize) -> Result<()> {
        write_elements(&self.to_cols_array(), dest, offset)
    }

    /// Reads 6 elements in column-major order from `src` starting at
    /// `offset`.
    ///
    /// # Errors
    /// Returns an error if `src` is too short.
    pub fn read_from_slice(src: &[f64], offset: usize) -> Result<Self> {
        let elements: [f64; 6] = read_elements(src, offset)?;
        Ok(Self::from_cols_array_2d(bytemuck::cast(elements)))
    }

    /// # Errors
    /// Returns an error if `src` is too short.
    pub fn read_from_slice_f32(src: &[f32], offset: usize) -> Result<Self> {
        let elements: [f64; 6] = read_elements(src, offset)?;
        Ok(Self::from_cols_array_2d(bytemuck::cast(elements)))
    }
}
