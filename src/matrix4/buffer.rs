//! Column-major packing into flat buffers.

use super::Matrix4;
use crate::buffer::{read_elements, write_elements};
use anyhow::Result;

impl Matrix4 {
    /// The 16 elements in column-major order, narrowed to `f32`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_cols_array_f32(&self) -> [f32; 16] {
        self.to_cols_array().map(|value| value as f32)
    }

    /// The raw bytes of the 16 column-major elements.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.cols)
    }

    /// Writes the 16 elements in column-major order into `dest` starting at
    /// `offset`.
    ///
    /// # Errors
    /// Returns an error if `dest` has fewer than `offset + 16` elements.
    pub fn write_to_slice(&self, dest: &mut [f64], offset: usize) -> Result<()> {
        write_elements(&self.to_cols_array(), dest, offset)
    }

    /// Like [`Self::write_to_slice`], but narrows each element to `f32`.
    ///
    /// # Errors
    /// Returns an error if `dest` has fewer than `offset + 16` elements.
    pub fn write_to_slice_f32(&self, dest: &mut [f32], offset: usize) -> Result<()> {
        write_elements(&self.to_cols_array(), dest, offset)
    }

    /// Writes the 16 elements in row-major order into `dest` starting at
    /// `offset`.
    ///
    /// # Errors
    /// Returns an error if `dest` has fewer than `offset + 16` elements.
    pub fn write_transposed_to_slice(&self, dest: &mut [f64], offset: usize) -> Result<()> {
        write_elements(&self.transposed().to_cols_array(), dest, offset)
    }

    /// # Errors
    /// Returns an error if `dest` has fewer than `offset + 16` elements.
    pub fn write_transposed_to_slice_f32(&self, dest: &mut [f32], offset: usize) -> Result<()> {
        write_elements(&self.transposed().to_cols_array(), dest, offset)
    }

    /// Writes the first three rows of each column, 12 elements in total,
    /// into `dest` starting at `offset`. This is the layout of an affine
    /// matrix with its constant last row dropped.
    ///
    /// # Errors
    /// Returns an error if `dest` has fewer than `offset + 12` elements.
    pub fn write_4x3_to_slice(&self, dest: &mut [f64], offset: usize) -> Result<()> {
        write_elements(&self.to_4x3_array(), dest, offset)
    }

    /// # Errors
    /// Returns an error if `dest` has fewer than `offset + 12` elements.
    pub fn write_4x3_to_slice_f32(&self, dest: &mut [f32], offset: usize) -> Result<()> {
        write_elements(&self.to_4x3_array(), dest, offset)
    }

    /// Reads 16 elements in column-major order from `src` starting at
    /// `offset` and classifies the result.
    ///
    /// # Errors
    /// Returns an error if `src` has fewer than `offset + 16` elements.
    pub fn read_from_slice(src: &[f64], offset: usize) -> Result<Self> {
        read_elements(src, offset).map(|elements| Self::from_cols_array(&elements))
    }

    /// # Errors
    /// Returns an error if `src` has fewer than `offset + 16` elements.
    pub fn read_from_slice_f32(src: &[f32], offset: usize) -> Result<Self> {
        read_elements(src, offset).map(|elements| Self::from_cols_array(&elements))
    }

    /// Reads 16 elements in row-major order from `src` starting at `offset`
    /// and classifies the result.
    ///
    /// # Errors
    /// Returns an error if `src` has fewer than `offset + 16` elements.
    pub fn read_transposed_from_slice(src: &[f64], offset: usize) -> Result<Self> {
        Self::read_from_slice(src, offset).map(|matrix| matrix.transposed().classified())
    }

    fn to_4x3_array(&self) -> [f64; 12] {
        let [c0, c1, c2, c3] = self.cols;
        [
            c0[0], c0[1], c0[2], c1[0], c1[1], c1[2], c2[0], c2[1], c2[2], c3[0], c3[1], c3[2],
        ]
    }

    fn classified(mut self) -> Self {
        self.determine_properties();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MatrixProperties, angle::Degrees, vector::Vector3};

    fn sequential() -> Matrix4 {
        Matrix4::from_cols_array(&std::array::from_fn(|idx| idx as f64))
    }

    #[test]
    fn writing_matrix4_is_column_major() {
        let m = sequential();
        let mut dest = [-1.0; 18];
        m.write_to_slice(&mut dest, 1).unwrap();
        assert_eq!(dest[0], -1.0);
        assert_eq!(dest[17], -1.0);
        for (idx, value) in dest[1..17].iter().enumerate() {
            assert_eq!(*value, idx as f64);
        }
        assert_eq!(m.element(3, 1), dest[1 + 13]);
    }

    #[test]
    fn writing_transposed_matrix4_is_row_major() {
        let m = sequential();
        let mut dest = [0.0_f32; 16];
        m.write_transposed_to_slice_f32(&mut dest, 0).unwrap();
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(f64::from(dest[4 * row + col]), m.element(col, row));
            }
        }
        let mut dest_f64 = [0.0; 16];
        m.write_transposed_to_slice(&mut dest_f64, 0).unwrap();
        assert_eq!(Matrix4::read_transposed_from_slice(&dest_f64, 0).unwrap(), m);
    }

    #[test]
    fn narrowed_elements_match_f32_array() {
        let m = Matrix4::from_translation(&Vector3::new(0.1, 0.2, 0.3)).rotated_x(Degrees(10.0));
        let mut dest = [0.0_f32; 16];
        m.write_to_slice_f32(&mut dest, 0).unwrap();
        assert_eq!(dest, m.to_cols_array_f32());
        assert_eq!(bytemuck::cast_slice::<u8, f64>(m.as_bytes()), &m.to_cols_array());
    }

    #[test]
    fn writing_4x3_drops_last_row() {
        let m = sequential();
        let mut dest = [0.0; 12];
        m.write_4x3_to_slice(&mut dest, 0).unwrap();
        assert_eq!(
            dest,
            [0.0, 1.0, 2.0, 4.0, 5.0, 6.0, 8.0, 9.0, 10.0, 12.0, 13.0, 14.0]
        );
        let mut dest_f32 = [0.0_f32; 12];
        assert!(m.write_4x3_to_slice_f32(&mut dest_f32, 1).is_err());
    }

    #[test]
    fn reading_classifies_matrix() {
        let translation = Matrix4::from_translation(&Vector3::new(1.0, 2.0, 3.0));
        let mut dest = [0.0_f32; 20];
        translation.write_to_slice_f32(&mut dest, 4).unwrap();
        let read = Matrix4::read_from_slice_f32(&dest, 4).unwrap();
        assert_eq!(read, translation);
        assert_eq!(read.properties(), translation.properties());

        let mut row_major = [0.0; 16];
        translation.write_transposed_to_slice(&mut row_major, 0).unwrap();
        let read = Matrix4::read_transposed_from_slice(&row_major, 0).unwrap();
        assert!(read.properties().contains(MatrixProperties::TRANSLATION));
    }

    #[test]
    fn out_of_range_buffers_are_rejected() {
        let m = Matrix4::identity();
        let mut short = [0.0; 15];
        assert!(m.write_to_slice(&mut short, 0).is_err());
        assert!(m.write_transposed_to_slice(&mut [0.0; 16], 1).is_err());
        assert!(Matrix4::read_from_slice(&short, 0).is_err());
        assert!(Matrix4::read_from_slice_f32(&[0.0; 16], 1).is_err());
        assert!(Matrix4::read_transposed_from_slice(&[0.0; 16], 1).is_err());
    }
}
