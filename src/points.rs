use crate::error::KMeansError;
use ndarray::{ArrayView1, ArrayView2, Axis};

/// Read-only view over `M` points of a fixed dimension `N`.
///
/// The underlying storage stays owned by the caller; the engines only ever
/// borrow it, so one `PointSet` can be shared by every worker of the parallel
/// engine without copying.
#[derive(Debug, Clone, Copy)]
pub struct PointSet<'a> {
    data: ArrayView2<'a, f32>,
}

impl<'a> PointSet<'a> {
    /// Wrap a 2D view of shape (n_points, dim).
    pub fn new(data: ArrayView2<'a, f32>) -> Self {
        Self { data }
    }

    /// Build a point set from a flat row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if `dim` is 0 or the buffer length is not a
    /// multiple of `dim`.
    pub fn from_slice(flat: &'a [f32], dim: usize) -> Result<Self, KMeansError> {
        if dim == 0 || flat.len() % dim != 0 {
            return Err(KMeansError::InvalidDimensions(format!(
                "buffer of length {} cannot hold points of dimension {}",
                flat.len(),
                dim
            )));
        }

        let data = ArrayView2::from_shape((flat.len() / dim, dim), flat)
            .map_err(|e| KMeansError::InvalidDimensions(e.to_string()))?;
        Ok(Self { data })
    }

    /// Number of points
    #[inline]
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    /// Dimension shared by every point
    #[inline]
    pub fn dim(&self) -> usize {
        self.data.ncols()
    }

    #[inline]
    pub fn point(&self, index: usize) -> ArrayView1<'a, f32> {
        self.data.index_axis_move(Axis(0), index)
    }

    /// Contiguous sub-range of points, used to hand each worker its own chunk.
    pub fn range(&self, start: usize, end: usize) -> PointSet<'a> {
        Self {
            data: self.data.slice_move(ndarray::s![start..end, ..]),
        }
    }

    pub fn view(&self) -> ArrayView2<'a, f32> {
        self.data
    }
}

impl<'a> From<ArrayView2<'a, f32>> for PointSet<'a> {
    fn from(data: ArrayView2<'a, f32>) -> Self {
        Self::new(data)
    }
}
