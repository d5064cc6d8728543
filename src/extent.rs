//! Array extents, hypercube grid arithmetic, and borrowed array views.

use crate::error::{Error, Result};

/// Number of values in one hypercube, for every supported dimensionality.
pub const HYPERCUBE_ELEMENTS: usize = 4096;

/// Maximum supported dimensionality.
pub const MAX_DIMS: usize = 3;

/// Returns the hypercube side length for `dims` dimensions, chosen so that
/// the hypercube always holds [`HYPERCUBE_ELEMENTS`] values.
///
/// # Examples
///
/// ```
/// use hczip::extent::side_length;
///
/// assert_eq!(side_length(1), 4096);
/// assert_eq!(side_length(2), 64);
/// assert_eq!(side_length(3), 16);
/// ```
///
/// # Panics
///
/// It will panic if `dims` is not in `1..=3`.
pub const fn side_length(dims: usize) -> usize {
    match dims {
        1 => 4096,
        2 => 64,
        3 => 16,
        _ => panic!("dimensionality must be 1, 2, or 3"),
    }
}

/// Shape of an input array: dimensionality and per-axis lengths in
/// first-major order (the first axis varies slowest in memory).
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use hczip::Extent;
///
/// let e = Extent::new(&[100, 70])?;
/// assert_eq!(e.dims(), 2);
/// assert_eq!(e.num_elements(), 7000);
/// assert_eq!(e.num_hypercubes(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    dims: usize,
    lengths: [usize; MAX_DIMS],
}

impl Extent {
    /// Creates a new extent from per-axis lengths in first-major order.
    ///
    /// # Errors
    ///
    /// An error is returned if the number of axes is not in `1..=3` or if
    /// any axis length is zero.
    pub fn new(lengths: &[usize]) -> Result<Self> {
        if lengths.is_empty() || lengths.len() > MAX_DIMS {
            return Err(Error::BadExtent(format!(
                "dimensionality must be in 1..=3, but got {}",
                lengths.len()
            )));
        }
        if let Some(axis) = lengths.iter().position(|&n| n == 0) {
            return Err(Error::BadExtent(format!("axis {axis} has length zero")));
        }
        let mut padded = [0; MAX_DIMS];
        padded[..lengths.len()].copy_from_slice(lengths);
        Ok(Self {
            dims: lengths.len(),
            lengths: padded,
        })
    }

    /// Returns the dimensionality.
    #[inline]
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Returns the length of `axis` (0-based, first-major).
    #[inline]
    pub fn length(&self, axis: usize) -> usize {
        debug_assert!(axis < self.dims);
        self.lengths[axis]
    }

    /// Returns the total number of values in the array.
    pub fn num_elements(&self) -> usize {
        self.lengths[..self.dims].iter().product()
    }

    /// Returns the hypercube side length for this dimensionality.
    #[inline]
    pub fn side_length(&self) -> usize {
        side_length(self.dims)
    }

    /// Returns the number of whole hypercubes along `axis`.
    #[inline]
    pub fn grid(&self, axis: usize) -> usize {
        self.length(axis) / self.side_length()
    }

    /// Returns the length of the hypercube-covered prefix along `axis`.
    #[inline]
    pub fn trimmed(&self, axis: usize) -> usize {
        self.grid(axis) * self.side_length()
    }

    /// Returns the total number of whole hypercubes in the array.
    pub fn num_hypercubes(&self) -> usize {
        (0..self.dims).map(|a| self.grid(a)).product()
    }

    /// Returns the number of values outside every whole hypercube.
    pub fn num_border_elements(&self) -> usize {
        self.num_elements() - self.num_hypercubes() * HYPERCUBE_ELEMENTS
    }

    /// Returns the array coordinates of the origin of hypercube `index`,
    /// decomposing the index in first-major order over the hypercube grid.
    pub fn hypercube_origin(&self, index: usize) -> [usize; MAX_DIMS] {
        debug_assert!(index < self.num_hypercubes());
        let s = self.side_length();
        let mut origin = [0; MAX_DIMS];
        let mut rest = index;
        for axis in (0..self.dims).rev() {
            let g = self.grid(axis);
            origin[axis] = (rest % g) * s;
            rest /= g;
        }
        origin
    }
}

/// A read-only view of a dense array together with its extent.
///
/// The data is borrowed for the duration of a compression call; the codec
/// never mutates it.
#[derive(Debug, Clone, Copy)]
pub struct Slice<'a, T> {
    data: &'a [T],
    extent: Extent,
}

impl<'a, T> Slice<'a, T> {
    /// Wraps `data` with `extent`.
    ///
    /// # Errors
    ///
    /// An error is returned if `data.len()` differs from
    /// `extent.num_elements()`.
    pub fn new(data: &'a [T], extent: Extent) -> Result<Self> {
        if data.len() != extent.num_elements() {
            return Err(Error::BadExtent(format!(
                "extent covers {} elements, but the slice holds {}",
                extent.num_elements(),
                data.len()
            )));
        }
        Ok(Self { data, extent })
    }

    /// Returns the underlying data.
    #[inline]
    pub fn data(&self) -> &'a [T] {
        self.data
    }

    /// Returns the extent.
    #[inline]
    pub fn extent(&self) -> Extent {
        self.extent
    }
}

/// An exclusively borrowed view of a dense array together with its extent,
/// used as the destination of a decompression call.
#[derive(Debug)]
pub struct SliceMut<'a, T> {
    data: &'a mut [T],
    extent: Extent,
}

impl<'a, T> SliceMut<'a, T> {
    /// Wraps `data` with `extent`.
    ///
    /// # Errors
    ///
    /// An error is returned if `data.len()` differs from
    /// `extent.num_elements()`.
    pub fn new(data: &'a mut [T], extent: Extent) -> Result<Self> {
        if data.len() != extent.num_elements() {
            return Err(Error::BadExtent(format!(
                "extent covers {} elements, but the slice holds {}",
                extent.num_elements(),
                data.len()
            )));
        }
        Ok(Self { data, extent })
    }

    /// Returns the underlying data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        self.data
    }

    /// Returns the extent.
    #[inline]
    pub fn extent(&self) -> Extent {
        self.extent
    }
}
