//! Placement of a local array within a global grid.
//!
//! The grid-management layer owns decomposition; this module only records
//! it so a field can say which part of the global index space it holds.
//! Elementwise operations act on the local array and never consult it.

use smallvec::SmallVec;

use crate::error::FieldError;

type Extents = SmallVec<[usize; 4]>;

/// Where a field's local array sits in the global grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decomposition {
    global_shape: Extents,
    offset: Extents,
    tile: u32,
    tile_count: u32,
}

impl Decomposition {
    /// The local array is the whole grid.
    pub fn whole(shape: &[usize]) -> Self {
        Self {
            global_shape: shape.iter().copied().collect(),
            offset: SmallVec::from_elem(0, shape.len()),
            tile: 0,
            tile_count: 1,
        }
    }

    /// The local array is tile `tile` of `tile_count`, starting at `offset`
    /// in a grid of extents `global_shape`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidDecomposition`] if the ranks differ or
    /// `tile` is out of range.
    pub fn tiled(
        global_shape: &[usize],
        offset: &[usize],
        tile: u32,
        tile_count: u32,
    ) -> Result<Self, FieldError> {
        if global_shape.len() != offset.len() {
            return Err(FieldError::InvalidDecomposition {
                reason: format!(
                    "offset rank {} does not match grid rank {}",
                    offset.len(),
                    global_shape.len()
                ),
            });
        }
        if tile >= tile_count {
            return Err(FieldError::InvalidDecomposition {
                reason: format!("tile {tile} out of range for {tile_count} tile(s)"),
            });
        }
        Ok(Self {
            global_shape: global_shape.iter().copied().collect(),
            offset: offset.iter().copied().collect(),
            tile,
            tile_count,
        })
    }

    /// Check that a local array of `local_shape` fits at this offset.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidDecomposition`] on a rank mismatch or if
    /// the local block extends past the global grid.
    pub fn check(&self, local_shape: &[usize]) -> Result<(), FieldError> {
        if local_shape.len() != self.global_shape.len() {
            return Err(FieldError::InvalidDecomposition {
                reason: format!(
                    "local rank {} does not match grid rank {}",
                    local_shape.len(),
                    self.global_shape.len()
                ),
            });
        }
        for (axis, ((&n, &off), &global)) in local_shape
            .iter()
            .zip(&self.offset)
            .zip(&self.global_shape)
            .enumerate()
        {
            if off.checked_add(n).is_none_or(|end| end > global) {
                return Err(FieldError::InvalidDecomposition {
                    reason: format!(
                        "axis {axis}: local block of {n} at offset {off} exceeds global extent {global}"
                    ),
                });
            }
        }
        Ok(())
    }

    /// Extents of the global grid.
    pub fn global_shape(&self) -> &[usize] {
        &self.global_shape
    }

    /// Global index of the local array's first element, per axis.
    pub fn offset(&self) -> &[usize] {
        &self.offset
    }

    /// Index of this tile.
    pub fn tile(&self) -> u32 {
        self.tile
    }

    /// Total number of tiles the grid is split into.
    pub fn tile_count(&self) -> u32 {
        self.tile_count
    }

    /// Returns `true` if the local array covers the whole grid.
    pub fn is_whole(&self) -> bool {
        self.tile_count == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn whole_fits_its_own_shape() {
        let d = Decomposition::whole(&[4, 3]);
        assert!(d.is_whole());
        assert_eq!(d.offset(), &[0, 0]);
        assert!(d.check(&[4, 3]).is_ok());
        assert!(d.check(&[5, 3]).is_err());
    }

    #[test]
    fn tile_bounds_are_checked() {
        let d = Decomposition::tiled(&[8, 2], &[6, 0], 3, 4).unwrap();
        assert!(d.check(&[2, 2]).is_ok());
        assert!(d.check(&[3, 2]).is_err());
        assert!(d.check(&[2]).is_err());
    }

    #[test]
    fn tiled_rejects_bad_metadata() {
        assert!(Decomposition::tiled(&[8, 2], &[0], 0, 1).is_err());
        assert!(Decomposition::tiled(&[8], &[0], 2, 2).is_err());
    }

    #[test]
    fn offset_near_usize_max_is_rejected_not_overflowed() {
        let d = Decomposition::tiled(&[4], &[usize::MAX], 0, 1).unwrap();
        assert!(matches!(
            d.check(&[1]),
            Err(FieldError::InvalidDecomposition { .. })
        ));
        let f = crate::Field::from_shape_vec("t", &[1], vec![0.0f32]).unwrap();
        assert!(f.with_decomposition(d).is_err());
    }

    proptest! {
        #[test]
        fn row_block_fits_iff_within_grid(
            rows in 1usize..64,
            cols in 1usize..8,
            off in 0usize..64,
            n in 0usize..64,
        ) {
            let d = Decomposition::tiled(&[rows, cols], &[off, 0], 0, 2).unwrap();
            prop_assert_eq!(d.check(&[n, cols]).is_ok(), off + n <= rows);
        }
    }
}
