//! A runtime-sized bit grid packed into unsigned words.
//!
//! Cells are stored in row-major order, `T::BITS` cells per word, so a
//! 16×16 level fits in four `u64` words. The type is `no_std` friendly and
//! only needs `alloc` for its word buffer. Every boolean field the analyzer
//! produces (obstacles, barriers, blocked, reachable, flooded) is a `BitGrid`.

use alloc::vec::Vec;
use core::ops::{BitAndAssign, BitOrAssign, Not};
use core::{any, fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

/// Errors returned by fallible bit grid accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// Row or column index is outside `[0..height) × [0..width)`.
    IndexOutOfBounds { row: usize, col: usize },
    /// Two grids of different shapes were combined.
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskError::IndexOutOfBounds { row, col } => {
                write!(f, "IndexOutOfBounds: row={}, col={}", row, col)
            }
            MaskError::DimensionMismatch { expected, actual } => write!(
                f,
                "DimensionMismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
        }
    }
}

/// A `width × height` field of bits stored in words of type `T`.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BitGrid<T>
where
    T: PrimInt + Unsigned + Zero,
{
    width: usize,
    height: usize,
    words: Vec<T>,
}

impl<T> BitGrid<T>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn word_bits() -> usize {
        mem::size_of::<T>() * 8
    }

    #[inline]
    fn locate(idx: usize) -> (usize, T) {
        let bits = Self::word_bits();
        (idx / bits, T::one() << (idx % bits))
    }

    /// Create an empty grid (all bits cleared).
    pub fn new(width: usize, height: usize) -> Self {
        let words = (width * height).div_ceil(Self::word_bits());
        BitGrid {
            width,
            height,
            words: alloc::vec![T::zero(); words],
        }
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells (`width * height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Returns the number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no bits are set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| w.is_zero())
    }

    /// Row-major index of `(row, col)`, or `None` when out of range.
    #[inline]
    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.height && col < self.width {
            Some(row * self.width + col)
        } else {
            None
        }
    }

    /// Tests the bit at a row-major index. Out-of-range indices read as clear.
    #[inline]
    pub fn contains_index(&self, idx: usize) -> bool {
        if idx >= self.len() {
            return false;
        }
        let (word, bit) = Self::locate(idx);
        (self.words[word] & bit) != T::zero()
    }

    /// Sets the bit at a row-major index. Returns `true` only if the bit was
    /// previously clear and the index is in range.
    #[inline]
    pub fn insert_index(&mut self, idx: usize) -> bool {
        if idx >= self.len() {
            return false;
        }
        let (word, bit) = Self::locate(idx);
        let was_set = (self.words[word] & bit) != T::zero();
        self.words[word] = self.words[word] | bit;
        !was_set
    }

    /// Clears the bit at a row-major index. Returns `true` if it was set.
    #[inline]
    pub fn remove_index(&mut self, idx: usize) -> bool {
        if idx >= self.len() {
            return false;
        }
        let (word, bit) = Self::locate(idx);
        let was_set = (self.words[word] & bit) != T::zero();
        self.words[word] = self.words[word] & !bit;
        was_set
    }

    /// Tests the bit at (row, col); out-of-range coordinates read as clear.
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.index_of(row, col)
            .is_some_and(|idx| self.contains_index(idx))
    }

    /// Gets the bit at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<bool, MaskError> {
        let idx = self.check_bounds(row, col)?;
        Ok(self.contains_index(idx))
    }

    /// Sets the bit at (row, col) to 1.
    pub fn set(&mut self, row: usize, col: usize) -> Result<(), MaskError> {
        let idx = self.check_bounds(row, col)?;
        self.insert_index(idx);
        Ok(())
    }

    /// Clears the bit at (row, col) to 0.
    pub fn clear(&mut self, row: usize, col: usize) -> Result<(), MaskError> {
        let idx = self.check_bounds(row, col)?;
        self.remove_index(idx);
        Ok(())
    }

    /// Toggles the bit at (row, col).
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<(), MaskError> {
        let idx = self.check_bounds(row, col)?;
        let (word, bit) = Self::locate(idx);
        self.words[word] = self.words[word] ^ bit;
        Ok(())
    }

    /// Sets every cell bit to `1`.
    pub fn fill(&mut self) {
        for word in self.words.iter_mut() {
            *word = !T::zero();
        }
        self.trim_tail();
    }

    /// Clears all bits to `0`.
    pub fn clear_all(&mut self) {
        for word in self.words.iter_mut() {
            *word = T::zero();
        }
    }

    /// Resizes to `width × height` and clears every bit, keeping the
    /// allocation when it is large enough.
    pub fn reset(&mut self, width: usize, height: usize) {
        let words = (width * height).div_ceil(Self::word_bits());
        self.width = width;
        self.height = height;
        self.words.clear();
        self.words.resize(words, T::zero());
    }

    /// Overwrites `self` with the contents of `other`, reusing the buffer.
    pub fn copy_from(&mut self, other: &Self) {
        self.width = other.width;
        self.height = other.height;
        self.words.clear();
        self.words.extend_from_slice(&other.words);
    }

    /// Returns true if both grids have the same dimensions.
    #[inline]
    pub fn same_shape(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Errors with `DimensionMismatch` unless both grids share a shape.
    pub fn check_shape(&self, other: &Self) -> Result<(), MaskError> {
        if self.same_shape(other) {
            Ok(())
        } else {
            Err(MaskError::DimensionMismatch {
                expected: (self.width, self.height),
                actual: (other.width, other.height),
            })
        }
    }

    #[inline]
    fn check_bounds(&self, row: usize, col: usize) -> Result<usize, MaskError> {
        self.index_of(row, col)
            .ok_or(MaskError::IndexOutOfBounds { row, col })
    }

    // Bits past `len()` in the last word must stay clear for `count_ones`.
    fn trim_tail(&mut self) {
        let used = self.len() % Self::word_bits();
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last = *last & ((T::one() << used) - T::one());
            }
        }
    }

    /// Creates a grid from an iterator over `(row, col)` positions.
    pub fn from_iter<I>(width: usize, height: usize, iter: I) -> Result<Self, MaskError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut grid = Self::new(width, height);
        for (r, c) in iter {
            grid.set(r, c)?;
        }
        Ok(grid)
    }

    /// Iterator over the `(row, col)` positions of set bits, row-major.
    #[inline]
    pub fn iter_set_bits(&self) -> SetBits<'_, T> {
        SetBits { grid: self, idx: 0 }
    }

    /// Iterator over the row-major indices of set bits.
    pub fn iter_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(move |&idx| self.contains_index(idx))
    }

    /// One `bool` per cell, row-major.
    pub fn to_bools(&self) -> Vec<bool> {
        (0..self.len()).map(|idx| self.contains_index(idx)).collect()
    }
}

impl<T> fmt::Debug for BitGrid<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "BitGrid<{}> {}x{}:",
            any::type_name::<T>(),
            self.width,
            self.height
        )?;
        fmt::Display::fmt(self, f)?;
        writeln!(f)
    }
}

impl<T> fmt::Display for BitGrid<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.height {
            for c in 0..self.width {
                let bit = if self.contains(r, c) { '■' } else { '□' };
                write!(f, "{} ", bit)?;
            }
            if r + 1 < self.height {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Iterator over the set bits of a bit grid.
#[derive(Clone, Copy)]
pub struct SetBits<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    grid: &'a BitGrid<T>,
    idx: usize,
}

impl<'a, T> Iterator for SetBits<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = (usize, usize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while self.idx < self.grid.len() {
            let idx = self.idx;
            self.idx += 1;
            if self.grid.contains_index(idx) {
                return Some((idx / self.grid.width, idx % self.grid.width));
            }
        }
        None
    }
}

/// In-place union. Both grids must share a shape.
impl<T> BitOrAssign<&BitGrid<T>> for BitGrid<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn bitor_assign(&mut self, rhs: &BitGrid<T>) {
        debug_assert!(self.same_shape(rhs));
        for (lhs, rhs) in self.words.iter_mut().zip(rhs.words.iter()) {
            *lhs = *lhs | *rhs;
        }
    }
}

/// In-place intersection. Both grids must share a shape.
impl<T> BitAndAssign<&BitGrid<T>> for BitGrid<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn bitand_assign(&mut self, rhs: &BitGrid<T>) {
        debug_assert!(self.same_shape(rhs));
        for (lhs, rhs) in self.words.iter_mut().zip(rhs.words.iter()) {
            *lhs = *lhs & *rhs;
        }
    }
}

/// Complement within the grid bounds.
impl<T> Not for &BitGrid<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = BitGrid<T>;

    fn not(self) -> BitGrid<T> {
        let mut out = BitGrid {
            width: self.width,
            height: self.height,
            words: self.words.iter().map(|w| !*w).collect(),
        };
        out.trim_tail();
        out
    }
}

/// Default cell mask, 64 cells per word.
pub type CellMask = BitGrid<u64>;
