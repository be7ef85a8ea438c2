use serde::{Deserialize, Serialize};

use crate::error::{ProminenceError, Result};

/// A single height sample at grid position `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub height: u16,
}

impl Cell {
    #[inline]
    pub fn location(&self) -> Location {
        Location { x: self.x, y: self.y }
    }
}

/// A grid position, used as a key for neighbour lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub x: usize,
    pub y: usize,
}

impl Location {
    /// The in-bounds 4-connected neighbours in N, E, S, W order.
    pub fn neighbors(self, width: usize, height: usize) -> impl Iterator<Item = Location> {
        let Location { x, y } = self;
        let north = y.checked_sub(1).map(|ny| Location { x, y: ny });
        let east = (x + 1 < width).then(|| Location { x: x + 1, y });
        let south = (y + 1 < height).then(|| Location { x, y: y + 1 });
        let west = x.checked_sub(1).map(|nx| Location { x: nx, y });
        [north, east, south, west].into_iter().flatten()
    }
}

/// Random-access source of 16-bit height samples over a `width × height` grid.
///
/// `sample` is only called with `x < width()` and `y < height()`.
pub trait HeightSource {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn sample(&self, x: usize, y: usize) -> u16;

    /// Every cell in raster order (row by row, `x` fastest).
    fn cells(&self) -> Cells<'_, Self>
    where
        Self: Sized,
    {
        Cells { source: self, next: 0 }
    }

    #[inline]
    fn len(&self) -> usize {
        self.width() * self.height()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Raster-order iterator over the cells of a [`HeightSource`].
pub struct Cells<'a, S> {
    source: &'a S,
    next: usize,
}

impl<S: HeightSource> Iterator for Cells<'_, S> {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.next >= self.source.len() {
            return None;
        }
        let width = self.source.width();
        let (x, y) = (self.next % width, self.next / width);
        self.next += 1;
        Some(Cell { x, y, height: self.source.sample(x, y) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.source.len() - self.next;
        (left, Some(left))
    }
}

impl<S: HeightSource> ExactSizeIterator for Cells<'_, S> {}

/// A 2D heightmap storing 16-bit samples, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightMap {
    /// Row-major height samples.
    pub data: Vec<u16>,
    pub width: usize,
    pub height: usize,
}

impl HeightMap {
    /// Create a new HeightMap filled with the given value.
    pub fn new(width: usize, height: usize, fill: u16) -> Self {
        Self { data: vec![fill; width * height], width, height }
    }

    /// Wrap an existing row-major sample buffer.
    pub fn from_samples(width: usize, height: usize, data: Vec<u16>) -> Result<Self> {
        let expected = width * height;
        if data.len() != expected {
            return Err(ProminenceError::SampleCount { width, height, expected, actual: data.len() });
        }
        Ok(Self { data, width, height })
    }

    /// Build from rows of samples; every row must have the same length.
    pub fn from_rows<R: AsRef<[u16]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(width * height);
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return Err(ProminenceError::SampleCount {
                    width,
                    height,
                    expected: width * height,
                    actual: rows.iter().map(|r| r.as_ref().len()).sum(),
                });
            }
            data.extend_from_slice(row);
        }
        Self::from_samples(width, height, data)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u16 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, val: u16) {
        self.data[y * self.width + x] = val;
    }

    /// Lowest sample, `None` for an empty map.
    pub fn min_height(&self) -> Option<u16> {
        self.data.iter().copied().min()
    }

    /// Highest sample, `None` for an empty map.
    pub fn max_height(&self) -> Option<u16> {
        self.data.iter().copied().max()
    }
}

impl HeightSource for HeightMap {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn sample(&self, x: usize, y: usize) -> u16 {
        self.get(x, y)
    }
}

/// Adapts a `(x, y) -> u16` closure into a [`HeightSource`].
pub struct FnSource<F> {
    width: usize,
    height: usize,
    f: F,
}

impl<F: Fn(usize, usize) -> u16> FnSource<F> {
    pub fn new(width: usize, height: usize, f: F) -> Self {
        Self { width, height, f }
    }
}

impl<F: Fn(usize, usize) -> u16> HeightSource for FnSource<F> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn sample(&self, x: usize, y: usize) -> u16 {
        (self.f)(x, y)
    }
}
