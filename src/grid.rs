//! Dense 2D/3D grid addressed by integer cell coordinates.
use crate::error::{Error, Result};
use glam::{IVec2, IVec3, Vec3};
use std::ops::{Index, IndexMut};

/// Order in which the fill function visits cells while a grid is built.
/// z is always the innermost loop.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Traversal {
    /// x outer, y middle.
    #[default]
    XMajor,
    /// y outer, x middle.
    YMajor,
}

/// Result of looking up a cell of a grid of optional values.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    Empty,
    OutOfRange,
}

/// A width x height x depth grid stored in a single flat buffer.
///
/// Cells are laid out y-outer, x-middle, z-inner, which is also the order
/// every iterator over the grid yields them in.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Grid<T> {
    cells: Vec<T>,
    width: usize,
    height: usize,
    depth: usize,
}

fn out_of_bounds_2d(x: i32, y: i32) -> Error {
    Error::OutOfBounds(format!("({x}:{y})"))
}

fn out_of_bounds(x: i32, y: i32, z: i32) -> Error {
    Error::OutOfBounds(format!("({x}:{y}:{z})"))
}

impl<T> Grid<T> {
    /// Builds a grid one cell deep, calling `fill` once per (x, y).
    pub fn new_2d<F>(width: usize, height: usize, traversal: Traversal, mut fill: F) -> Result<Self>
    where
        F: FnMut(i32, i32) -> T,
    {
        Self::new_3d(width, height, 1, traversal, |x, y, _| fill(x, y))
    }

    /// Builds a grid, calling `fill` once per (x, y, z) in `traversal` order.
    pub fn new_3d<F>(
        width: usize,
        height: usize,
        depth: usize,
        traversal: Traversal,
        mut fill: F,
    ) -> Result<Self>
    where
        F: FnMut(i32, i32, i32) -> T,
    {
        let invalid = || Error::InvalidDimensions {
            width,
            height,
            depth,
        };
        let max = i32::MAX as usize;
        if width == 0 || height == 0 || depth == 0 || width > max || height > max || depth > max {
            return Err(invalid());
        }
        let len = width
            .checked_mul(height)
            .and_then(|area| area.checked_mul(depth))
            .ok_or_else(invalid)?;

        let cells = match traversal {
            Traversal::YMajor => {
                let mut cells = Vec::with_capacity(len);
                for y in 0..height {
                    for x in 0..width {
                        for z in 0..depth {
                            cells.push(fill(x as i32, y as i32, z as i32));
                        }
                    }
                }
                cells
            }
            Traversal::XMajor => {
                let mut slots: Vec<Option<T>> = Vec::with_capacity(len);
                slots.resize_with(len, || None);
                for x in 0..width {
                    for y in 0..height {
                        for z in 0..depth {
                            slots[(y * width + x) * depth + z] =
                                Some(fill(x as i32, y as i32, z as i32));
                        }
                    }
                }
                let cells: Vec<T> = slots.into_iter().flatten().collect();
                debug_assert_eq!(cells.len(), len);
                cells
            }
        };

        Ok(Grid {
            cells,
            width,
            height,
            depth,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_out_of_range(&self, x: i32, y: i32, z: i32) -> bool {
        x < 0
            || x as usize >= self.width
            || y < 0
            || y as usize >= self.height
            || z < 0
            || z as usize >= self.depth
    }

    pub fn is_out_of_range_2d(&self, x: i32, y: i32) -> bool {
        self.is_out_of_range(x, y, 0)
    }

    fn index_of(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if self.is_out_of_range(x, y, z) {
            return None;
        }
        Some((y as usize * self.width + x as usize) * self.depth + z as usize)
    }

    fn checked_index(&self, x: i32, y: i32, z: i32) -> Result<usize> {
        self.index_of(x, y, z).ok_or_else(|| out_of_bounds(x, y, z))
    }

    fn checked_index_2d(&self, x: i32, y: i32) -> Result<usize> {
        self.index_of(x, y, 0).ok_or_else(|| out_of_bounds_2d(x, y))
    }

    pub fn get(&self, x: i32, y: i32, z: i32) -> Result<&T> {
        Ok(&self.cells[self.checked_index(x, y, z)?])
    }

    pub fn get_2d(&self, x: i32, y: i32) -> Result<&T> {
        Ok(&self.cells[self.checked_index_2d(x, y)?])
    }

    pub fn get_mut(&mut self, x: i32, y: i32, z: i32) -> Result<&mut T> {
        let index = self.checked_index(x, y, z)?;
        Ok(&mut self.cells[index])
    }

    pub fn get_mut_2d(&mut self, x: i32, y: i32) -> Result<&mut T> {
        let index = self.checked_index_2d(x, y)?;
        Ok(&mut self.cells[index])
    }

    pub fn set(&mut self, x: i32, y: i32, z: i32, value: T) -> Result<()> {
        *self.get_mut(x, y, z)? = value;
        Ok(())
    }

    pub fn set_2d(&mut self, x: i32, y: i32, value: T) -> Result<()> {
        *self.get_mut_2d(x, y)? = value;
        Ok(())
    }

    /// Returns `None` when the coordinates are outside the grid.
    pub fn try_get(&self, x: i32, y: i32, z: i32) -> Option<&T> {
        self.index_of(x, y, z).map(|index| &self.cells[index])
    }

    pub fn try_get_2d(&self, x: i32, y: i32) -> Option<&T> {
        self.try_get(x, y, 0)
    }

    /// Stores `value` if the coordinates are inside the grid, dropping it otherwise.
    pub fn try_set(&mut self, x: i32, y: i32, z: i32, value: T) -> bool {
        match self.index_of(x, y, z) {
            Some(index) => {
                self.cells[index] = value;
                true
            }
            None => false,
        }
    }

    pub fn try_set_2d(&mut self, x: i32, y: i32, value: T) -> bool {
        self.try_set(x, y, 0, value)
    }

    /// Every cell of the z-column at (x, y), ascending z. Empty when (x, y) is outside the grid.
    pub fn z_column(&self, x: i32, y: i32) -> &[T] {
        match self.index_of(x, y, 0) {
            Some(start) => &self.cells[start..start + self.depth],
            None => &[],
        }
    }

    /// Swaps the cells at (xa, ya) and (xb, yb) on layer 0.
    ///
    /// # Panics
    ///
    /// Unlike [`Grid::set_2d`] this does not report bad coordinates through a
    /// `Result`: it panics with the out of bounds message instead.
    pub fn exchange_position(&mut self, xa: i32, ya: i32, xb: i32, yb: i32) {
        let a = self
            .checked_index_2d(xa, ya)
            .unwrap_or_else(|err| panic!("{err}"));
        let b = self
            .checked_index_2d(xb, yb)
            .unwrap_or_else(|err| panic!("{err}"));
        self.cells.swap(a, b);
    }

    /// Yields every cell, y-outer, x-middle, z-inner.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.cells.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.cells.iter_mut()
    }
}

impl<T> Grid<Option<T>> {
    /// Distinguishes an empty cell from a position outside the grid.
    pub fn lookup(&self, x: i32, y: i32, z: i32) -> Lookup<&T> {
        match self.try_get(x, y, z) {
            Some(Some(value)) => Lookup::Found(value),
            Some(None) => Lookup::Empty,
            None => Lookup::OutOfRange,
        }
    }

    pub fn lookup_2d(&self, x: i32, y: i32) -> Lookup<&T> {
        self.lookup(x, y, 0)
    }

    /// `None` both for an empty cell and for a position outside the grid.
    /// Use [`Grid::lookup`] to tell them apart.
    pub fn try_get_object(&self, x: i32, y: i32, z: i32) -> Option<&T> {
        self.try_get(x, y, z).and_then(Option::as_ref)
    }

    pub fn try_get_object_2d(&self, x: i32, y: i32) -> Option<&T> {
        self.try_get_object(x, y, 0)
    }

    /// The occupied cells of the z-column at (x, y), ascending z.
    pub fn z_objects(&self, x: i32, y: i32) -> Vec<&T> {
        self.z_column(x, y).iter().flatten().collect()
    }
}

/// Cell containing a continuous position, ignoring z.
pub fn xy(position: Vec3) -> IVec2 {
    IVec2::new(position.x.floor() as i32, position.y.floor() as i32)
}

/// Cell containing a continuous position.
pub fn xyz(position: Vec3) -> IVec3 {
    position.floor().as_ivec3()
}

impl<T> Index<(i32, i32)> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y): (i32, i32)) -> &T {
        self.get_2d(x, y).unwrap_or_else(|err| panic!("{err}"))
    }
}

impl<T> IndexMut<(i32, i32)> for Grid<T> {
    fn index_mut(&mut self, (x, y): (i32, i32)) -> &mut T {
        self.get_mut_2d(x, y).unwrap_or_else(|err| panic!("{err}"))
    }
}

impl<T> Index<(i32, i32, i32)> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y, z): (i32, i32, i32)) -> &T {
        self.get(x, y, z).unwrap_or_else(|err| panic!("{err}"))
    }
}

impl<T> IndexMut<(i32, i32, i32)> for Grid<T> {
    fn index_mut(&mut self, (x, y, z): (i32, i32, i32)) -> &mut T {
        self.get_mut(x, y, z).unwrap_or_else(|err| panic!("{err}"))
    }
}

impl<T> Index<IVec2> for Grid<T> {
    type Output = T;

    fn index(&self, position: IVec2) -> &T {
        &self[(position.x, position.y)]
    }
}

impl<T> IndexMut<IVec2> for Grid<T> {
    fn index_mut(&mut self, position: IVec2) -> &mut T {
        &mut self[(position.x, position.y)]
    }
}

impl<T> Index<IVec3> for Grid<T> {
    type Output = T;

    fn index(&self, position: IVec3) -> &T {
        &self[(position.x, position.y, position.z)]
    }
}

impl<T> IndexMut<IVec3> for Grid<T> {
    fn index_mut(&mut self, position: IVec3) -> &mut T {
        &mut self[(position.x, position.y, position.z)]
    }
}

impl<T> IntoIterator for Grid<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Grid<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Grid<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter_mut()
    }
}
