use std::fmt::Debug;

use derive_more::Display;

use crate::distance::manhattan;

pub(crate) type CoordIntrinsic = i32;

/// A grid cell, `(row, col)`.
///
/// Ordered by row and then by column, which is the order used to break ties
/// deterministically.
#[derive(Copy, Clone, Debug, Default, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("({row},{col})")]
pub struct Coord {
    pub row: CoordIntrinsic,
    pub col: CoordIntrinsic,
}

impl Coord {
    #[inline(always)]
    pub const fn new(row: CoordIntrinsic, col: CoordIntrinsic) -> Self {
        Self { row, col }
    }

    /// Whether `other` is one orthogonal step away.
    #[inline(always)]
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        manhattan(self, other) == 1
    }

    /// The four orthogonal neighbours, bounds unchecked.
    #[inline(always)]
    pub fn orthogonal_neighbours(&self) -> [Coord; 4] {
        let Coord { row, col } = *self;
        #[rustfmt::skip]
        let neighbours = [
            Coord::new(row - 1, col    ),
            Coord::new(row + 1, col    ),
            Coord::new(row,     col - 1),
            Coord::new(row,     col + 1),
        ];
        neighbours
    }
}

impl From<(CoordIntrinsic, CoordIntrinsic)> for Coord {
    fn from((row, col): (CoordIntrinsic, CoordIntrinsic)) -> Self {
        Self::new(row, col)
    }
}

/// The grid the searches move on.
pub trait Space: Debug {
    /// Whether the cell may be entered.
    ///
    /// Must be `false` for cells outside the grid.
    fn navigable(&self, c: &Coord) -> bool;

    /// Expands a cell.
    ///
    /// May include blocked or out of bounds cells, searches filter them with
    /// [`Space::navigable`].
    fn neighbours(&self, c: &Coord) -> Vec<Coord>;

    /// Checks that a path only steps between adjacent navigable cells.
    fn valid_path(&self, p: &Path) -> bool {
        p.coords().iter().all(|c| self.navigable(c))
            && p.coords().windows(2).all(|w| w[0].is_adjacent(&w[1]))
    }
}

/// A path as the sequence of visited cells, start first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    coords: Vec<Coord>,
}

impl Path {
    #[inline(always)]
    pub fn new_from_start(start: Coord) -> Self {
        Self {
            coords: vec![start],
        }
    }

    #[inline(always)]
    pub fn empty() -> Self {
        Self { coords: vec![] }
    }

    #[inline(always)]
    pub fn append(&mut self, c: Coord) {
        self.coords.push(c);
    }

    /// Reverses the Path.
    ///
    /// Useful when naturally reconstructing paths in reverse.
    pub fn reverse(&mut self) {
        self.coords.reverse();
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Number of cells, including start and end.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Number of moves.
    #[inline(always)]
    pub fn cost(&self) -> usize {
        self.coords.len().saturating_sub(1)
    }

    #[inline(always)]
    pub fn start(&self) -> Option<&Coord> {
        self.coords.first()
    }

    #[inline(always)]
    pub fn end(&self) -> Option<&Coord> {
        self.coords.last()
    }

    #[inline(always)]
    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    pub fn contains(&self, c: &Coord) -> bool {
        self.coords.contains(c)
    }
}

impl From<Vec<Coord>> for Path {
    fn from(coords: Vec<Coord>) -> Self {
        Self { coords }
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        const MAX_ELEMENTS_DISPLAYED: usize = 20;

        match (self.start(), self.end()) {
            (Some(start), Some(end)) => {
                write!(f, "Path({}, {start}:", self.cost())?;
                for c in self.coords.iter().skip(1).take(MAX_ELEMENTS_DISPLAYED) {
                    write!(f, " {c}")?;
                }
                if self.coords.len() > MAX_ELEMENTS_DISPLAYED + 1 {
                    write!(f, " ...")?;
                }
                write!(f, ":{end})")
            }
            _ => write!(f, "Path()"),
        }
    }
}
