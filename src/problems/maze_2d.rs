use derive_more::Display;
use thiserror::Error;

use crate::problem::Problem;
use crate::space::Coord;
use crate::space::CoordIntrinsic;
use crate::space::Path;
use crate::space::Space;

const WALL: char = '%';
const START: char = 'P';
const WAYPOINT: char = '.';
const OPEN: char = ' ';
const TRAIL: char = '*';

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum Maze2DCell {
    #[display(" ")]
    Open,
    #[display("%")]
    Wall,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Maze2DCellParseError {
    #[error("Invalid character '{0}' found.")]
    InvalidCharacter(char),
}

impl std::convert::TryFrom<char> for Maze2DCell {
    type Error = Maze2DCellParseError;

    /// Start and waypoint markers stand on open cells.
    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            OPEN | START | WAYPOINT => Ok(Maze2DCell::Open),
            WALL => Ok(Maze2DCell::Wall),
            ch => Err(Maze2DCellParseError::InvalidCharacter(ch)),
        }
    }
}

/// A rectangular grid of cells, indexed `map[row][col]`.
#[derive(Clone, PartialEq, Eq)]
pub struct Maze2DSpace {
    pub(crate) map: Vec<Vec<Maze2DCell>>,
}

impl Maze2DSpace {
    pub fn new_from_map(map: Vec<Vec<Maze2DCell>>) -> Self {
        Self { map }
    }
    pub(crate) fn new_open_with_dimensions(rows: usize, cols: usize) -> Self {
        Self {
            map: vec![vec![Maze2DCell::Open; cols]; rows],
        }
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        match self.map.first() {
            Some(row) => (self.map.len(), row.len()),
            None => (0, 0),
        }
    }

    /// The cell at `c`, `None` outside the grid.
    #[inline(always)]
    pub fn at(&self, c: &Coord) -> Option<Maze2DCell> {
        let row = usize::try_from(c.row).ok()?;
        let col = usize::try_from(c.col).ok()?;
        self.map.get(row)?.get(col).copied()
    }

    fn set(&mut self, c: &Coord, cell: Maze2DCell) {
        if let (Ok(row), Ok(col)) = (usize::try_from(c.row), usize::try_from(c.col)) {
            if let Some(slot) = self.map.get_mut(row).and_then(|r| r.get_mut(col)) {
                *slot = cell;
            }
        }
    }
}

impl Space for Maze2DSpace {
    #[inline(always)]
    fn navigable(&self, c: &Coord) -> bool {
        self.at(c) == Some(Maze2DCell::Open)
    }

    fn neighbours(&self, c: &Coord) -> Vec<Coord> {
        c.orthogonal_neighbours().to_vec()
    }
}

impl std::fmt::Debug for Maze2DSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Maze2D{:?}", self.dimensions())
    }
}

#[derive(Debug, Error)]
pub enum Maze2DParseError {
    #[error("I/O error when loading '{p}': {e}")]
    IOError {
        p: std::path::PathBuf,
        e: std::io::Error,
    },
    #[error("The maze is empty")]
    Empty,
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Bad cell at ({row},{col}): {e}")]
    InvalidCell {
        row: usize,
        col: usize,
        e: Maze2DCellParseError,
    },
    #[error("The maze has no start '{START}'")]
    NoStart,
    #[error("The maze has a second start at {second}, the first one is at {first}")]
    MultipleStarts { first: Coord, second: Coord },
    #[error("The maze is too large, {rows}x{cols}")]
    TooLarge { rows: usize, cols: usize },
}

/// Why a path does not solve a [`Maze2DProblem`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("The path is empty")]
    Empty,
    #[error("The path starts at {found} instead of {expected}")]
    WrongStart { expected: Coord, found: Coord },
    #[error("The path steps from {from} to {to}, which are not adjacent")]
    NotAdjacent { from: Coord, to: Coord },
    #[error("The path goes through {0}, which is not navigable")]
    Blocked(Coord),
    #[error("The path ends at {0}, which is not a waypoint")]
    NotOnWaypoint(Coord),
    #[error("The path never visits waypoint {0}")]
    MissedWaypoint(Coord),
}

/// A text-grid maze.
///
/// Waypoints are listed in reading order (row by row, left to right).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze2DProblem {
    space: Maze2DSpace,
    start: Coord,
    waypoints: Vec<Coord>,
}

impl Maze2DProblem {
    /// A maze without walls.
    pub fn open_grid(rows: usize, cols: usize, start: Coord, waypoints: &[Coord]) -> Self {
        Self {
            space: Maze2DSpace::new_open_with_dimensions(rows, cols),
            start,
            waypoints: waypoints.to_vec(),
        }
    }

    /// The same maze with another start and waypoints.
    #[must_use]
    pub fn with_endpoints(&self, start: Coord, waypoints: &[Coord]) -> Self {
        Self {
            space: self.space.clone(),
            start,
            waypoints: waypoints.to_vec(),
        }
    }

    /// A random maze.
    ///
    /// Every cell is a wall with probability `wall_probability`, except for
    /// the start and the waypoints, which are distinct open cells. Walls may
    /// leave waypoints unreachable.
    pub fn random<R>(
        rng: &mut R,
        rows: usize,
        cols: usize,
        wall_probability: f64,
        num_waypoints: usize,
    ) -> Self
    where
        R: rand::Rng + ?Sized,
    {
        debug_assert!(num_waypoints < rows * cols, "Not enough cells");

        let map = (0..rows)
            .map(|_| {
                (0..cols)
                    .map(|_| {
                        if rng.random_bool(wall_probability) {
                            Maze2DCell::Wall
                        } else {
                            Maze2DCell::Open
                        }
                    })
                    .collect()
            })
            .collect();
        let mut space = Maze2DSpace::new_from_map(map);

        let amount = (num_waypoints + 1).min(rows * cols);
        let mut picks = rand::seq::index::sample(rng, rows * cols, amount)
            .into_iter()
            .map(|i| Coord::new((i / cols) as CoordIntrinsic, (i % cols) as CoordIntrinsic));

        let start = picks.next().unwrap_or_default();
        let mut waypoints: Vec<Coord> = picks.collect();
        waypoints.sort_unstable();

        space.set(&start, Maze2DCell::Open);
        for w in &waypoints {
            space.set(w, Maze2DCell::Open);
        }

        Self {
            space,
            start,
            waypoints,
        }
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        self.space.dimensions()
    }

    /// Checks that `path` is a tour of this maze.
    ///
    /// It must leave from the start, only step between adjacent navigable
    /// cells, visit every waypoint and end on one of them.
    pub fn validate_path(&self, path: &Path) -> Result<(), PathError> {
        self.validate_leg(path)?;

        match self.waypoints.iter().find(|w| !path.contains(w)) {
            Some(w) => Err(PathError::MissedWaypoint(*w)),
            None => Ok(()),
        }
    }

    /// Like [`Maze2DProblem::validate_path`], but a single waypoint is enough.
    pub fn validate_leg(&self, path: &Path) -> Result<(), PathError> {
        let (Some(start), Some(end)) = (path.start(), path.end()) else {
            return Err(PathError::Empty);
        };
        if *start != self.start {
            return Err(PathError::WrongStart {
                expected: self.start,
                found: *start,
            });
        }
        if let Some(c) = path.coords().iter().find(|c| !self.space.navigable(c)) {
            return Err(PathError::Blocked(*c));
        }
        if let Some(w) = path.coords().windows(2).find(|w| !w[0].is_adjacent(&w[1])) {
            return Err(PathError::NotAdjacent {
                from: w[0],
                to: w[1],
            });
        }
        if !self.is_waypoint(end) {
            return Err(PathError::NotOnWaypoint(*end));
        }
        Ok(())
    }

    /// Renders the maze with `path` drawn over it.
    pub fn render<'a>(&'a self, path: &'a Path) -> Maze2DRender<'a> {
        Maze2DRender {
            problem: self,
            path: Some(path),
        }
    }

    fn glyph(&self, c: &Coord, path: Option<&Path>) -> char {
        if *c == self.start {
            START
        } else if self.is_waypoint(c) {
            WAYPOINT
        } else if path.is_some_and(|p| p.contains(c)) {
            TRAIL
        } else {
            match self.space.at(c) {
                Some(Maze2DCell::Wall) => WALL,
                _ => OPEN,
            }
        }
    }
}

impl Problem for Maze2DProblem {
    type Sp = Maze2DSpace;

    fn space(&self) -> &Maze2DSpace {
        &self.space
    }
    fn start(&self) -> Coord {
        self.start
    }
    fn waypoints(&self) -> &[Coord] {
        &self.waypoints
    }
}

/// A maze with an optional path overlay, rendered in the text-grid legend.
///
/// Cells on the path that are neither the start nor a waypoint show as `*`.
pub struct Maze2DRender<'a> {
    problem: &'a Maze2DProblem,
    path: Option<&'a Path>,
}

impl std::fmt::Display for Maze2DRender<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (rows, cols) = self.problem.dimensions();
        for row in 0..rows {
            for col in 0..cols {
                let c = Coord::new(row as CoordIntrinsic, col as CoordIntrinsic);
                write!(f, "{}", self.problem.glyph(&c, self.path))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Maze2DProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let render = Maze2DRender {
            problem: self,
            path: None,
        };
        std::fmt::Display::fmt(&render, f)
    }
}

impl std::convert::TryFrom<&str> for Maze2DProblem {
    type Error = Maze2DParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let lines: Vec<&str> = s.lines().collect();
        let Some(first) = lines.first() else {
            return Err(Maze2DParseError::Empty);
        };
        let cols = first.chars().count();
        if cols == 0 {
            return Err(Maze2DParseError::Empty);
        }
        if CoordIntrinsic::try_from(lines.len()).is_err() || CoordIntrinsic::try_from(cols).is_err()
        {
            return Err(Maze2DParseError::TooLarge {
                rows: lines.len(),
                cols,
            });
        }

        let mut map = Vec::with_capacity(lines.len());
        let mut start: Option<Coord> = None;
        let mut waypoints = vec![];

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(Maze2DParseError::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }

            let mut cells = Vec::with_capacity(cols);
            for (col, ch) in line.chars().enumerate() {
                let cell = Maze2DCell::try_from(ch)
                    .map_err(|e| Maze2DParseError::InvalidCell { row, col, e })?;
                cells.push(cell);

                let here = Coord::new(row as CoordIntrinsic, col as CoordIntrinsic);
                match ch {
                    START => match start {
                        Some(first) => {
                            return Err(Maze2DParseError::MultipleStarts {
                                first,
                                second: here,
                            });
                        }
                        None => start = Some(here),
                    },
                    WAYPOINT => waypoints.push(here),
                    _ => {}
                }
            }
            map.push(cells);
        }

        Ok(Self {
            space: Maze2DSpace::new_from_map(map),
            start: start.ok_or(Maze2DParseError::NoStart)?,
            waypoints,
        })
    }
}

impl std::convert::TryFrom<&std::path::Path> for Maze2DProblem {
    type Error = Maze2DParseError;

    fn try_from(p: &std::path::Path) -> Result<Self, Self::Error> {
        let text = std::fs::read_to_string(p).map_err(|e| Maze2DParseError::IOError {
            p: p.to_path_buf(),
            e,
        })?;
        Self::try_from(text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    const SMALL: &str = indoc! {"
        %%%%%%
        %P  .%
        % %% %
        %.   %
        %%%%%%
    "};

    #[test]
    fn parse() {
        let problem = Maze2DProblem::try_from(SMALL).unwrap();

        assert_eq!(problem.dimensions(), (5, 6));
        assert_eq!(problem.start(), Coord::new(1, 1));
        assert_eq!(
            problem.waypoints(),
            &[Coord::new(1, 4), Coord::new(3, 1)]
        );
        assert!(problem.is_waypoint(&Coord::new(3, 1)));
        assert!(!problem.is_waypoint(&Coord::new(1, 1)));
    }

    #[test]
    fn navigable() {
        let problem = Maze2DProblem::try_from(SMALL).unwrap();
        let space = problem.space();

        assert!(space.navigable(&Coord::new(1, 1)));
        assert!(space.navigable(&Coord::new(1, 4)));
        assert!(!space.navigable(&Coord::new(0, 0)));
        assert!(!space.navigable(&Coord::new(2, 2)));
        assert!(!space.navigable(&Coord::new(-1, 1)));
        assert!(!space.navigable(&Coord::new(1, 6)));
        assert!(!space.navigable(&Coord::new(5, 1)));
    }

    #[test]
    fn neighbours_are_orthogonal() {
        let problem = Maze2DProblem::open_grid(2, 2, Coord::new(0, 0), &[]);
        let neighbours = problem.neighbours(&Coord::new(0, 0));

        assert_eq!(neighbours.len(), 4);
        assert!(neighbours.iter().all(|n| n.is_adjacent(&Coord::new(0, 0))));
        let inside: Vec<_> = neighbours
            .into_iter()
            .filter(|n| problem.navigable(n))
            .collect();
        assert_eq!(inside, vec![Coord::new(1, 0), Coord::new(0, 1)]);
    }

    #[test]
    fn display_matches_the_input() {
        let problem = Maze2DProblem::try_from(SMALL).unwrap();
        assert_eq!(problem.to_string(), SMALL);
        assert_eq!(Maze2DProblem::try_from(problem.to_string().as_str()).unwrap(), problem);
    }

    #[test]
    fn render_path() {
        let problem = Maze2DProblem::try_from(SMALL).unwrap();
        let path = Path::from(vec![
            Coord::new(1, 1),
            Coord::new(1, 2),
            Coord::new(1, 3),
            Coord::new(1, 4),
        ]);

        assert_eq!(
            problem.render(&path).to_string(),
            indoc! {"
                %%%%%%
                %P**.%
                % %% %
                %.   %
                %%%%%%
            "}
        );
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            Maze2DProblem::try_from(""),
            Err(Maze2DParseError::Empty)
        ));
        assert!(matches!(
            Maze2DProblem::try_from("%%%\n% %\n%%%\n"),
            Err(Maze2DParseError::NoStart)
        ));
        assert!(matches!(
            Maze2DProblem::try_from("%%%%\n%PP%\n%%%%\n"),
            Err(Maze2DParseError::MultipleStarts { .. })
        ));
        assert!(matches!(
            Maze2DProblem::try_from("%%%%\n%P%\n%%%%\n"),
            Err(Maze2DParseError::RaggedRow {
                row: 1,
                expected: 4,
                found: 3
            })
        ));
        assert!(matches!(
            Maze2DProblem::try_from("%%%\n%P#\n%%%\n"),
            Err(Maze2DParseError::InvalidCell {
                row: 1,
                col: 2,
                e: Maze2DCellParseError::InvalidCharacter('#')
            })
        ));
    }

    #[test]
    fn missing_file() {
        let p = std::path::Path::new("/nonexistent/maze.txt");
        assert!(matches!(
            Maze2DProblem::try_from(p),
            Err(Maze2DParseError::IOError { .. })
        ));
    }

    #[test]
    fn validate_path() {
        let problem = Maze2DProblem::try_from(SMALL).unwrap();
        let tour = Path::from(vec![
            Coord::new(1, 1),
            Coord::new(1, 2),
            Coord::new(1, 3),
            Coord::new(1, 4),
            Coord::new(2, 4),
            Coord::new(3, 4),
            Coord::new(3, 3),
            Coord::new(3, 2),
            Coord::new(3, 1),
        ]);
        assert_eq!(problem.validate_path(&tour), Ok(()));

        let leg = Path::from(tour.coords()[..4].to_vec());
        assert_eq!(problem.validate_leg(&leg), Ok(()));
        assert_eq!(
            problem.validate_path(&leg),
            Err(PathError::MissedWaypoint(Coord::new(3, 1)))
        );

        assert_eq!(problem.validate_path(&Path::empty()), Err(PathError::Empty));
        assert_eq!(
            problem.validate_path(&Path::new_from_start(Coord::new(3, 1))),
            Err(PathError::WrongStart {
                expected: Coord::new(1, 1),
                found: Coord::new(3, 1)
            })
        );
        assert_eq!(
            problem.validate_leg(&Path::from(vec![Coord::new(1, 1), Coord::new(1, 3)])),
            Err(PathError::NotAdjacent {
                from: Coord::new(1, 1),
                to: Coord::new(1, 3)
            })
        );
        assert_eq!(
            problem.validate_leg(&Path::from(vec![Coord::new(1, 1), Coord::new(0, 1)])),
            Err(PathError::Blocked(Coord::new(0, 1)))
        );
        assert_eq!(
            problem.validate_leg(&Path::from(vec![Coord::new(1, 1), Coord::new(1, 2)])),
            Err(PathError::NotOnWaypoint(Coord::new(1, 2)))
        );
    }

    #[test]
    fn random_mazes() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let problem = Maze2DProblem::random(&mut rng, 6, 9, 0.4, 3);

            assert_eq!(problem.dimensions(), (6, 9));
            assert_eq!(problem.waypoints().len(), 3);
            assert!(problem.navigable(&problem.start()));
            assert!(!problem.is_waypoint(&problem.start()));
            assert!(problem.waypoints().iter().all(|w| problem.navigable(w)));
            assert!(problem.waypoints().windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn random_mazes_are_reproducible() {
        let a = Maze2DProblem::random(&mut ChaCha8Rng::seed_from_u64(1), 10, 10, 0.3, 2);
        let b = Maze2DProblem::random(&mut ChaCha8Rng::seed_from_u64(1), 10, 10, 0.3, 2);
        assert_eq!(a, b);
    }
}
