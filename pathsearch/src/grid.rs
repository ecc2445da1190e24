use crate::error::MazeError;
use crate::find::{MapStorage, MapTrait, NodeReference, Solution};
use std::fmt::Display;

use serde::Serialize;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Cell {
    #[default]
    Wall,
    Open,
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Cell::Wall => "█",
                Cell::Open => " ",
            }
        )
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in the order neighbors are generated. This order decides
    /// tie-breaking during search.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The (row, col) offset of a single move in this direction
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Direction::Up => "up",
                Direction::Down => "down",
                Direction::Left => "left",
                Direction::Right => "right",
            }
        )
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The point one move away in `direction`, or `None` if that would leave
    /// the non-negative quadrant. Upper bounds are the map's business.
    pub fn step(self, direction: Direction) -> Option<Point> {
        let (dr, dc) = direction.delta();
        Some(Point {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl NodeReference for Point {}

pub type MazeSolution = Solution<Direction, Point>;

/// A rectangular maze with a single start and a single goal.
///
/// Walls, start and goal are fixed once constructed; searching never mutates
/// the maze.
#[derive(Debug, Clone)]
pub struct Maze {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<Cell>>,
    start: Point,
    goal: Point,
}

impl Maze {
    pub fn new(cells: Vec<Vec<Cell>>, start: Point, goal: Point) -> Result<Self, MazeError> {
        let rows = cells.len();
        let columns = cells.first().map_or(0, Vec::len);
        if rows == 0 || columns == 0 {
            return Err(MazeError::Empty);
        }

        if let Some((row, r)) = cells.iter().enumerate().find(|(_, r)| r.len() != columns) {
            return Err(MazeError::Ragged {
                row,
                expected: columns,
                found: r.len(),
            });
        }

        for (what, point) in [("start", start), ("goal", goal)] {
            if point.row >= rows || point.col >= columns {
                return Err(MazeError::OutOfBounds { what, point });
            }
            if cells[point.row][point.col] == Cell::Wall {
                return Err(MazeError::OnWall { what, point });
            }
        }

        if start == goal {
            return Err(MazeError::StartIsGoal { point: start });
        }

        Ok(Self {
            rows,
            columns,
            cells,
            start,
            goal,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn goal(&self) -> Point {
        self.goal
    }

    pub fn cell(&self, point: Point) -> Cell {
        self.cells[point.row][point.col]
    }

    pub fn is_wall(&self, point: Point) -> bool {
        self.cell(point) == Cell::Wall
    }

    pub fn contains(&self, point: Point) -> bool {
        point.row < self.rows && point.col < self.columns
    }
}

impl Display for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::render::TextView::new(self, None))
    }
}

/// A MapStorage that uses a rectangular grid of cells (a vec in a vec)
#[derive(Debug, Clone)]
pub struct CellStorage<T>(Vec<Vec<T>>);

impl<T: Copy + 'static> MapStorage<T> for CellStorage<T> {
    type Reference = Point;

    fn get(&self, node: Self::Reference) -> T {
        self.0[node.row][node.col]
    }

    fn get_mut(&mut self, node: Self::Reference) -> &mut T {
        &mut self.0[node.row][node.col]
    }
}

impl CellStorage<bool> {
    /// Number of cells set to `true`
    pub fn count(&self) -> usize {
        self.0.iter().flatten().filter(|v| **v).count()
    }
}

impl MapTrait for Maze {
    type Reference = Point;
    type Action = Direction;
    type Storage<T: Default + Copy + 'static> = CellStorage<T>;

    fn start(&self) -> Self::Reference {
        self.start
    }

    fn goal(&self) -> Self::Reference {
        self.goal
    }

    fn neighbors_of(
        &self,
        node: Self::Reference,
    ) -> impl Iterator<Item = (Self::Action, Self::Reference)> {
        let mut points = Vec::with_capacity(4);

        for direction in Direction::ALL {
            if let Some(p) = node.step(direction) {
                points.push((direction, p));
            }
        }

        // filter to only keep open cells inside the maze
        points.retain(|(_, p)| self.contains(*p) && !self.is_wall(*p));

        points.into_iter()
    }

    fn create_storage<T: Default + Copy + 'static>(&self) -> Self::Storage<T> {
        CellStorage(vec![vec![Default::default(); self.columns]; self.rows])
    }
}
