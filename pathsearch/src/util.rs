use std::path::Path;

use log::debug;

use crate::error::MazeError;
use crate::grid::{Cell, Maze, Point};

pub const START: char = 'A';
pub const GOAL: char = 'B';
pub const OPEN: char = ' ';

/// Parse a text maze. `A` marks the start, `B` the goal, a space is open and
/// any other character is a wall. All rows must have the same length.
pub fn parse_maze(contents: &str) -> Result<Maze, MazeError> {
    let mut starts = Vec::new();
    let mut goals = Vec::new();

    let cells: Vec<Vec<Cell>> = contents
        .lines()
        .enumerate()
        .map(|(row, line)| {
            line.chars()
                .enumerate()
                .map(|(col, c)| match c {
                    START => {
                        starts.push(Point { row, col });
                        Cell::Open
                    }
                    GOAL => {
                        goals.push(Point { row, col });
                        Cell::Open
                    }
                    OPEN => Cell::Open,
                    _ => Cell::Wall,
                })
                .collect()
        })
        .collect();

    let start = match starts[..] {
        [start] => start,
        _ => return Err(MazeError::StartCount { found: starts.len() }),
    };
    let goal = match goals[..] {
        [goal] => goal,
        _ => return Err(MazeError::GoalCount { found: goals.len() }),
    };

    // row lengths are checked by the maze itself
    let maze = Maze::new(cells, start, goal)?;
    debug!(
        "parsed {}x{} maze, start {} goal {}",
        maze.rows(),
        maze.columns(),
        start,
        goal
    );

    Ok(maze)
}

pub fn load_maze(path: impl AsRef<Path>) -> Result<Maze, MazeError> {
    let contents = std::fs::read_to_string(path)?;
    parse_maze(&contents)
}
