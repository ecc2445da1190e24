use std::{fmt::Display, path::Path};

use image::{
    error::{LimitError, LimitErrorKind},
    ImageError, ImageResult, Rgba, RgbaImage,
};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::find::MapStorage;
use crate::grid::{Cell, CellStorage, Maze, MazeSolution, Point};

const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WALL: Rgba<u8> = Rgba([40, 40, 40, 255]);
const START: Rgba<u8> = Rgba([255, 0, 0, 255]);
const GOAL: Rgba<u8> = Rgba([0, 255, 0, 255]);
const SOLUTION: Rgba<u8> = Rgba([220, 235, 113, 255]);
const EXPLORED: Rgba<u8> = Rgba([212, 97, 85, 255]);
const OPEN: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Largest image we are willing to allocate, in pixels
const MAX_PIXELS: u64 = 1 << 28;

/// We derive Deserialize/Serialize so options can be read from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to the defaults below
pub struct RenderOptions {
    /// Side of one cell in pixels
    pub cell_size: u32,
    /// Background margin kept around each cell
    pub cell_border: u32,
    pub show_solution: bool,
    pub show_explored: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cell_size: 50,
            cell_border: 2,
            show_solution: true,
            show_explored: false,
        }
    }
}

/// Search results drawn on top of the maze
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlay<'a> {
    pub solution: Option<&'a MazeSolution>,
    pub explored: Option<&'a CellStorage<bool>>,
}

impl Overlay<'_> {
    fn on_solution(&self, p: Point) -> bool {
        self.solution.is_some_and(|s| s.cells.contains(&p))
    }

    fn is_explored(&self, p: Point) -> bool {
        self.explored.is_some_and(|e| e.get(p))
    }
}

/// Plain text picture of a maze, with the solution marked by `*`
pub struct TextView<'a> {
    maze: &'a Maze,
    solution: Option<&'a MazeSolution>,
}

impl<'a> TextView<'a> {
    pub fn new(maze: &'a Maze, solution: Option<&'a MazeSolution>) -> Self {
        Self { maze, solution }
    }
}

impl Display for TextView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let overlay = Overlay {
            solution: self.solution,
            explored: None,
        };

        for row in 0..self.maze.rows() {
            for col in 0..self.maze.columns() {
                let p = Point { row, col };
                let cell = self.maze.cell(p);
                if cell == Cell::Wall {
                    write!(f, "{}", cell)?;
                } else if p == self.maze.start() {
                    write!(f, "A")?;
                } else if p == self.maze.goal() {
                    write!(f, "B")?;
                } else if overlay.on_solution(p) {
                    write!(f, "*")?;
                } else {
                    write!(f, "{}", cell)?;
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

fn cell_color(maze: &Maze, overlay: &Overlay, options: &RenderOptions, p: Point) -> Rgba<u8> {
    if maze.is_wall(p) {
        WALL
    } else if p == maze.start() {
        START
    } else if p == maze.goal() {
        GOAL
    } else if options.show_solution && overlay.on_solution(p) {
        SOLUTION
    } else if options.show_explored && overlay.is_explored(p) {
        EXPLORED
    } else {
        OPEN
    }
}

/// Pixel length of `cells` cells of `cell_size` pixels, if it fits in a `u32`
fn side_length(cells: usize, cell_size: u32) -> ImageResult<u32> {
    u32::try_from(cells)
        .ok()
        .and_then(|n| n.checked_mul(cell_size))
        .ok_or_else(|| ImageError::Limits(LimitError::from_kind(LimitErrorKind::DimensionError)))
}

/// Draw every cell as a filled square on a black background.
///
/// Fails if `cell_size` makes the image too large to address.
pub fn render_image(
    maze: &Maze,
    overlay: &Overlay,
    options: &RenderOptions,
) -> ImageResult<RgbaImage> {
    let size = options.cell_size;
    let border = options.cell_border;

    let width = side_length(maze.columns(), size)?;
    let height = side_length(maze.rows(), size)?;
    if u64::from(width) * u64::from(height) > MAX_PIXELS {
        return Err(ImageError::Limits(LimitError::from_kind(
            LimitErrorKind::InsufficientMemory,
        )));
    }

    let mut img = RgbaImage::from_pixel(width, height, BACKGROUND);

    for row in 0..maze.rows() {
        for col in 0..maze.columns() {
            let fill = cell_color(maze, overlay, options, Point { row, col });

            // both fit: the image sides were checked above
            let x0 = col as u32 * size;
            let y0 = row as u32 * size;
            for y in y0.saturating_add(border)..(y0 + size).saturating_sub(border) {
                for x in x0.saturating_add(border)..(x0 + size).saturating_sub(border) {
                    img.put_pixel(x, y, fill);
                }
            }
        }
    }

    Ok(img)
}

pub fn save_image(
    maze: &Maze,
    overlay: &Overlay,
    options: &RenderOptions,
    path: impl AsRef<Path>,
) -> ImageResult<()> {
    let path = path.as_ref();
    let img = render_image(maze, overlay, options)?;
    debug!(
        "writing {}x{} image to {}",
        img.width(),
        img.height(),
        path.display()
    );
    img.save(path)
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::find::solve;
    use crate::frontier::Discipline;
    use crate::util::parse_maze;

    const SMALL: &str = "A  \n # \n  B";

    /// Color at the middle of a cell
    fn center(img: &RgbaImage, options: &RenderOptions, row: u32, col: u32) -> Rgba<u8> {
        let half = options.cell_size / 2;
        *img.get_pixel(col * options.cell_size + half, row * options.cell_size + half)
    }

    #[test]
    fn test_text_view() {
        let maze = parse_maze(SMALL).unwrap();
        assert_eq!(maze.to_string(), "A  \n █ \n  B\n");

        let (state, _) = solve(&maze, Discipline::Queue).unwrap();
        let text = TextView::new(&maze, state.solution()).to_string();
        assert_eq!(text, "A  \n*█ \n**B\n");
    }

    #[test]
    fn test_image_size() {
        let maze = parse_maze("A    B\n#### #").unwrap();
        let options = RenderOptions::default();
        let img = render_image(&maze, &Overlay::default(), &options).unwrap();
        assert_eq!(img.width(), 300);
        assert_eq!(img.height(), 100);
    }

    #[test]
    fn test_image_colors() {
        let maze = parse_maze(SMALL).unwrap();
        let (state, stats) = solve(&maze, Discipline::Queue).unwrap();
        let overlay = Overlay {
            solution: state.solution(),
            explored: Some(&stats.explored),
        };

        let options = RenderOptions {
            show_explored: true,
            ..Default::default()
        };
        let img = render_image(&maze, &overlay, &options).unwrap();

        assert_eq!(center(&img, &options, 0, 0), START);
        assert_eq!(center(&img, &options, 2, 2), GOAL);
        assert_eq!(center(&img, &options, 1, 1), WALL);
        assert_eq!(center(&img, &options, 1, 0), SOLUTION);
        assert_eq!(center(&img, &options, 0, 1), EXPLORED);

        // the border around each cell stays black
        assert_eq!(*img.get_pixel(0, 0), BACKGROUND);
        assert_eq!(*img.get_pixel(51, 51), BACKGROUND);
        assert_eq!(*img.get_pixel(52, 52), WALL);
    }

    #[test]
    fn test_overlays_toggle() {
        let maze = parse_maze(SMALL).unwrap();
        let (state, stats) = solve(&maze, Discipline::Queue).unwrap();
        let overlay = Overlay {
            solution: state.solution(),
            explored: Some(&stats.explored),
        };

        let options = RenderOptions {
            show_solution: false,
            show_explored: false,
            ..Default::default()
        };
        let img = render_image(&maze, &overlay, &options).unwrap();
        assert_eq!(center(&img, &options, 1, 0), OPEN);
        assert_eq!(center(&img, &options, 0, 1), OPEN);
    }

    #[test]
    fn test_oversized_cells() {
        let maze = parse_maze(SMALL).unwrap();
        let options = RenderOptions {
            cell_size: 2_000_000_000,
            ..Default::default()
        };

        assert!(matches!(
            render_image(&maze, &Overlay::default(), &options),
            Err(ImageError::Limits(_))
        ));

        let path = std::env::temp_dir().join("pathsearch_oversized.png");
        assert!(save_image(&maze, &Overlay::default(), &options, &path).is_err());
        assert!(!path.exists());

        // fits in u32 but is far too many pixels
        let options = RenderOptions {
            cell_size: 1_000_000,
            ..Default::default()
        };
        assert!(matches!(
            render_image(&maze, &Overlay::default(), &options),
            Err(ImageError::Limits(_))
        ));
    }

    #[test]
    fn test_border_wider_than_cell() {
        let maze = parse_maze(SMALL).unwrap();
        let options = RenderOptions {
            cell_size: 4,
            cell_border: u32::MAX,
            ..Default::default()
        };

        let img = render_image(&maze, &Overlay::default(), &options).unwrap();
        assert_eq!(img.width(), 12);
        assert!(img.pixels().all(|p| *p == BACKGROUND));
    }

    #[test]
    fn test_options_defaults() {
        let options: RenderOptions = serde_json::from_str(r#"{"cell_size": 10}"#).unwrap();
        assert_eq!(options.cell_size, 10);
        assert_eq!(options.cell_border, 2);
        assert!(options.show_solution);
        assert!(!options.show_explored);
    }
}
