use std::{fs, path::PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use log::info;
use pathsearch::{
    render::{save_image, Overlay, RenderOptions, TextView},
    util::load_maze,
    Discipline, MazeSolution, PathFinder, SearchState,
};
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Breadth-first, finds a shortest path
    Bfs,
    /// Depth-first
    Dfs,
}

impl From<Strategy> for Discipline {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Bfs => Discipline::Queue,
            Strategy::Dfs => Discipline::Stack,
        }
    }
}

/// Find a path from A to B through a text maze
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Maze file: `A` is the start, `B` the goal, spaces are open and anything else is a wall
    maze: PathBuf,

    /// Search order
    #[arg(long, short, value_enum, default_value_t = Strategy::Bfs)]
    discipline: Strategy,

    /// Give up after exploring this many states
    #[arg(long)]
    max_explored: Option<usize>,

    /// Where to write the rendered maze
    #[arg(long, short, default_value = "maze.png")]
    output: PathBuf,

    /// Only print the maze, do not write an image
    #[arg(long)]
    no_image: bool,

    /// Color explored cells in the image
    #[arg(long)]
    show_explored: bool,

    /// Print the result as JSON instead of a picture of the maze
    #[arg(long)]
    json: bool,

    /// JSON file with render options (cell_size, cell_border, show_solution, show_explored)
    #[arg(long)]
    render_config: Option<PathBuf>,
}

/// What `--json` prints
#[derive(Debug, Serialize)]
struct Report<'a> {
    discipline: Discipline,
    states_explored: usize,
    solution: Option<&'a MazeSolution>,
}

fn render_options(args: &Args) -> anyhow::Result<RenderOptions> {
    let mut options = match &args.render_config {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("invalid render options in {}", path.display()))?
        }
        None => RenderOptions::default(),
    };

    if args.show_explored {
        options.show_explored = true;
    }

    Ok(options)
}

fn run(args: &Args) -> anyhow::Result<()> {
    let maze = load_maze(&args.maze)
        .with_context(|| format!("failed to load maze {}", args.maze.display()))?;
    let options = render_options(args)?;

    let finder = PathFinder::new(&maze, args.discipline.into());
    let (state, stats) = match args.max_explored {
        Some(limit) => finder.finish_within(limit)?,
        None => finder.finish()?,
    };

    if args.json {
        let report = Report {
            discipline: args.discipline.into(),
            states_explored: stats.num_explored,
            solution: state.solution(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("States Explored: {}", stats.num_explored);
        match state.solution() {
            Some(solution) => {
                println!("Solution ({} moves):", solution.len());
                println!();
                print!("{}", TextView::new(&maze, Some(solution)));
            }
            None => {
                println!("No solution.");
                println!();
                print!("{}", maze);
            }
        }
    }

    if !args.no_image {
        let overlay = Overlay {
            solution: state.solution(),
            explored: Some(&stats.explored),
        };
        save_image(&maze, &overlay, &options, &args.output)
            .with_context(|| format!("failed to write {}", args.output.display()))?;
        info!("wrote {}", args.output.display());
    }

    match state {
        SearchState::Succeeded(_) => Ok(()),
        SearchState::NoPath => bail!("no path from start to goal"),
        SearchState::Running => bail!("gave up after exploring {} states", stats.num_explored),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    run(&args)
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["solver", "maze.txt"]).unwrap();
        assert_eq!(args.maze, PathBuf::from("maze.txt"));
        assert_eq!(args.discipline, Strategy::Bfs);
        assert_eq!(args.output, PathBuf::from("maze.png"));
        assert_eq!(args.max_explored, None);
        assert!(!args.no_image);
    }

    #[test]
    fn test_args_count() {
        assert!(Args::try_parse_from(["solver"]).is_err());
        assert!(Args::try_parse_from(["solver", "a.txt", "b.txt"]).is_err());
    }

    #[test]
    fn test_args_options() {
        let args = Args::try_parse_from([
            "solver",
            "maze.txt",
            "--discipline",
            "dfs",
            "--max-explored",
            "10",
            "--show-explored",
        ])
        .unwrap();
        assert_eq!(Discipline::from(args.discipline), Discipline::Stack);
        assert_eq!(args.max_explored, Some(10));
        assert!(render_options(&args).unwrap().show_explored);
    }

    #[test]
    fn test_report_json() {
        let maze = pathsearch::util::parse_maze("A  \n # \n  B").unwrap();
        let (state, stats) = pathsearch::solve(&maze, Discipline::Queue).unwrap();
        let report = Report {
            discipline: Discipline::Queue,
            states_explored: stats.num_explored,
            solution: state.solution(),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "discipline": "queue",
                "states_explored": 8,
                "solution": {
                    "actions": ["down", "down", "right", "right"],
                    "cells": [
                        {"row": 1, "col": 0},
                        {"row": 2, "col": 0},
                        {"row": 2, "col": 1},
                        {"row": 2, "col": 2}
                    ]
                }
            })
        );

        let no_path = Report {
            discipline: Discipline::Stack,
            states_explored: 3,
            solution: None,
        };
        assert_eq!(serde_json::to_value(&no_path).unwrap()["solution"], serde_json::Value::Null);
    }

    #[test]
    fn test_run() {
        let maze = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/maze1.txt");
        let args = Args::try_parse_from(["solver", maze, "--no-image"]).unwrap();
        assert!(run(&args).is_ok());

        let args = Args::try_parse_from(["solver", maze, "--no-image", "--json"]).unwrap();
        assert!(args.json);
        assert!(run(&args).is_ok());

        let args =
            Args::try_parse_from(["solver", maze, "--no-image", "--max-explored", "1"]).unwrap();
        assert!(run(&args).is_err());
    }

    #[test]
    fn test_run_oversized_render_config() {
        let maze = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/maze1.txt");
        let dir = std::env::temp_dir();
        let config = dir.join("solver_oversized_render.json");
        let output = dir.join("solver_oversized.png");
        fs::write(&config, r#"{"cell_size": 2000000000}"#).unwrap();

        let args = Args::try_parse_from([
            "solver",
            maze,
            "--render-config",
            config.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .unwrap();
        assert!(run(&args).is_err());
        assert!(!output.exists());
    }
}
