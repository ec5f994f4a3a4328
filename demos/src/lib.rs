//! Shared pieces of the sightline demos: argument handling, map loading and
//! ASCII rendering of search results.

use std::fmt;
use std::path::PathBuf;

use sightline_core::{Cell, GridError, OccupancyGrid};
use sightline_paths::{Line, PathError, PathOutcome};

/// Map used when no file is given.
pub const BUILTIN_MAP: &str = "
........................
..######.........#......
.......#.........#......
.......#....###..#......
.......#.........#......
...........#.....####...
...........#............
..####.....#.......#....
...........#.......#....
......######.......#....
...................#....
........................
";

pub const DEFAULT_START: Cell = Cell::new(0, 0);
pub const DEFAULT_GOAL: Cell = Cell::new(11, 23);

pub const USAGE: &str = "usage: pathdemo [MAP] [START GOAL]   (cells as ROW,COL)";

#[derive(Debug)]
pub enum DemoError {
    Usage(String),
    Io { path: PathBuf, source: std::io::Error },
    Grid(GridError),
    Path(PathError),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(msg) => write!(f, "{msg}\n{USAGE}"),
            Self::Io { path, source } => write!(f, "reading {}: {source}", path.display()),
            Self::Grid(e) => write!(f, "invalid map: {e}"),
            Self::Path(e) => write!(f, "search failed: {e}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Usage(_) => None,
            Self::Io { source, .. } => Some(source),
            Self::Grid(e) => Some(e),
            Self::Path(e) => Some(e),
        }
    }
}

impl From<GridError> for DemoError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<PathError> for DemoError {
    fn from(e: PathError) -> Self {
        Self::Path(e)
    }
}

/// Command line of the path demo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Args {
    /// ASCII map file; the built-in map when `None`.
    pub map: Option<PathBuf>,
    pub start: Cell,
    pub goal: Cell,
}

impl Args {
    /// Parse `[MAP] [START GOAL]` (program name excluded).
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self, DemoError> {
        let args: Vec<String> = args.into_iter().collect();
        let (map, start, goal) = match args.as_slice() {
            [] => (None, DEFAULT_START, DEFAULT_GOAL),
            [map] => (Some(map.into()), DEFAULT_START, DEFAULT_GOAL),
            [start, goal] => (None, parse_cell(start)?, parse_cell(goal)?),
            [map, start, goal] => (Some(map.into()), parse_cell(start)?, parse_cell(goal)?),
            _ => return Err(DemoError::Usage(format!("expected at most 3 arguments, got {}", args.len()))),
        };
        Ok(Self { map, start, goal })
    }

    /// Load the map named by these arguments.
    pub fn load_grid(&self) -> Result<OccupancyGrid, DemoError> {
        let Some(path) = &self.map else {
            return Ok(BUILTIN_MAP.parse()?);
        };
        let text = std::fs::read_to_string(path).map_err(|source| DemoError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(text.parse()?)
    }
}

/// Parse a `ROW,COL` pair.
pub fn parse_cell(s: &str) -> Result<Cell, DemoError> {
    let bad = || DemoError::Usage(format!("bad cell {s:?}, expected ROW,COL"));
    let (row, col) = s.split_once(',').ok_or_else(bad)?;
    let row = row.trim().parse().map_err(|_| bad())?;
    let col = col.trim().parse().map_err(|_| bad())?;
    Ok(Cell::new(row, col))
}

/// Draw `outcome` over `grid`.
///
/// `S` marks the start, `G` the end of the path, `o` intermediate
/// waypoints and `*` the cells crossed by each straight segment. When the
/// requested goal was substituted, it is marked `X`.
pub fn render(grid: &OccupancyGrid, outcome: &PathOutcome) -> String {
    let mut canvas: Vec<Vec<char>> = grid
        .iter_rows()
        .map(|row| {
            row.iter()
                .map(|&w| if w { '.' } else { '#' })
                .collect()
        })
        .collect();
    let mut put = |c: Cell, ch: char| {
        if grid.contains(c) {
            canvas[c.row as usize][c.col as usize] = ch;
        }
    };

    for w in outcome.cells.windows(2) {
        for c in Line::new(w[0], w[1]) {
            put(c, '*');
        }
    }
    if let [_, waypoints @ .., _] = outcome.cells.as_slice() {
        for &c in waypoints {
            put(c, 'o');
        }
    }
    if outcome.requested_goal != outcome.goal {
        put(outcome.requested_goal, 'X');
    }
    if let Some(end) = outcome.terminal() {
        put(end, 'G');
    }
    put(outcome.start, 'S');

    let mut out = String::with_capacity(grid.bounds().len() + grid.rows());
    for row in canvas {
        out.extend(row);
        out.push('\n');
    }
    out
}

/// One-paragraph description of how a search went.
pub fn summary(outcome: &PathOutcome) -> String {
    let mut s = format!(
        "{:?}: {} waypoints, cost {:.3}, {} nodes expanded",
        outcome.termination,
        outcome.cells.len(),
        outcome.cost,
        outcome.nodes_expanded
    );
    if outcome.requested_goal != outcome.goal {
        s.push_str(&format!(
            "\ngoal {} is blocked, searched for {} instead",
            outcome.requested_goal, outcome.goal
        ));
    }
    if !outcome.is_complete() {
        if let Some(end) = outcome.terminal() {
            s.push_str(&format!("\ngoal not reached, closest cell {end}"));
        }
    }
    let hops: Vec<String> = outcome.cells.iter().map(ToString::to_string).collect();
    s.push_str(&format!("\npath: {}", hops.join(" -> ")));
    s
}
