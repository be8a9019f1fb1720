//! Maze board for the Pac-Man game.
//!
//! The layout is authored as rows of characters and decoded into a flat tile
//! vector at startup. Ghost house tiles are walkable like corridors; they
//! only differ in that they never hold food and draw as empty floor.

/// One board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Dot,
    Power,
    Empty,
    House,
}

pub const MAZE_W: i32 = 19;
pub const MAZE_H: i32 = 12;
/// Tile size in canvas pixels.
pub const BLOCK: f64 = 25.0;

/// Classic board. `#` wall, `.` dot, `o` power pellet, `H` ghost house,
/// anything else empty floor.
pub const CLASSIC_LAYOUT: [&str; MAZE_H as usize] = [
    "###################",
    "#........#........#",
    "#o##.###.#.###.##o#",
    "#.##.###.#.###.##.#",
    "#.................#",
    "#.##.#.##H##.#.##.#",
    "#....#.#HHH#.#....#",
    "####.#.#####.#.####",
    "#........#........#",
    "#.##.###.#.###.##.#",
    "#o.#...........#.o#",
    "###################",
];

#[derive(Debug, Clone)]
pub struct Maze {
    tiles: Vec<Tile>,
}

impl Maze {
    pub fn classic() -> Maze {
        Maze::from_rows(&CLASSIC_LAYOUT)
    }

    /// Decodes an authored layout. Every row must be [`MAZE_W`] characters.
    pub fn from_rows(rows: &[&str; MAZE_H as usize]) -> Maze {
        let mut tiles = Vec::with_capacity((MAZE_W * MAZE_H) as usize);
        for row in rows {
            for c in row.chars() {
                tiles.push(match c {
                    '#' => Tile::Wall,
                    '.' => Tile::Dot,
                    'o' => Tile::Power,
                    'H' => Tile::House,
                    _ => Tile::Empty,
                });
            }
        }
        Maze { tiles }
    }

    /// Tile at the given cell. Out-of-bounds reads as wall.
    pub fn tile(&self, x: i32, y: i32) -> Tile {
        if x < 0 || x >= MAZE_W || y < 0 || y >= MAZE_H {
            return Tile::Wall;
        }
        self.tiles[(y * MAZE_W + x) as usize]
    }

    /// Replaces an eaten dot or pellet with empty floor.
    pub fn clear(&mut self, x: i32, y: i32) {
        if x >= 0 && x < MAZE_W && y >= 0 && y < MAZE_H {
            self.tiles[(y * MAZE_W + x) as usize] = Tile::Empty;
        }
    }

    /// Anything except a wall can be entered, the ghost house included.
    pub fn walkable(&self, x: i32, y: i32) -> bool {
        self.tile(x, y) != Tile::Wall
    }

    /// Dots plus power pellets still on the board.
    pub fn edibles_left(&self) -> usize {
        self.tiles
            .iter()
            .filter(|t| matches!(t, Tile::Dot | Tile::Power))
            .count()
    }
}

// --- Tests -----------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_board_has_the_expected_food() {
        let maze = Maze::classic();
        assert_eq!(maze.edibles_left(), 102);
        let powers = (0..MAZE_H)
            .flat_map(|y| (0..MAZE_W).map(move |x| (x, y)))
            .filter(|&(x, y)| maze.tile(x, y) == Tile::Power)
            .count();
        assert_eq!(powers, 4);
    }

    #[test]
    fn border_is_solid_wall() {
        let maze = Maze::classic();
        for x in 0..MAZE_W {
            assert_eq!(maze.tile(x, 0), Tile::Wall);
            assert_eq!(maze.tile(x, MAZE_H - 1), Tile::Wall);
        }
        for y in 0..MAZE_H {
            assert_eq!(maze.tile(0, y), Tile::Wall);
            assert_eq!(maze.tile(MAZE_W - 1, y), Tile::Wall);
        }
    }

    #[test]
    fn out_of_bounds_reads_as_wall() {
        let maze = Maze::classic();
        assert!(!maze.walkable(-1, 5));
        assert!(!maze.walkable(MAZE_W, 5));
        assert!(!maze.walkable(5, -1));
        assert!(!maze.walkable(5, MAZE_H));
    }

    #[test]
    fn ghost_house_is_walkable_floor() {
        let maze = Maze::classic();
        for (x, y) in [(9, 5), (8, 6), (9, 6), (10, 6)] {
            assert_eq!(maze.tile(x, y), Tile::House);
            assert!(maze.walkable(x, y));
        }
    }

    #[test]
    fn clearing_a_dot_reduces_the_edible_count() {
        let mut maze = Maze::classic();
        let before = maze.edibles_left();
        assert_eq!(maze.tile(1, 1), Tile::Dot);
        maze.clear(1, 1);
        assert_eq!(maze.tile(1, 1), Tile::Empty);
        assert_eq!(maze.edibles_left(), before - 1);
    }

    #[test]
    fn power_pellets_sit_in_the_corners() {
        let maze = Maze::classic();
        for (x, y) in [(1, 2), (17, 2), (1, 10), (17, 10)] {
            assert_eq!(maze.tile(x, y), Tile::Power);
        }
    }
}
