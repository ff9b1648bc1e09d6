use std::str::FromStr;

/// Columns between the level end and the right edge of the grid.
pub const END_MARGIN: usize = 12;

/// Built-in level used when no level file is given.
pub const DEFAULT_LEVEL: &str = "\
..........................................................................................
..........................................................................................
..........................................................................................
..........................................................................................
..........................................................................................
..........................................................................................
..........................................................................................
................?................???..........?.......................?...................
..........................................................................................
............................##....................##.......................##.............
..S.................##..E...##..............E.....##....##..........E......##...E.........
######################################...#####################...#########################
######################################...#####################...#########################
######################################...#####################...#########################
";

/// Static content of one level cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LevelTile {
    #[default]
    Empty,
    Solid,
    SpecialBlock,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LevelParseError {
    #[display("level is empty")]
    Empty,
    #[display("unknown tile {ch:?} at line {line}, column {column}")]
    UnknownTile { ch: char, line: usize, column: usize },
    #[display("level has no spawn point (`S`)")]
    MissingSpawn,
    #[display("second spawn point at line {line}, column {column}")]
    DuplicateSpawn { line: usize, column: usize },
    #[display("level is {cols} columns wide, it must be wider than the 12-column end margin")]
    TooNarrow { cols: usize },
}

/// A tile grid parsed from ASCII art.
///
/// | char | meaning |
/// |---|---|
/// | `#` | solid tile |
/// | `?` | special block |
/// | `E` | enemy spawn |
/// | `S` | agent spawn (exactly one) |
/// | `.` or space | empty |
///
/// Short lines are padded with empty tiles.
#[derive(Debug, Clone)]
pub struct Level {
    rows: usize,
    cols: usize,
    tiles: Vec<LevelTile>,
    spawn: (usize, usize),
    enemy_spawns: Vec<(usize, usize)>,
}

impl FromStr for Level {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines().collect::<Vec<_>>();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            return Err(LevelParseError::Empty);
        }

        let rows = lines.len();
        let cols = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        if cols <= END_MARGIN {
            return Err(LevelParseError::TooNarrow { cols });
        }

        let mut tiles = vec![LevelTile::Empty; rows * cols];
        let mut spawn = None;
        let mut enemy_spawns = vec![];
        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let tile = match ch {
                    '.' | ' ' => LevelTile::Empty,
                    '#' => LevelTile::Solid,
                    '?' => LevelTile::SpecialBlock,
                    'E' => {
                        enemy_spawns.push((row, col));
                        LevelTile::Empty
                    }
                    'S' => {
                        if spawn.replace((row, col)).is_some() {
                            return Err(LevelParseError::DuplicateSpawn {
                                line: row + 1,
                                column: col + 1,
                            });
                        }
                        LevelTile::Empty
                    }
                    _ => {
                        return Err(LevelParseError::UnknownTile {
                            ch,
                            line: row + 1,
                            column: col + 1,
                        });
                    }
                };
                tiles[row * cols + col] = tile;
            }
        }

        Ok(Self {
            rows,
            cols,
            tiles,
            spawn: spawn.ok_or(LevelParseError::MissingSpawn)?,
            enemy_spawns,
        })
    }
}

impl Level {
    /// Returns the built-in level.
    #[must_use]
    pub fn default_level() -> Self {
        DEFAULT_LEVEL
            .parse()
            .expect("built-in level should always parse")
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn tiles(&self) -> &[LevelTile] {
        &self.tiles
    }

    /// `(row, col)` of the agent spawn point.
    #[must_use]
    pub fn spawn(&self) -> (usize, usize) {
        self.spawn
    }

    #[must_use]
    pub fn enemy_spawns(&self) -> &[(usize, usize)] {
        &self.enemy_spawns
    }

    /// Column at which progress reaches 100%.
    #[must_use]
    pub fn end_col(&self) -> usize {
        self.cols - END_MARGIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(level: &Level, row: usize, col: usize) -> Option<LevelTile> {
        (row < level.rows() && col < level.cols()).then(|| level.tiles()[row * level.cols() + col])
    }

    #[test]
    fn test_default_level_parses() {
        let level = Level::default_level();
        assert_eq!(level.rows(), 14);
        assert_eq!(level.cols(), 90);
        assert_eq!(level.spawn(), (10, 2));
        assert_eq!(level.enemy_spawns().len(), 4);
        assert_eq!(tile(&level, 11, 0), Some(LevelTile::Solid));
        assert_eq!(tile(&level, 11, 38), Some(LevelTile::Empty));
        assert_eq!(tile(&level, 7, 16), Some(LevelTile::SpecialBlock));
        assert_eq!(tile(&level, 14, 0), None);
    }

    #[test]
    fn test_short_lines_are_padded() {
        let level: Level = "S\n##############".parse().unwrap();
        assert_eq!(level.cols(), 14);
        assert_eq!(tile(&level, 0, 13), Some(LevelTile::Empty));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("".parse::<Level>(), Err(LevelParseError::Empty)));
        assert!(matches!(
            "S....".parse::<Level>(),
            Err(LevelParseError::TooNarrow { cols: 5 })
        ));
        assert!(matches!(
            ".............".parse::<Level>(),
            Err(LevelParseError::MissingSpawn)
        ));
        assert!(matches!(
            "S...S........".parse::<Level>(),
            Err(LevelParseError::DuplicateSpawn { line: 1, column: 5 })
        ));
        let err = "S....x.......".parse::<Level>().unwrap_err();
        assert!(matches!(
            err,
            LevelParseError::UnknownTile {
                ch: 'x',
                line: 1,
                column: 6
            }
        ));
        assert!(err.to_string().contains("'x'"));
    }
}
