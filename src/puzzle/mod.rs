// vim: set ai et ts=4 sw=4 sts=4:
mod solver;

use std::fmt;
use log::debug;
use yaml_rust::Yaml;
use ansi_term::{ANSIString, Colour, Style};

use crate::config::DEFAULT_SUBDIVISION;
use crate::error::Error;
use crate::grid::Grid;
use crate::hint::{parse_hints, Hint, Token};
use crate::row::{CandidateIndex, IndexCache, Row, DirectionalSequence};
use crate::util::{ralign, lalign_colored, ralign_joined_coloreds, Direction, Direction::*};

pub use self::solver::{Outcome, SolveReport};

/// A small ambiguous puzzle, used by `--sample`.
pub const SAMPLE_ROWS: &str = "?\n1 1\n3";
pub const SAMPLE_COLS: &str = "?\n1 1\n3";

#[derive(Debug, Clone)]
pub struct Puzzle {
    rows: Vec<Row>,
    cols: Vec<Row>,
    grid: Grid,
}

impl Puzzle {
    /// Builds the puzzle and the candidate lists of each of its lines.
    ///
    /// Both hint lists must hold one hint per line of the index length.
    pub fn new(index: &CandidateIndex,
               row_hints: &[Hint],
               col_hints: &[Hint]) -> Result<Self, Error>
    {
        if row_hints.len() != index.length() || col_hints.len() != index.length() {
            return Err(Error::InvalidInput(format!(
                "expected {} row and column hints, got {} row hints and {} column hints",
                index.length(), row_hints.len(), col_hints.len())));
        }
        let rows = row_hints.iter()
                            .enumerate()
                            .map(|(y, hint)| Row::new(index, Horizontal, y, hint))
                            .collect::<Result<Vec<_>, _>>()?;
        let cols = col_hints.iter()
                            .enumerate()
                            .map(|(x, hint)| Row::new(index, Vertical, x, hint))
                            .collect::<Result<Vec<_>, _>>()?;
        Ok(Puzzle {
            rows,
            cols,
            grid: Grid::new(index.length()),
        })
    }
    pub fn size(&self) -> usize { self.grid.size() }

    /// The squares fixed so far; only the solver writes them.
    pub fn grid(&self) -> &Grid { &self.grid }

    /// Checks the shape of a hint pair before any solving work is done.
    pub fn validate(row_hints: &[Hint], col_hints: &[Hint], max_size: usize) -> Result<(), Error> {
        if row_hints.is_empty() || col_hints.is_empty() {
            return Err(Error::InvalidInput("row and column hints must not be empty".to_string()));
        }
        if row_hints.len() != col_hints.len() {
            return Err(Error::InvalidInput(format!(
                "puzzle must be square: got {} row hints and {} column hints",
                row_hints.len(), col_hints.len())));
        }
        if row_hints.len() > max_size {
            return Err(Error::InvalidInput(format!(
                "puzzle size {} exceeds the maximum of {}", row_hints.len(), max_size)));
        }
        Ok(())
    }

    pub fn from_hints(cache: &mut IndexCache,
                      row_hints: &[Hint],
                      col_hints: &[Hint],
                      max_size: usize) -> Result<Puzzle, Error>
    {
        Self::validate(row_hints, col_hints, max_size)?;
        let index = cache.get_or_build(row_hints.len())?;
        Puzzle::new(&index, row_hints, col_hints)
    }

    pub fn from_hint_texts(cache: &mut IndexCache,
                           rows_text: &str,
                           cols_text: &str,
                           max_size: usize) -> Result<Puzzle, Error>
    {
        let row_hints = parse_hints(rows_text)?;
        let col_hints = parse_hints(cols_text)?;
        debug!("parsed {} row hints and {} column hints", row_hints.len(), col_hints.len());
        Self::from_hints(cache, &row_hints, &col_hints, max_size)
    }

    pub fn from_yaml(cache: &mut IndexCache, doc: &Yaml, max_size: usize) -> Result<Puzzle, Error> {
        let rows_text = Self::_hint_text(&doc["rows"], "rows")?;
        let cols_text = Self::_hint_text(&doc["cols"], "cols")?;
        Self::from_hint_texts(cache, &rows_text, &cols_text, max_size)
    }

    fn _hint_text(input: &Yaml, key: &str) -> Result<String, Error> {
        let list = input.as_vec()
                        .ok_or_else(|| Error::InvalidInput(format!("expected a list under '{}'", key)))?;
        let lines = list.iter()
                        .map(|yaml_val| Self::_hint_line(yaml_val, key))
                        .collect::<Result<Vec<_>, _>>()?;
        Ok(lines.join("\n"))
    }

    fn _hint_line(input: &Yaml, key: &str) -> Result<String, Error> {
        match input {
            Yaml::String(s)  => Ok(s.clone()),
            Yaml::Integer(i) => Ok(i.to_string()),
            // note: '?' has to be quoted in YAML; an empty entry becomes a blank hint line
            Yaml::Null       => Ok(String::new()),
            _ => Err(Error::InvalidInput(format!("unexpected value in '{}': {:?}", key, input))),
        }
    }

    pub fn line(&self, direction: Direction, index: usize) -> &Row {
        match direction {
            Horizontal => &self.rows[index],
            Vertical   => &self.cols[index],
        }
    }
    pub fn line_is_complete(&self, row: &Row) -> bool {
        (0..row.length).all(|at| row.get_square(&self.grid, at).get_status().is_known())
    }
}

impl Puzzle {
    // helper functions for Puzzle::fmt
    fn _hint_strings(&self, row: &Row) -> Vec<ANSIString<'static>> {
        let complete = self.line_is_complete(row);
        row.hint.tokens()
                .iter()
                .map(|token| {
                    let style = match (token, complete) {
                        (_, true)                => Style::new().fg(Colour::Fixed(241)),
                        (Token::Unspecified, _)  => Style::new().fg(Colour::Yellow),
                        (Token::Known(_), false) => Style::default(),
                    };
                    style.paint(token.to_string())
                })
                .collect()
    }

    /// Draws the hints and the grid in a box, with separators every `subdivision` squares.
    pub fn render(&self, subdivision: Option<usize>, emit_color: bool) -> String
    {
        let row_prefixes: Vec<Vec<ANSIString>> =
            self.rows.iter()
                     .map(|row| self._hint_strings(row))
                     .collect();

        let prefix_len = row_prefixes.iter()
                                     .map(|parts| parts.iter()
                                                       .fold(0, |sum, ansi_str| sum + ansi_str.len() + 1) // note: .len() returns length WITHOUT ansi color escape sequences
                                                  .saturating_sub(1)) // to match the length of a join(" ")
                                     .max().unwrap_or(0);
        let max_col_runs = self.cols.iter()
                                    .map(|col| col.hint.tokens().len())
                                    .max().unwrap_or(0);

        let mut result = String::new();
        let size = self.size();
        let border = |piece: &str| (0..size).map(|_| piece.repeat(3)).collect::<Vec<_>>();

        for i in (0..max_col_runs).rev() {
            result.push_str(&self._fmt_header(i, prefix_len, subdivision, emit_color));
        }

        // top board line
        result.push_str(&Self::_fmt_line(
            &ralign("", prefix_len),
            "\u{2554}",
            "\u{2557}",
            "\u{2564}",
            subdivision,
            &border("\u{2550}")
        ));

        for (y, squares) in self.grid.rows().enumerate() {
            // board content line
            result.push_str(&Self::_fmt_line(
                &ralign_joined_coloreds(&row_prefixes[y], prefix_len, emit_color),
                "\u{2551}",
                "\u{2551}",
                "\u{2502}",
                subdivision,
                &squares.iter()
                        .map(|s| format!(" {} ", s))
                        .collect::<Vec<_>>()
            ));

            // horizontal subdivisor line
            if let Some(subdiv) = subdivision {
                if ((y+1) % subdiv == 0) && (y != size-1) {
                    result.push_str(&Self::_fmt_line(
                        &ralign("", prefix_len),
                        "\u{255F}",
                        "\u{2562}",
                        "\u{253C}",
                        subdivision,
                        &border("\u{2500}")
                    ));
                }
            }
        }
        // bottom board line
        result.push_str(&Self::_fmt_line(
            &ralign("", prefix_len),
            "\u{255A}",
            "\u{255D}",
            "\u{2567}",
            subdivision,
            &border("\u{2550}")
        ));

        result
    }

    fn _fmt_line(prefix: &str,
                 left_delim: &str,
                 right_delim: &str,
                 columnwise_separator: &str,
                 subdivision: Option<usize>,
                 content_parts: &[String])
        -> String
    {
        let mut result = format!("{} {}", prefix, left_delim);
        for (idx, s) in content_parts.iter().enumerate() {
            result.push_str(s);
            if let Some(subdiv) = subdivision {
                if ((idx+1) % subdiv == 0) && (idx < content_parts.len()-1) {
                    result.push_str(columnwise_separator);
                }
            }
        }
        result.push_str(&format!("{}\n", right_delim));
        result
    }

    fn _fmt_header(&self, line_idx: usize,
                          prefix_len: usize,
                          subdivision: Option<usize>,
                          emit_color: bool)
        -> String
    {
        let mut content_parts = Vec::<String>::new();
        for col in &self.cols {
            let hints = self._hint_strings(col);
            let part = match line_idx < hints.len() {
                true  => format!(" {}", lalign_colored(&hints[hints.len()-1-line_idx], 2, emit_color)),
                false => "   ".to_string(),
            };
            content_parts.push(part);
        }

        Self::_fmt_line(
            &ralign("", prefix_len),
            " ",
            " ",
            " ",
            subdivision,
            &content_parts
        )
    }
}
impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render(Some(DEFAULT_SUBDIVISION), false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yaml_rust::YamlLoader;
    use crate::config::DEFAULT_MAX_SIZE;

    fn build(rows: &str, cols: &str) -> Result<Puzzle, Error> {
        Puzzle::from_hint_texts(&mut IndexCache::new(), rows, cols, DEFAULT_MAX_SIZE)
    }

    #[test]
    fn validates_shape() {
        assert!(matches!(build("", "1"), Err(Error::InvalidInput(_))));
        assert!(matches!(build("1\n1", "1"), Err(Error::InvalidInput(_))));
        let big = vec!["1"; 21].join("\n");
        assert!(matches!(build(&big, &big), Err(Error::InvalidInput(_))));
        assert!(matches!(build("1 ?\n1", "1\n1"), Err(Error::UnsupportedHint { .. })));
    }

    #[test]
    fn new_rejects_hint_counts_other_than_the_index_length() {
        let index = CandidateIndex::build(3).unwrap();
        let two = parse_hints("3\n3").unwrap();
        let three = parse_hints("2\n2\n2").unwrap();
        assert!(matches!(Puzzle::new(&index, &two, &three), Err(Error::InvalidInput(_))));
        assert!(matches!(Puzzle::new(&index, &three, &two), Err(Error::InvalidInput(_))));
        assert!(Puzzle::new(&index, &three, &three).is_ok());
    }

    #[test]
    fn builds_lines_in_both_directions() {
        let puzzle = build("1\n2\n0", "?\n1 1\n3").unwrap();
        assert_eq!(puzzle.size(), 3);
        assert_eq!(puzzle.rows.len(), 3);
        assert_eq!(puzzle.cols[1].direction, Vertical);
        assert_eq!(puzzle.line(Vertical, 2).candidate_count(), 1);
        assert_eq!(puzzle.line(Vertical, 0).candidate_count(), 8);
        assert_eq!(puzzle.line(Horizontal, 0).candidate_count(), 3);
        assert_eq!(puzzle.grid().unknown_count(), 9);
    }

    #[test]
    fn reads_yaml_documents() {
        let docs = YamlLoader::load_from_str("
rows:
    - 1 1
    - 1
    - 1 1
cols:
    - 1 1
    - 1
    - \"1 1\"
---
rows: [3, -1, '?']
cols: [1, 1, 1]
").unwrap();
        let mut cache = IndexCache::new();
        let first = Puzzle::from_yaml(&mut cache, &docs[0], DEFAULT_MAX_SIZE).unwrap();
        assert_eq!(first.rows[0].hint.to_string(), "1 1");
        let second = Puzzle::from_yaml(&mut cache, &docs[1], DEFAULT_MAX_SIZE).unwrap();
        assert!(second.rows[1].hint.is_unconstrained());
        assert!(second.rows[2].hint.is_unconstrained());
        assert_eq!(cache.len(), 1);

        let missing = YamlLoader::load_from_str("rows: [1]").unwrap();
        assert!(matches!(Puzzle::from_yaml(&mut cache, &missing[0], DEFAULT_MAX_SIZE),
                         Err(Error::InvalidInput(_))));
    }

    #[test]
    fn demo_file_solves() {
        let docs = YamlLoader::load_from_str(include_str!("../../demos/puzzles.yaml")).unwrap();
        assert_eq!(docs.len(), 2);
        let mut cache = IndexCache::new();
        let mut big = Puzzle::from_yaml(&mut cache, &docs[0], DEFAULT_MAX_SIZE).unwrap();
        assert_eq!(big.solve().unwrap().outcome, Outcome::Solved);
        let mut small = Puzzle::from_yaml(&mut cache, &docs[1], DEFAULT_MAX_SIZE).unwrap();
        assert_eq!(small.solve().unwrap().outcome, Outcome::Unsolved);
        assert_eq!(small.grid.to_string(), "?##\n#.#\n###\n");
    }

    #[test]
    fn renders_hints_and_grid() {
        let puzzle = build("1\n2", "2\n1").unwrap();
        let expected = concat!(
            "    2  1  \n",
            "  ╔══════╗\n",
            "1 ║ .  . ║\n",
            "2 ║ .  . ║\n",
            "  ╚══════╝\n",
        );
        assert_eq!(puzzle.render(None, false), expected);
    }
}
