// vim: set ai et ts=4 sw=4 sts=4:
use std::os::unix::io::AsRawFd;
use ansi_term::ANSIString;

pub fn maybe_color(s: &ANSIString, emit_color: bool) -> String {
    match emit_color {
        true  => s.to_string(),
        false => (**s).to_string(), // deref once to get ANSIString, once more to get underlying str
    }
}
pub fn ralign(s: &str, width: usize) -> String {
    if s.len() >= width {
        return String::from(s);
    }
    format!("{}{}", " ".repeat(width-s.len()), s)
}
pub fn lalign_colored(s: &ANSIString, width: usize, emit_color: bool)
    -> String
{
    let visual_len = s.len(); // ANSIString.len() returns length WITHOUT escape sequences
    if visual_len >= width {
        return maybe_color(s, emit_color);
    }
    format!("{}{}", maybe_color(s, emit_color), " ".repeat(width-visual_len))
}
pub fn ralign_joined_coloreds(strs: &[ANSIString], width: usize, emit_color: bool)
    -> String
{
    if strs.is_empty() {
        return " ".repeat(width);
    }
    let mut visual_len: usize = strs.iter().map(|ansi_str| ansi_str.len()).sum();
    visual_len += strs.len()-1; // count the spaces that .join(" ") will add

    let joined_colored = strs.iter()
                             .map(|astr| maybe_color(astr, emit_color))
                             .collect::<Vec<_>>()
                             .join(" ");
    if visual_len >= width {
        return joined_colored;
    }
    format!("{}{}", " ".repeat(width-visual_len), joined_colored)
}

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum Direction {
    Horizontal,
    Vertical,
}
impl Direction {
    pub fn line_name(&self) -> &'static str {
        match self {
            Direction::Horizontal => "row",
            Direction::Vertical   => "col",
        }
    }
    /// Converts a (line, position) pair along this direction into (row, col) grid coordinates.
    pub fn to_grid(&self, line: usize, position: usize) -> (usize, usize) {
        match self {
            Direction::Horizontal => (line, position),
            Direction::Vertical   => (position, line),
        }
    }
}

pub fn is_a_tty<T: AsRawFd>(handle: &T) -> bool {
    let fd = handle.as_raw_fd();
    unsafe { libc::isatty(fd) != 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ansi_term::{Colour, Style};

    #[test]
    fn ralign_pads_on_the_left() {
        assert_eq!(ralign("ab", 4), "  ab");
        assert_eq!(ralign("abcde", 4), "abcde");
    }

    #[test]
    fn colored_alignment_ignores_escape_sequences() {
        let parts = vec![Style::new().fg(Colour::Fixed(241)).paint("12"),
                         Style::default().paint("3")];
        assert_eq!(ralign_joined_coloreds(&parts, 6, false), "  12 3");
        assert_eq!(lalign_colored(&parts[1], 3, false), "3  ");
        assert!(ralign_joined_coloreds(&parts, 6, true).contains("\u{1b}["));
    }

    #[test]
    fn direction_maps_line_positions_to_grid() {
        assert_eq!(Direction::Horizontal.to_grid(2, 5), (2, 5));
        assert_eq!(Direction::Vertical.to_grid(2, 5), (5, 2));
    }
}
