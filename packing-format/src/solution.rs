use std::io::Read;
use std::io::Write;

use crate::lines::non_empty_lines;
use crate::FormatError;

/// Written alone when the time budget ran out before a feasible height was found.
pub const TIMEOUT_SENTINEL: &str = "TIMEOUT";
/// Written alone when infeasibility was proven for every height.
pub const UNSAT_SENTINEL: &str = "UNSAT";
/// Trailing marker on a block line for a block that is placed rotated.
pub const ROTATED_MARKER: &str = "R";

/// The contents of a solution file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolutionFile {
    Solved(SolvedLayout),
    Timeout,
    Unsatisfiable,
}

/// A layout of all the blocks of an instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolvedLayout {
    pub container_width: u32,
    pub height: u32,
    pub blocks: Vec<PlacedBlock>,
}

/// A single block of a [`SolvedLayout`].
///
/// The `width` and `height` are the dimensions given in the instance; when `rotated` is set, the
/// block occupies `height` horizontally and `width` vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedBlock {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
    pub rotated: bool,
}

/// Write a solution file.
///
/// # Example
/// ```
/// use packing_format::PlacedBlock;
/// use packing_format::SolutionFile;
/// use packing_format::SolvedLayout;
///
/// let solution = SolutionFile::Solved(SolvedLayout {
///     container_width: 3,
///     height: 2,
///     blocks: vec![
///         PlacedBlock { width: 2, height: 2, x: 0, y: 0, rotated: false },
///         PlacedBlock { width: 2, height: 1, x: 2, y: 0, rotated: true },
///     ],
/// });
///
/// let mut buffer = Vec::new();
/// packing_format::write_solution(&mut buffer, &solution).expect("writing to a vec");
/// assert_eq!("3 2\n2\n2 2 0 0\n2 1 2 0 R\n", String::from_utf8_lossy(&buffer));
/// ```
pub fn write_solution(mut sink: impl Write, solution: &SolutionFile) -> std::io::Result<()> {
    let layout = match solution {
        SolutionFile::Solved(layout) => layout,
        SolutionFile::Timeout => return writeln!(sink, "{TIMEOUT_SENTINEL}"),
        SolutionFile::Unsatisfiable => return writeln!(sink, "{UNSAT_SENTINEL}"),
    };

    writeln!(sink, "{} {}", layout.container_width, layout.height)?;
    writeln!(sink, "{}", layout.blocks.len())?;

    for block in layout.blocks.iter() {
        write!(
            sink,
            "{} {} {} {}",
            block.width, block.height, block.x, block.y
        )?;
        if block.rotated {
            write!(sink, " {ROTATED_MARKER}")?;
        }
        writeln!(sink)?;
    }

    Ok(())
}

/// Parse a solution file as written by [`write_solution`].
pub fn read_solution(source: impl Read) -> Result<SolutionFile, FormatError> {
    let lines = non_empty_lines(source)?;

    if let [line] = lines.as_slice() {
        match line.tokens.as_slice() {
            [token] if token == TIMEOUT_SENTINEL => return Ok(SolutionFile::Timeout),
            [token] if token == UNSAT_SENTINEL => return Ok(SolutionFile::Unsatisfiable),
            _ => {}
        }
    }

    let mut lines = lines.iter();

    let header = lines
        .next()
        .ok_or(FormatError::MissingLine("container dimensions"))?;
    let (container_width, height) = match header.integers()?.as_slice() {
        [width, height] => (*width, *height),
        values => {
            return Err(FormatError::WrongArity {
                line: header.number,
                expected: "the container width and height",
                found: values.len(),
            })
        }
    };

    let count_line = lines
        .next()
        .ok_or(FormatError::MissingLine("number of blocks"))?;
    let n_blocks = match count_line.integers()?.as_slice() {
        [n] => *n as usize,
        values => {
            return Err(FormatError::WrongArity {
                line: count_line.number,
                expected: "the number of blocks",
                found: values.len(),
            })
        }
    };

    let blocks = lines
        .map(|line| {
            let (tokens, rotated) = match line.tokens.split_last() {
                Some((last, rest)) if last == ROTATED_MARKER => (rest, true),
                _ => (line.tokens.as_slice(), false),
            };
            let values = tokens
                .iter()
                .map(|token| {
                    token
                        .parse::<u32>()
                        .map_err(|_| FormatError::InvalidInteger {
                            line: line.number,
                            token: token.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            match values.as_slice() {
                [width, height, x, y] => Ok(PlacedBlock {
                    width: *width,
                    height: *height,
                    x: *x,
                    y: *y,
                    rotated,
                }),
                _ => Err(FormatError::WrongArity {
                    line: line.number,
                    expected: "a block width, height and corner",
                    found: values.len(),
                }),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    if blocks.len() != n_blocks {
        return Err(FormatError::IncorrectBlockCount {
            expected: n_blocks,
            found: blocks.len(),
        });
    }

    Ok(SolutionFile::Solved(SolvedLayout {
        container_width,
        height,
        blocks,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_are_written_alone() {
        let mut buffer = Vec::new();
        write_solution(&mut buffer, &SolutionFile::Timeout).expect("writing to a vec");
        assert_eq!("TIMEOUT\n", String::from_utf8_lossy(&buffer));

        let mut buffer = Vec::new();
        write_solution(&mut buffer, &SolutionFile::Unsatisfiable).expect("writing to a vec");
        assert_eq!("UNSAT\n", String::from_utf8_lossy(&buffer));
    }

    #[test]
    fn sentinels_are_recognised_without_trailing_newline() {
        assert_eq!(
            SolutionFile::Timeout,
            read_solution("TIMEOUT".as_bytes()).expect("valid")
        );
        assert_eq!(
            SolutionFile::Unsatisfiable,
            read_solution("UNSAT".as_bytes()).expect("valid")
        );
    }

    #[test]
    fn rotated_marker_is_parsed() {
        let solution = read_solution("5 4\n2\n4 1 0 0 R\n5 3 0 1\n".as_bytes()).expect("valid");

        let SolutionFile::Solved(layout) = solution else {
            panic!("expected a layout");
        };
        assert_eq!(5, layout.container_width);
        assert_eq!(4, layout.height);
        assert!(layout.blocks[0].rotated);
        assert_eq!((0, 1), (layout.blocks[1].x, layout.blocks[1].y));
        assert!(!layout.blocks[1].rotated);
    }

    #[test]
    fn block_without_corner_is_rejected() {
        let error = read_solution("5 4\n1\n4 1\n".as_bytes()).expect_err("missing corner");

        assert!(matches!(
            error,
            FormatError::WrongArity {
                line: 3,
                found: 2,
                ..
            }
        ));
    }
}
