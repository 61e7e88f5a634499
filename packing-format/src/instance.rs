use std::io::Read;
use std::io::Write;

use crate::lines::non_empty_lines;
use crate::FormatError;

/// The contents of an instance file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstanceFile {
    pub container_width: u32,
    /// Some instance variants also fix an upper limit on the container height.
    pub height_cap: Option<u32>,
    /// The `(width, height)` of every block, in file order.
    pub blocks: Vec<(u32, u32)>,
}

/// Parse an instance from the source.
///
/// # Example
/// ```
/// let source = "8\n3\n3 3\n3 5\n5 3\n";
///
/// let instance = packing_format::read_instance(source.as_bytes()).expect("valid instance");
/// assert_eq!(8, instance.container_width);
/// assert_eq!(None, instance.height_cap);
/// assert_eq!(vec![(3, 3), (3, 5), (5, 3)], instance.blocks);
/// ```
pub fn read_instance(source: impl Read) -> Result<InstanceFile, FormatError> {
    let lines = non_empty_lines(source)?;
    let mut lines = lines.iter();

    let header = lines
        .next()
        .ok_or(FormatError::MissingLine("container width"))?;
    let (container_width, height_cap) = match header.integers()?.as_slice() {
        [width] => (*width, None),
        [width, cap] => (*width, Some(*cap)),
        values => {
            return Err(FormatError::WrongArity {
                line: header.number,
                expected: "the container width and an optional height cap",
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
        .map(|line| match line.integers()?.as_slice() {
            [width, height] => Ok((*width, *height)),
            values => Err(FormatError::WrongArity {
                line: line.number,
                expected: "a block width and height",
                found: values.len(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if blocks.len() != n_blocks {
        return Err(FormatError::IncorrectBlockCount {
            expected: n_blocks,
            found: blocks.len(),
        });
    }

    Ok(InstanceFile {
        container_width,
        height_cap,
        blocks,
    })
}

/// Write the instance in the layout accepted by [`read_instance`].
pub fn write_instance(mut sink: impl Write, instance: &InstanceFile) -> std::io::Result<()> {
    match instance.height_cap {
        Some(cap) => writeln!(sink, "{} {cap}", instance.container_width)?,
        None => writeln!(sink, "{}", instance.container_width)?,
    }
    writeln!(sink, "{}", instance.blocks.len())?;

    for (width, height) in instance.blocks.iter() {
        writeln!(sink, "{width} {height}")?;
    }

    Ok(())
}
