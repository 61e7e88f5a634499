use std::io::Write;

use crate::InstanceFile;

/// Write the instance as MiniZinc data for the declarative model.
///
/// The model expects the parameters `max_width`, `n_blocks`, `width` and `height`; any height
/// cap is not part of the data.
///
/// # Example
/// ```
/// use packing_format::InstanceFile;
///
/// let instance = InstanceFile {
///     container_width: 8,
///     height_cap: None,
///     blocks: vec![(3, 3), (3, 5), (5, 3)],
/// };
///
/// let mut buffer = Vec::new();
/// packing_format::write_dzn(&mut buffer, &instance).expect("writing to a vec");
/// assert_eq!(
///     "max_width = 8;\nn_blocks = 3;\nwidth = [3, 3, 5];\nheight = [3, 5, 3];\n",
///     String::from_utf8_lossy(&buffer)
/// );
/// ```
pub fn write_dzn(mut sink: impl Write, instance: &InstanceFile) -> std::io::Result<()> {
    let widths = instance.blocks.iter().map(|(width, _)| *width);
    let heights = instance.blocks.iter().map(|(_, height)| *height);

    writeln!(sink, "max_width = {};", instance.container_width)?;
    writeln!(sink, "n_blocks = {};", instance.blocks.len())?;
    writeln!(sink, "width = {};", dzn_array(widths))?;
    writeln!(sink, "height = {};", dzn_array(heights))?;

    Ok(())
}

fn dzn_array(values: impl Iterator<Item = u32>) -> String {
    let values = values.map(|value| value.to_string()).collect::<Vec<_>>();
    format!("[{}]", values.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_instance_has_empty_arrays() {
        let instance = InstanceFile {
            container_width: 4,
            height_cap: Some(3),
            blocks: vec![],
        };

        let mut buffer = Vec::new();
        write_dzn(&mut buffer, &instance).expect("writing to a vec");

        assert_eq!(
            "max_width = 4;\nn_blocks = 0;\nwidth = [];\nheight = [];\n",
            String::from_utf8_lossy(&buffer)
        );
    }
}
