use crate::math::tensor::Tensor;

/// Pixels brighter than this are drawn as `#`.
pub const INK_THRESHOLD: f32 = 177.0;

/// Renders a flattened image as ASCII art, `width` pixels per line,
/// `#` for ink and `.` for background, characters separated by spaces.
pub fn render_ascii(image: &Tensor, width: usize) -> String {
    let mut out = String::with_capacity(image.len() * 2 + image.len() / width.max(1));
    for row in image.data().chunks(width.max(1)) {
        let line: Vec<&str> = row
            .iter()
            .map(|&px| if px > INK_THRESHOLD { "#" } else { "." })
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        let t = Tensor::from_row_major(1, 4, vec![0.0, 177.0, 178.0, 255.0]).unwrap();
        assert_eq!(render_ascii(&t, 2), ". .\n# #\n");
    }
}
