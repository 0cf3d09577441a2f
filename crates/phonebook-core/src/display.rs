/// Splits a joined number into display lines, breaking before each `/` or
/// `~` separator. Blank pieces are dropped.
pub fn number_lines(number: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    for (index, ch) in number.char_indices() {
        if matches!(ch, '/' | '~') && index > start {
            lines.push(number[start..index].trim());
            start = index;
        }
    }
    lines.push(number[start..].trim());
    lines.retain(|line| !line.is_empty());
    lines
}
