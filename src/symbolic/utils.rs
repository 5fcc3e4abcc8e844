//! Small helpers shared by the parser and the numeric sampling code:
//! bracket scanning and linearly spaced grids.

/// Returns the index of the closing bracket matching the opening bracket at
/// `open_pos`. `None` if brackets are unbalanced.
pub fn find_matching_bracket(input: &str, open_pos: usize) -> Option<usize> {
    let mut depth = 0;
    for (i, c) in input.char_indices().skip(open_pos) {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Finds the position of the first occurrence of `target` that is not
/// enclosed in brackets.
pub fn find_char_outside_brackets(input: &str, target: char) -> Option<usize> {
    let mut depth = 0;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ if depth == 0 && c == target => return Some(i),
            _ => {}
        }
    }
    None
}

/// Generates `num_values` evenly spaced points from `start` to `end`
/// inclusive.
pub fn linspace(start: f64, end: f64, num_values: usize) -> Vec<f64> {
    if num_values == 1 {
        return vec![start];
    }
    let step = (end - start) / (num_values as f64 - 1.0);
    (0..num_values).map(|i| start + step * i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_matching_bracket() {
        assert_eq!(find_matching_bracket("sin(x + (y))", 3), Some(11));
        assert_eq!(find_matching_bracket("(x", 0), None);
    }

    #[test]
    fn test_find_char_outside_brackets() {
        assert_eq!(find_char_outside_brackets("(a+b)+c", '+'), Some(5));
        assert_eq!(find_char_outside_brackets("(a+b)", '+'), None);
    }

    #[test]
    fn test_linspace() {
        let x = linspace(0.0, 1.0, 5);
        assert_eq!(x, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
    }
}
