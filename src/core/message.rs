//! Message assembly for the plain and line call shapes

use std::fmt::{self, Display, Write};

/// Concatenate every argument with no separator.
pub fn sprint(args: &[&dyn Display]) -> String {
    let mut out = String::new();
    for arg in args {
        // Writing into a String cannot fail.
        let _ = write!(out, "{}", arg);
    }
    out
}

/// Join every argument with a single space.
///
/// The line shape never carries its own terminator; ending the line is the
/// encoder's job.
pub fn sprintln(args: &[&dyn Display]) -> String {
    let mut out = String::new();
    for (idx, arg) in args.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{}", arg);
    }
    out
}

/// Render preformatted arguments, skipping the allocation path when the
/// format string had no placeholders.
pub fn sprintf(args: fmt::Arguments<'_>) -> String {
    match args.as_str() {
        Some(s) => s.to_string(),
        None => args.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprint_concatenates() {
        assert_eq!(sprint(&[&"disk", &"low"]), "disklow");
        assert_eq!(sprint(&[&"code=", &503]), "code=503");
        assert_eq!(sprint(&[]), "");
    }

    #[test]
    fn test_sprintln_joins_with_spaces() {
        assert_eq!(sprintln(&[&"disk", &"low"]), "disk low");
        assert_eq!(sprintln(&[&"retry", &3, &true]), "retry 3 true");
        assert_eq!(sprintln(&[&"single"]), "single");
    }

    #[test]
    fn test_sprintf() {
        assert_eq!(sprintf(format_args!("plain")), "plain");
        assert_eq!(sprintf(format_args!("{} of {}", 1, 2)), "1 of 2");
    }
}
