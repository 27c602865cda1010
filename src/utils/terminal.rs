//! Terminal output sanitization for cell values.
//!
//! Uploaded files are untrusted. A cell may carry ANSI escape sequences or control
//! characters that would repaint the terminal when a table is printed, or embedded
//! newlines that break the row layout. [`sanitize_cell`] is applied to every value
//! the `table` command prints in text mode. CSV and JSON output are left untouched,
//! since their writers quote or escape as needed.

/// Make a cell value safe to print on a single terminal line
///
/// Removes ANSI CSI sequences (`ESC [ ... letter`) and control characters, and
/// turns tabs and line breaks into single spaces.
///
/// # Examples
///
/// ```
/// use peer_portal::utils::terminal::sanitize_cell;
///
/// assert_eq!(sanitize_cell("\x1b[31mKenya\x1b[0m"), "Kenya");
/// assert_eq!(sanitize_cell("two\nlines"), "two lines");
/// ```
pub fn sanitize_cell(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            if chars.peek() == Some(&'[') {
                chars.next();
                while let Some(next_ch) = chars.next() {
                    if next_ch.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
            continue;
        }

        match ch {
            '\t' | '\n' => result.push(' '),
            '\r' => {
                // CRLF collapses to one space
                if chars.peek() != Some(&'\n') {
                    result.push(' ');
                }
            }
            c if c.is_control() => {}
            c => result.push(c),
        }
    }

    result
}
