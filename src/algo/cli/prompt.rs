//! Line prompts for `add` when fields are missing and stdin is a terminal.

use algo::error::Result;
use std::io::{self, BufRead, IsTerminal, Write};

pub(super) fn interactive() -> bool {
    io::stdin().is_terminal()
}

/// Asks for one value on the terminal.
pub(super) fn ask(label: &str) -> Result<String> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    read_value(&mut input, &mut output, label)
}

/// Reads one logical line. A line ending in `\` continues on the next one;
/// the pieces are joined with a newline. End of input ends the value.
fn read_value<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<String> {
    write!(output, "{}: ", label)?;
    output.flush()?;

    let mut value = String::new();
    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\n', '\r']);
        match line.strip_suffix('\\') {
            Some(head) => {
                value.push_str(head);
                value.push('\n');
                write!(output, "> ")?;
                output.flush()?;
            }
            None => {
                value.push_str(line);
                break;
            }
        }
    }
    Ok(value.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(input: &str) -> (String, String) {
        let mut out = Vec::new();
        let value = read_value(&mut Cursor::new(input), &mut out, "Title").unwrap();
        (value, String::from_utf8(out).unwrap())
    }

    #[test]
    fn single_line() {
        let (value, shown) = read("Two Sum\nleftover\n");
        assert_eq!(value, "Two Sum");
        assert_eq!(shown, "Title: ");
    }

    #[test]
    fn backslash_continues() {
        let (value, shown) = read("first \\\nsecond\\\nthird\n");
        assert_eq!(value, "first \nsecond\nthird");
        assert_eq!(shown, "Title: > > ");
    }

    #[test]
    fn eof_ends_value() {
        assert_eq!(read("").0, "");
        assert_eq!(read("no newline").0, "no newline");
    }
}
