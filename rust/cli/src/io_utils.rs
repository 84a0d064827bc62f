//! Small I/O helpers shared by the commands.

use std::io::BufRead;
use std::path::Path;

/// Reads one line from `input`, trimmed.
///
/// Returns `None` on EOF or on a read error, which interactive commands treat
/// as the user walking away.
///
/// ```rust,no_run
/// use std::io;
/// # use holdem_cli::io_utils::read_stdin_line;
///
/// let stdin = io::stdin();
/// let mut handle = stdin.lock();
/// if let Some(line) = read_stdin_line(&mut handle) {
///     println!("You entered: {}", line);
/// }
/// ```
pub fn read_stdin_line(input: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

/// Read a whole text file, dropping a leading UTF-8 BOM if an editor added one.
pub fn read_text(path: &Path) -> std::io::Result<String> {
    let mut s = std::fs::read_to_string(path)?;
    strip_utf8_bom(&mut s);
    Ok(s)
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_read_stdin_line_trims() {
        let mut cursor = Cursor::new(b"  raise 40  \n".to_vec());
        assert_eq!(read_stdin_line(&mut cursor), Some("raise 40".to_string()));
    }

    #[test]
    fn test_read_stdin_line_blank_line_is_empty_not_eof() {
        let mut cursor = Cursor::new(b"   \n".to_vec());
        assert_eq!(read_stdin_line(&mut cursor), Some(String::new()));
    }

    #[test]
    fn test_read_stdin_line_eof() {
        let mut cursor = Cursor::new(Vec::new());
        assert_eq!(read_stdin_line(&mut cursor), None);
    }

    #[test]
    fn test_read_stdin_line_consumes_one_line_at_a_time() {
        let mut cursor = Cursor::new(b"call\nfold\n".to_vec());
        assert_eq!(read_stdin_line(&mut cursor).as_deref(), Some("call"));
        assert_eq!(read_stdin_line(&mut cursor).as_deref(), Some("fold"));
        assert_eq!(read_stdin_line(&mut cursor), None);
    }

    #[test]
    fn test_strip_utf8_bom() {
        let mut s = "\u{feff}hello".to_string();
        strip_utf8_bom(&mut s);
        assert_eq!(s, "hello");

        let mut plain = "hello".to_string();
        strip_utf8_bom(&mut plain);
        assert_eq!(plain, "hello");
    }

    #[test]
    fn test_read_text_strips_bom() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all("\u{feff}players = 3\n".as_bytes()).unwrap();
        assert_eq!(read_text(file.path()).unwrap(), "players = 3\n");
    }

    #[test]
    fn test_read_text_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_text(&dir.path().join("absent.toml")).is_err());
    }
}
