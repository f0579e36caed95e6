/// Trailing escape that continues a statement onto the next line.
pub struct Escape;

impl Escape {
    pub const CHAR: u8 = b'\\';
    /// Suffix a comment line needs to keep a record open.
    pub const TERMINATED_SUFFIX: &'static str = ";\\";

    /// Local index of the trailing escape byte, ignoring trailing blanks.
    pub fn trailing(line: &str) -> Option<usize> {
        let trimmed = line.trim_end();
        if trimmed.as_bytes().last() == Some(&Self::CHAR) {
            Some(trimmed.len() - 1)
        } else {
            None
        }
    }
}

/// Statement terminator.
pub struct Terminator;

impl Terminator {
    pub const CHAR: u8 = b';';

    /// Whether the byte at `i` is a `;` not preceded by an escape.
    pub fn is_unescaped_at(bytes: &[u8], i: usize) -> bool {
        bytes.get(i) == Some(&Self::CHAR) && (i == 0 || bytes[i - 1] != Escape::CHAR)
    }

    /// Local index of the first un-escaped terminator in `s`.
    pub fn find(s: &str) -> Option<usize> {
        let b = s.as_bytes();
        (0..b.len()).find(|&i| Self::is_unescaped_at(b, i))
    }
}
