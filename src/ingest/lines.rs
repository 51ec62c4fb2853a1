/// Hex characters in an MD5 digest.
pub const MD5_HEX_LEN: usize = 32;

#[derive(Debug, PartialEq, Eq)]
pub enum HashLine<'a> {
    Comment,
    Candidate(&'a str),
    WrongLength(usize),
}

/// Strips trailing whitespace and sorts the line into comment, candidate
/// hash or wrong length. Content is not checked for hex digits here.
pub fn classify_line(line: &str) -> HashLine<'_> {
    let line = line.trim_end();
    if line.starts_with('#') {
        return HashLine::Comment;
    }

    match line.chars().count() {
        MD5_HEX_LEN => HashLine::Candidate(line),
        len => HashLine::WrongLength(len),
    }
}
