//! The two line sequences shown in the panes.

use crate::error::ContentError;

/// Lines of one file, normalized for display.
///
/// Blank lines are dropped, trailing whitespace is stripped and tabs are
/// expanded, so every stored line renders one character per column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSequence {
    lines: Vec<String>,
    max_width: usize,
}

impl LineSequence {
    pub fn normalize<I, S>(raw: I, tab_width: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tab = " ".repeat(tab_width);
        let lines: Vec<String> = raw
            .into_iter()
            .filter(|line| !line.as_ref().trim().is_empty())
            .map(|line| line.as_ref().trim_end().replace('\t', &tab))
            .collect();
        let max_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        Self { lines, max_width }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Widest line, in characters.
    pub fn max_width(&self) -> usize {
        self.max_width
    }

    /// Line at a signed row index; `None` outside `0..len`.
    pub fn line(&self, index: isize) -> Option<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.lines.get(i))
            .map(String::as_str)
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

/// Characters `start..start + width` of `line`.
pub fn char_window(line: &str, start: usize, width: usize) -> String {
    line.chars().skip(start).take(width).collect()
}

/// Decode raw file bytes into lines, rejecting files that cannot be shown.
pub fn decode_text(name: &str, bytes: &[u8]) -> Result<Vec<String>, ContentError> {
    if bytes.is_empty() {
        return Err(ContentError::Empty { name: name.to_string() });
    }
    let text = std::str::from_utf8(bytes).map_err(|_| ContentError::NotPrintable {
        name: name.to_string(),
    })?;
    if text.chars().any(is_unprintable) {
        return Err(ContentError::NotPrintable { name: name.to_string() });
    }
    Ok(text.lines().map(str::to_string).collect())
}

fn is_unprintable(c: char) -> bool {
    c.is_control() && !matches!(c, '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}
