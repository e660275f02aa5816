//! Small parsers for pulling values out of raw process or `/proc` output
//!
//! A [`Cursor`] walks a borrowed buffer. Each step either consumes input and
//! returns what it found, or leaves the cursor where it was.

/// Position in a text buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    /// Unconsumed input
    pub fn rest(&self) -> &'a str {
        self.rest
    }

    pub fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    /// Consume through the end of the current line
    ///
    /// Returns `false` if the buffer ends before a newline; the rest of the
    /// buffer is consumed either way.
    pub fn skip_rest_of_line(&mut self) -> bool {
        match self.rest.find('\n') {
            Some(pos) => {
                self.rest = &self.rest[pos + 1..];
                true
            }
            None => {
                self.rest = "";
                false
            }
        }
    }

    /// Skip whitespace, then read an unsigned number with an optional
    /// fractional part
    pub fn number(&mut self) -> Option<f64> {
        let trimmed = self.rest.trim_start();
        let int_len = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if int_len == 0 {
            return None;
        }

        let mut end = int_len;
        if let Some(frac) = trimmed[int_len..].strip_prefix('.') {
            let frac_len = frac.find(|c: char| !c.is_ascii_digit()).unwrap_or(frac.len());
            if frac_len > 0 {
                end += 1 + frac_len;
            }
        }

        let value = trimmed[..end].parse().ok()?;
        self.rest = &trimmed[end..];
        Some(value)
    }

    /// Every number up to the end of the current line, skipping any
    /// non-numeric words
    pub fn numbers_on_line(&mut self) -> Vec<f64> {
        let line_end = self.rest.find('\n').unwrap_or(self.rest.len());
        let mut line = Cursor::new(&self.rest[..line_end]);
        let mut numbers = Vec::new();
        while !line.rest.trim_start().is_empty() {
            match line.number() {
                Some(n) => numbers.push(n),
                None => {
                    let word = line.rest.trim_start();
                    let skip = word.find(char::is_whitespace).unwrap_or(word.len());
                    line.rest = &word[skip..];
                }
            }
        }
        self.rest = &self.rest[line_end..];
        numbers
    }

    /// Text up to the first of `delims`, consuming the delimiter too
    ///
    /// Returns `None`, consuming nothing, when no delimiter occurs.
    pub fn all_but(&mut self, delims: &str) -> Option<&'a str> {
        let pos = self.rest.find(|c: char| delims.contains(c))?;
        let taken = &self.rest[..pos];
        let delim_len = self.rest[pos..].chars().next().map_or(0, char::len_utf8);
        self.rest = &self.rest[pos + delim_len..];
        Some(taken)
    }

    /// The rest of the line following `marker`
    ///
    /// A marker at the end of its line yields an empty string. When the
    /// marker is absent the result is the sentinel `<MARKER not found!>`
    /// and the cursor is unchanged.
    pub fn after(&mut self, marker: &str) -> String {
        let found = self.rest.find(marker).map(|pos| {
            let tail = &self.rest[pos + marker.len()..];
            let line_end = tail.find('\n').unwrap_or(tail.len());
            (&tail[..line_end], &tail[line_end..])
        });
        match found {
            Some((value, remaining)) => {
                self.rest = remaining;
                value.to_string()
            }
            None => format!("<{} not found!>", marker),
        }
    }

    /// Consume everything through the next `marker`
    ///
    /// Returns `false`, consuming nothing, when the marker is absent.
    pub fn skip_till(&mut self, marker: &str) -> bool {
        match self.rest.find(marker) {
            Some(pos) => {
                self.rest = &self.rest[pos + marker.len()..];
                true
            }
            None => false,
        }
    }
}
