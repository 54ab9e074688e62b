pub trait StringExt: AsRef<str> {
    /// Wraps the string in single quotes so a POSIX shell reads it as one literal word.
    ///
    /// Embedded single quotes are closed, escaped and reopened: `it's` becomes `'it'\''s'`.
    fn single_quoted(&self) -> String {
        let s = self.as_ref();

        let mut out = String::with_capacity(s.len() + 2);
        out.push('\'');
        for c in s.chars() {
            if c == '\'' {
                out.push_str("'\\''");
            } else {
                out.push(c);
            }
        }
        out.push('\'');
        out
    }
}

impl<T: AsRef<str>> StringExt for T {}

#[cfg(test)]
mod tests {
    use super::StringExt;

    #[test]
    fn it_single_quotes() {
        assert_eq!("Eng".single_quoted(), "'Eng'");
        assert_eq!("Fix bug".single_quoted(), "'Fix bug'");
        assert_eq!("".single_quoted(), "''");
        assert_eq!("it's".single_quoted(), r"'it'\''s'");
        assert_eq!("'; rm -rf ~; '".single_quoted(), r"''\''; rm -rf ~; '\'''");
    }
}
