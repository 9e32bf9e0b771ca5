/// Length and truncation measured in Unicode scalar values, which is how the
/// platform counts message and option lengths.
pub trait AsChars: AsRef<str> {
    fn char_len(&self) -> usize {
        self.as_ref().chars().count()
    }

    fn char_truncate(&self, new_len: usize) -> &str {
        let s = self.as_ref();
        s.char_indices()
            .nth(new_len)
            .map_or(s, |(boundary, _)| &s[..boundary])
    }
}

impl<T> AsChars for T where T: AsRef<str> + ?Sized {}
