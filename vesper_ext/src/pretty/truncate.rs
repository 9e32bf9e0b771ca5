use std::borrow::Cow;

use crate::as_chars::AsChars;

pub trait PrettyTruncator: AsChars {
    fn trail() -> &'static str;
    fn pretty_truncate(&self, new_len: usize) -> Cow<'_, str> {
        let s = self.as_ref();
        if s.char_len() <= new_len {
            return Cow::Borrowed(s);
        }

        let trail = Self::trail();
        let kept = s.char_truncate(new_len.saturating_sub(trail.char_len()));
        Cow::Owned(String::from(kept) + trail)
    }
}

impl PrettyTruncator for str {
    fn trail() -> &'static str {
        "…"
    }
}
