use std::fmt;

/// The raw notification body: every positional argument joined by one space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationText(String);

impl NotificationText {
    /// Join `args` with single spaces. Returns `None` when there is nothing
    /// to show.
    pub fn from_args<I, S>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter().peekable();
        args.peek()?;

        let mut text = String::new();
        for (i, arg) in args.enumerate() {
            if i > 0 {
                text.push(' ');
            }
            text.push_str(arg.as_ref());
        }
        Some(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NotificationText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
