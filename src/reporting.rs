//! Helpers for rendering errors and multi-line messages in logs

use std::error::Error;
use std::fmt;

pub trait ErrorExt {
    /// Displays the error followed by all its sources. The normal form puts each error on its own
    /// line; the alternate form (`{:#}`) joins them with `: ` on a single line.
    fn error_chain(&self) -> ErrorChain<&Self> {
        ErrorChain(self)
    }
}

impl<T: Error> ErrorExt for T {}

pub trait WriteExt {
    fn indents<F, H>(&mut self, first: F, hanging: H) -> IndentWriter<'_, F, H, Self> {
        IndentWriter {
            first: Some(first),
            hanging,
            f: self,
        }
    }

    fn hanging_indent<I>(&mut self, indent: I) -> IndentWriter<'_, &'static str, I, Self> {
        self.indents("", indent)
    }
}

impl<T: fmt::Write> WriteExt for T {}

pub struct ErrorChain<T>(T);

impl<T> fmt::Display for ErrorChain<T>
where
    T: Error,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if f.alternate() { ": " } else { "\n" };
        write!(f, "{}", self.0)?;
        let mut error: Option<&dyn Error> = self.0.source();
        while let Some(e) = error {
            write!(f, "{separator}{e}")?;
            error = e.source();
        }
        Ok(())
    }
}

pub struct IndentWriter<'a, F, H, W: ?Sized> {
    first: Option<F>,
    hanging: H,
    f: &'a mut W,
}

impl<F, H, W> fmt::Write for IndentWriter<'_, F, H, W>
where
    F: fmt::Display,
    H: fmt::Display,
    W: fmt::Write + ?Sized,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if let Some(first) = self.first.take() {
            write!(self.f, "{}", first)?;
        }
        let mut lines = s.split('\n');
        if let Some(line) = lines.next() {
            write!(self.f, "{}", line)?;
        }
        for line in lines {
            write!(self.f, "\n{}{}", self.hanging, line)?;
        }
        Ok(())
    }
}
