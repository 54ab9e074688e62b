pub mod shell;
pub mod string;

pub use self::shell::*;
pub use self::string::*;

pub trait IteratorExt: Iterator {
    /// Same as [`Iterator::collect`] but returns [`None`] if the iterator is empty,
    /// otherwsie returns [`Some<T>`].
    fn collect_non_empty<B: FromIterator<Self::Item>>(self) -> Option<B>;
}

impl<T: Iterator> IteratorExt for T {
    fn collect_non_empty<B: FromIterator<Self::Item>>(self) -> Option<B> {
        let mut peek = self.peekable();
        peek.peek().is_some().then(|| peek.collect())
    }
}
