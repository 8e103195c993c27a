use core::fmt;
use crate::{Cursor, Error, PeekCursor, Result};

/// A lazy cursor applying a function to every element of another.
///
/// `f` runs once per element handed out by [`next`], never on construction and
/// never from [`has_next`]. Element count and order are those of the
/// underlying cursor.
///
/// ```
/// # use lazy_cursor::{Cursor, Seq};
/// # use std::cell::Cell;
/// let calls = Cell::new(0);
/// let src = [1, 2, 3];
/// let mut doubled = Seq::new(&src).map(|n| { calls.set(calls.get() + 1); n * 2 });
///
/// assert!(doubled.has_next());
/// assert_eq!(calls.get(), 0);
///
/// assert_eq!(doubled.next(), Ok(2));
/// assert_eq!(calls.get(), 1);
/// ```
///
/// [`next`]: Cursor::next
/// [`has_next`]: Cursor::has_next
#[derive(Clone)]
pub struct Map<C, F> {
    cursor: C,
    f: F
}

impl<C, F> Map<C, F> {
    #[inline]
    pub(crate) const fn new(cursor: C, f: F) -> Self {
        Self { cursor, f }
    }
}

impl<C: fmt::Debug, F> fmt::Debug for Map<C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map").field("cursor", &self.cursor).finish_non_exhaustive()
    }
}

impl<C, F, U> Cursor for Map<C, F>
    where
        C: Cursor,
        F: FnMut(C::Item) -> U
{
    type Item = U;

    #[inline]
    fn has_next(&mut self) -> bool {
        self.cursor.has_next()
    }

    #[inline]
    fn next(&mut self) -> Result<U> {
        self.cursor.next().map(&mut self.f)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}

/// A lazy cursor yielding only the elements accepted by a predicate.
///
/// The underlying cursor is peekable: [`has_next`] peeks the next candidate,
/// tests it, and discards it if rejected, until a candidate is accepted or the
/// underlying cursor runs dry. The predicate therefore runs exactly once per
/// candidate, and only when an element is asked for: an accepted candidate
/// stays accepted until [`next`] hands it out. Rejected elements are gone for
/// good.
///
/// ```
/// # use lazy_cursor::{Cursor, Seq, to_vec};
/// let src = [1, 2, 3, 4, 5, 6];
/// let evens = Seq::new(&src).filter(|n| *n % 2 == 0);
///
/// assert_eq!(to_vec(evens), Ok(vec![&2, &4, &6]));
/// ```
///
/// [`has_next`]: Cursor::has_next
/// [`next`]: Cursor::next
#[derive(Clone)]
pub struct Filter<P, F> {
    cursor: P,
    predicate: F,
    accepted: bool
}

impl<P, F> Filter<P, F> {
    #[inline]
    pub(crate) const fn new(cursor: P, predicate: F) -> Self {
        Self { cursor, predicate, accepted: false }
    }
}

impl<P: fmt::Debug, F> fmt::Debug for Filter<P, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("cursor", &self.cursor)
            .field("accepted", &self.accepted)
            .finish_non_exhaustive()
    }
}

impl<P, F> Cursor for Filter<P, F>
    where
        P: PeekCursor,
        F: FnMut(&P::Item) -> bool
{
    type Item = P::Item;

    fn has_next(&mut self) -> bool {
        // the buffered candidate already passed
        if self.accepted {
            return true;
        }

        while self.cursor.has_next() {
            let accepted = match self.cursor.peek() {
                Ok(candidate) => (self.predicate)(candidate),
                Err(_) => return false
            };

            if accepted {
                self.accepted = true;
                return true;
            }

            // rejected, drop it from the peek buffer
            if self.cursor.next().is_err() {
                return false;
            }
        }

        false
    }

    #[inline]
    fn next(&mut self) -> Result<Self::Item> {
        if self.has_next() {
            self.accepted = false;
            self.cursor.next()
        } else {
            Err(Error::ExhaustedIterator)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.cursor.size_hint().1)
    }
}
