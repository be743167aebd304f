//! In-memory quote history.
//!
//! An append-only, insertion-ordered buffer of quotes owned by one scheduler.
//! It is unbounded unless a limit is given; with a limit the oldest quote is
//! evicted from the front, so the remaining entries keep their relative order
//! and no interior entry is ever dropped.
//!
//! The history is not synchronized; the scheduler wraps it in a `Mutex` and
//! only its worker thread appends.
use std::collections::VecDeque;
use std::num::NonZeroUsize;

use stock_common::Quote;

/// Ordered sequence of observed quotes.
#[derive(Debug, Clone, Default)]
pub struct History {
    quotes: VecDeque<Quote>,
    limit: Option<NonZeroUsize>,
}

impl History {
    /// Create an unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `limit` quotes.
    pub fn with_limit(limit: NonZeroUsize) -> Self {
        Self {
            quotes: VecDeque::with_capacity(limit.get()),
            limit: Some(limit),
        }
    }

    /// Append a quote. Returns the evicted oldest quote when the limit is reached.
    pub fn push(&mut self, quote: Quote) -> Option<Quote> {
        let evicted = match self.limit {
            Some(limit) if self.quotes.len() >= limit.get() => self.quotes.pop_front(),
            _ => None,
        };
        self.quotes.push_back(quote);
        evicted
    }

    /// Number of quotes held.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// True when nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Most recent quote.
    pub fn latest(&self) -> Option<&Quote> {
        self.quotes.back()
    }

    /// Quotes from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Quote> {
        self.quotes.iter()
    }

    /// Owned copy of the quotes, oldest first.
    pub fn snapshot(&self) -> Vec<Quote> {
        self.quotes.iter().cloned().collect()
    }

    /// Configured limit, if any.
    pub fn limit(&self) -> Option<NonZeroUsize> {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn quote(n: i64) -> Quote {
        Quote::new("TST", "Test Corp", Decimal::from(n), format!("2024-01-01 00:00:{:02}", n)).unwrap()
    }

    fn prices(history: &History) -> Vec<Decimal> {
        history.iter().map(|q| q.price()).collect()
    }

    #[test]
    fn keeps_insertion_order() {
        let mut history = History::new();
        for n in 0..5 {
            assert!(history.push(quote(n)).is_none());
        }
        assert_eq!(history.len(), 5);
        assert_eq!(prices(&history), (0..5).map(Decimal::from).collect::<Vec<_>>());
        assert_eq!(history.latest().map(|q| q.price()), Some(Decimal::from(4)));
        assert!(history.limit().is_none());
    }

    #[test]
    fn limit_evicts_from_the_front_only() {
        let mut history = History::with_limit(NonZeroUsize::new(3).unwrap());
        for n in 0..3 {
            history.push(quote(n));
        }
        let evicted = history.push(quote(3)).unwrap();
        assert_eq!(evicted.price(), Decimal::from(0));
        history.push(quote(4));

        assert_eq!(history.len(), 3);
        assert_eq!(
            prices(&history),
            vec![Decimal::from(2), Decimal::from(3), Decimal::from(4)]
        );
    }

    #[test]
    fn snapshot_is_detached() {
        let mut history = History::new();
        history.push(quote(1));
        let mut copy = history.snapshot();
        copy.clear();
        assert_eq!(history.len(), 1);
        assert!(!history.is_empty());
    }
}
