use crate::error::{Error, Result};

/// The data stack: signed integers, last in first out.
///
/// The checked helpers never touch the stack when they fail, so an
/// operation that errors out leaves it exactly as it found it. That
/// includes `push` on a stack that is already at its size limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    values: Vec<i64>,
    limit: Option<usize>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stack that refuses to hold more than `limit` values (`None` for no bound).
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            values: Vec::new(),
            limit,
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn push(&mut self, value: i64) -> Result<()> {
        if let Some(limit) = self.limit {
            if self.values.len() >= limit {
                return Err(Error::StackOverflow { limit });
            }
        }
        self.values.push(value);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<i64> {
        self.values.pop()
    }

    pub fn peek(&self) -> Option<i64> {
        self.values.last().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bottom first.
    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }

    /// Fails unless at least `needed` values are present.
    pub fn require(&self, needed: usize, action: &'static str) -> Result<()> {
        if self.values.len() < needed {
            return Err(Error::StackUnderflow { action, needed });
        }
        Ok(())
    }

    pub fn pop_checked(&mut self, action: &'static str) -> Result<i64> {
        self.values.pop().ok_or(Error::StackUnderflow { action, needed: 1 })
    }

    pub fn peek_checked(&self, action: &'static str) -> Result<i64> {
        self.peek().ok_or(Error::StackUnderflow { action, needed: 1 })
    }

    /// Pops the top two values and returns them as `(second, top)`.
    pub fn pop_pair(&mut self, action: &'static str) -> Result<(i64, i64)> {
        self.require(2, action)?;
        let base = self.values.len() - 2;
        let pair = (self.values[base], self.values[base + 1]);
        self.values.truncate(base);
        Ok(pair)
    }

    /// Returns `(second, top)` without removing them.
    pub fn peek_pair(&self, action: &'static str) -> Result<(i64, i64)> {
        self.require(2, action)?;
        let base = self.values.len() - 2;
        Ok((self.values[base], self.values[base + 1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_peek_sequence() {
        let mut s = Stack::new();
        assert_eq!(s.len(), 0);

        s.push(42).unwrap();
        s.push(13).unwrap();
        assert_eq!(s.len(), 2);

        assert_eq!(s.peek(), Some(13));
        assert_eq!(s.len(), 2);

        assert_eq!(s.pop(), Some(13));
        assert_eq!(s.pop(), Some(42));
        assert!(s.is_empty());

        s.push(108).unwrap();
        assert_eq!(s.pop(), Some(108));
        assert_eq!(s.pop(), None);
        assert_eq!(s.peek(), None);
    }

    #[test]
    fn test_pop_pair_order() {
        let mut s = Stack::new();
        for v in [1, 2, 3] {
            s.push(v).unwrap();
        }
        assert_eq!(s.peek_pair("look").unwrap(), (2, 3));
        assert_eq!(s.pop_pair("take").unwrap(), (2, 3));
        assert_eq!(s.as_slice(), &[1]);
    }

    #[test]
    fn test_checked_helpers_leave_stack_alone_on_failure() {
        let mut s = Stack::new();
        s.push(7).unwrap();

        let err = s.pop_pair("add").unwrap_err();
        assert!(matches!(
            err,
            Error::StackUnderflow {
                action: "add",
                needed: 2
            }
        ));
        assert_eq!(s.as_slice(), &[7]);

        assert!(s.require(1, "dup").is_ok());
        assert_eq!(s.pop_checked("drop").unwrap(), 7);
        assert!(matches!(
            s.peek_checked("dup"),
            Err(Error::StackUnderflow { needed: 1, .. })
        ));
    }

    #[test]
    fn test_push_at_limit_is_rejected_before_growing() {
        let mut s = Stack::with_limit(Some(2));
        s.push(1).unwrap();
        s.push(2).unwrap();

        let err = s.push(3).unwrap_err();
        assert!(matches!(err, Error::StackOverflow { limit: 2 }));
        assert_eq!(s.as_slice(), &[1, 2]);

        s.pop();
        assert!(s.push(4).is_ok());
        assert_eq!(s.as_slice(), &[1, 4]);
        assert_eq!(Stack::new().limit(), None);
    }
}
