//! Bounded attempts at getting an acceptable answer

/// Result of running an [`Attempts`] budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// An attempt produced a value
    Accepted(T),
    /// Every attempt was rejected
    Exhausted { attempts: u32 },
}

/// A fixed budget of attempts.
///
/// Each attempt is independent: it gets its 1-based index and nothing else.
#[derive(Debug, Clone, Copy)]
pub struct Attempts {
    max: u32,
}

impl Attempts {
    pub fn new(max: u32) -> Self {
        Self { max: max.max(1) }
    }

    /// Run `attempt` until it returns `Ok(Some(_))` or the budget is spent.
    ///
    /// `Ok(None)` rejects the attempt; `on_rejected` then receives the number
    /// of attempts left, but only while that number is non-zero. Errors end the
    /// run immediately.
    pub fn run<T, E, A, R>(&self, mut attempt: A, mut on_rejected: R) -> Result<Outcome<T>, E>
    where
        A: FnMut(u32) -> Result<Option<T>, E>,
        R: FnMut(u32),
    {
        for n in 1..=self.max {
            if let Some(value) = attempt(n)? {
                return Ok(Outcome::Accepted(value));
            }

            let remaining = self.max - n;
            tracing::debug!(attempt = n, remaining, "Attempt rejected");
            if remaining > 0 {
                on_rejected(remaining);
            }
        }

        Ok(Outcome::Exhausted {
            attempts: self.max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_attempt_accepted() {
        let outcome: Result<_, ()> = Attempts::new(3).run(|_| Ok(Some("ok")), |_| panic!());
        assert_eq!(outcome, Ok(Outcome::Accepted("ok")));
    }

    #[test]
    fn test_accepted_after_rejections() {
        let mut notices = Vec::new();
        let outcome: Result<_, ()> = Attempts::new(3).run(
            |n| Ok((n == 3).then_some(n)),
            |remaining| notices.push(remaining),
        );

        assert_eq!(outcome, Ok(Outcome::Accepted(3)));
        assert_eq!(notices, vec![2, 1]);
    }

    #[test]
    fn test_exhausted_skips_final_notice() {
        let mut calls = 0;
        let mut notices = Vec::new();
        let outcome: Result<Outcome<()>, ()> = Attempts::new(3).run(
            |_| {
                calls += 1;
                Ok(None)
            },
            |remaining| notices.push(remaining),
        );

        assert_eq!(outcome, Ok(Outcome::Exhausted { attempts: 3 }));
        assert_eq!(calls, 3);
        assert_eq!(notices, vec![2, 1]);
    }

    #[test]
    fn test_error_stops_immediately() {
        let mut calls = 0;
        let outcome: Result<Outcome<()>, &str> = Attempts::new(3).run(
            |_| {
                calls += 1;
                Err("io")
            },
            |_| {},
        );

        assert_eq!(outcome, Err("io"));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_zero_budget_still_tries_once() {
        let mut calls = 0;
        let outcome: Result<Outcome<()>, ()> = Attempts::new(0).run(
            |_| {
                calls += 1;
                Ok(None)
            },
            |_| panic!(),
        );

        assert_eq!(outcome, Ok(Outcome::Exhausted { attempts: 1 }));
        assert_eq!(calls, 1);
    }
}
