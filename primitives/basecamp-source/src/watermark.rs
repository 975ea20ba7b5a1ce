use chrono::{DateTime, Utc};

/// Creation time of the newest event already handed downstream.
///
/// Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Watermark(DateTime<Utc>);

impl Watermark {
    pub fn new(since: DateTime<Utc>) -> Self {
        Self(since)
    }

    pub fn since(&self) -> DateTime<Utc> {
        self.0
    }

    /// Advance to `created_at` if it is newer. Returns whether it moved.
    pub fn observe(&mut self, created_at: DateTime<Utc>) -> bool {
        if created_at > self.0 {
            self.0 = created_at;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn advances_only_forward() {
        let start = Utc::now();
        let mut mark = Watermark::new(start);

        assert!(!mark.observe(start - Duration::minutes(5)));
        assert!(!mark.observe(start));
        assert_eq!(mark.since(), start);

        assert!(mark.observe(start + Duration::seconds(1)));
        assert_eq!(mark.since(), start + Duration::seconds(1));
    }
}
