//! Journal-size milestones

/// Milestones land on multiples of this
pub const MILESTONE_STEP: usize = 5;

/// `ceil(n / 5) * 5 + 5`
pub fn next_milestone(record_count: usize) -> usize {
    record_count.div_ceil(MILESTONE_STEP) * MILESTONE_STEP + MILESTONE_STEP
}

pub fn records_until_next_milestone(record_count: usize) -> usize {
    next_milestone(record_count) - record_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_milestone() {
        let cases = [(0, 5), (1, 10), (4, 10), (5, 10), (6, 15), (9, 15), (10, 15), (11, 20)];
        for (count, expected) in cases {
            assert_eq!(next_milestone(count), expected, "count {}", count);
        }
    }

    #[test]
    fn test_next_milestone_always_ahead() {
        for count in 0..100 {
            let next = next_milestone(count);
            assert!(next > count);
            assert_eq!(next % MILESTONE_STEP, 0);
            assert_eq!(records_until_next_milestone(count), next - count);
        }
    }
}
