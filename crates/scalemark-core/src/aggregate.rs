//! Composite aggregation.

use crate::model::CompositeScore;

/// Sums scaled section scores and derives the attempt-level percentage.
pub fn aggregate(scaled: &[i32], total_correct: u32, attempted: u32) -> CompositeScore {
    CompositeScore {
        total: scaled.iter().sum(),
        total_correct,
        attempted,
        percent: percent_correct(total_correct, attempted),
    }
}

/// Round-half-up percentage of `correct / attempted`, capped at 100.
///
/// Integer arithmetic throughout: `155 / 200` is 77.5 and rounds to 78.
/// `attempted == 0` yields 0 rather than an error; an unanswered attempt is
/// simply 0% correct.
pub fn percent_correct(correct: u32, attempted: u32) -> u8 {
    if attempted == 0 {
        return 0;
    }
    let correct = u64::from(correct);
    let attempted = u64::from(attempted);
    let percent = (correct * 200 + attempted) / (attempted * 2);
    percent.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_percent_rounds_up() {
        // 155/200 = 77.5
        assert_eq!(percent_correct(155, 200), 78);
        // 77/200 = 38.5
        assert_eq!(percent_correct(77, 200), 39);
        // 1/2 = 50 exactly
        assert_eq!(percent_correct(1, 2), 50);
    }

    #[test]
    fn below_half_rounds_down() {
        // 1/3 = 33.33
        assert_eq!(percent_correct(1, 3), 33);
        // 76/200 = 38 exactly
        assert_eq!(percent_correct(76, 200), 38);
    }

    #[test]
    fn above_half_rounds_up() {
        // 2/3 = 66.67
        assert_eq!(percent_correct(2, 3), 67);
    }

    #[test]
    fn zero_attempted_is_zero_percent() {
        assert_eq!(percent_correct(0, 0), 0);
        assert_eq!(percent_correct(100, 0), 0);
    }

    #[test]
    fn full_marks_are_exactly_one_hundred() {
        assert_eq!(percent_correct(200, 200), 100);
    }

    #[test]
    fn over_reported_correct_caps_at_one_hundred() {
        assert_eq!(percent_correct(250, 200), 100);
    }

    #[test]
    fn aggregate_sums_sections_and_carries_totals() {
        let composite = aggregate(&[385, 395], 155, 200);
        assert_eq!(composite.total, 780);
        assert_eq!(composite.total_correct, 155);
        assert_eq!(composite.attempted, 200);
        assert_eq!(composite.percent, 78);
    }

    #[test]
    fn two_perfect_sections_reach_the_ceiling() {
        let composite = aggregate(&[495, 495], 200, 200);
        assert_eq!(composite.total, 990);
        assert_eq!(composite.percent, 100);
    }

    #[test]
    fn no_sections_aggregate_to_zero() {
        let composite = aggregate(&[], 0, 0);
        assert_eq!(composite.total, 0);
        assert_eq!(composite.percent, 0);
    }
}
