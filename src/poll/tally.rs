use super::option::VoteOption;

/// Sum of all vote counts.
pub fn total_votes(options: &[VoteOption]) -> u64 {
    options.iter().map(|o| u64::from(o.votes)).sum()
}

/// Share of `votes` in `total`, in percent. Zero when nobody has voted.
pub fn percentage(votes: u32, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(votes) / total as f64 * 100.0
}

/// Percentages for every option, in registry order.
pub fn percentages(options: &[VoteOption]) -> Vec<f64> {
    let total = total_votes(options);
    options.iter().map(|o| percentage(o.votes, total)).collect()
}
