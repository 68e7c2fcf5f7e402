//! Consensus scoring
//!
//! A 0..1 agreement metric across all agent pairs and options. Used for
//! reporting only; the deliberation loop terminates on the disagreement
//! detector, not on this score.

use crate::evaluation::{AgentEvaluation, MAX_SCORE, MIN_SCORE};

/// Largest possible gap between two scores
const MAX_DIFFERENCE: f64 = (MAX_SCORE - MIN_SCORE) as f64;

/// Overall agreement across evaluations: 1 = identical scores, 0 = maximal spread.
///
/// Averages `|a - b|` over every unordered agent pair and every option both
/// agents scored, then returns `1 - avg / 9` clamped to `[0, 1]`. Fewer than
/// two evaluations, or no comparable pair, counts as perfect agreement.
///
/// # Example
///
/// ```
/// use council_domain::{AgentEvaluation, AgentType, OptionScore};
/// use council_domain::deliberation::consensus_score;
///
/// let evals = vec![
///     AgentEvaluation::new(AgentType::Financial).with_score(OptionScore::new("a", 1, "")),
///     AgentEvaluation::new(AgentType::Risk).with_score(OptionScore::new("a", 10, "")),
/// ];
/// assert_eq!(consensus_score(&evals), 0.0);
/// assert_eq!(consensus_score(&evals[..1]), 1.0);
/// ```
pub fn consensus_score(evaluations: &[AgentEvaluation]) -> f64 {
    if evaluations.len() < 2 {
        return 1.0;
    }

    let mut total_difference = 0u64;
    let mut comparisons = 0u64;

    for (i, first) in evaluations.iter().enumerate() {
        for second in &evaluations[i + 1..] {
            for score1 in &first.option_scores {
                if let Some(score2) = second.score_for(&score1.option_id) {
                    total_difference += score1.difference(score2) as u64;
                    comparisons += 1;
                }
            }
        }
    }

    if comparisons == 0 {
        return 1.0;
    }

    let avg_difference = total_difference as f64 / comparisons as f64;
    (1.0 - avg_difference / MAX_DIFFERENCE).clamp(0.0, 1.0)
}
