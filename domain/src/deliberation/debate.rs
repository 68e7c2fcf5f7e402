//! Debate log and adjudication outcome

use super::disagreement::Disagreement;
use crate::core::agent_type::AgentType;
use crate::evaluation::{MAX_SCORE, extract_json_object};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Resolution text recorded when adjudication fails
pub const UNRESOLVED: &str = "Unable to resolve";

/// One entry in the append-only debate audit log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDebate {
    /// Round number (1-indexed)
    pub round: u32,
    pub agent_type: AgentType,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenged_by: Option<AgentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl AgentDebate {
    /// The two opening entries of a round: the challenger's position, then
    /// the challenged agent's position with the challenge attached.
    pub fn opening_positions(round: u32, disagreement: &Disagreement) -> [AgentDebate; 2] {
        let challenger = &disagreement.agent1;
        let challenged = &disagreement.agent2;

        [
            AgentDebate {
                round,
                agent_type: challenger.agent_type,
                position: format!(
                    "Score {}/10: {}",
                    challenger.score.score, challenger.score.reasoning
                ),
                challenged_by: None,
                challenge: None,
                response: None,
            },
            AgentDebate {
                round,
                agent_type: challenged.agent_type,
                position: format!(
                    "Score {}/10: {}",
                    challenged.score.score, challenged.score.reasoning
                ),
                challenged_by: Some(challenger.agent_type),
                challenge: Some(format!(
                    "Disagrees on {} by {} points",
                    disagreement.option_id, disagreement.difference
                )),
                response: None,
            },
        ]
    }

    /// The closing entry of a round, recorded by the chief of staff
    pub fn resolution(
        round: u32,
        disagreement: &Disagreement,
        resolution: &DebateResolution,
    ) -> AgentDebate {
        let challenged = disagreement.agent2.agent_type;
        let response = if resolution.applies() {
            format!(
                "Challenge valid. {}'s score adjusted to {}/10.",
                challenged, resolution.adjusted_score
            )
        } else if resolution.challenge_valid {
            "Challenge valid, but no adjusted score was given. Scores stand.".to_string()
        } else {
            "Challenge not sustained. Scores stand.".to_string()
        };

        AgentDebate {
            round,
            agent_type: AgentType::ChiefOfStaff,
            position: resolution.resolution.clone(),
            challenged_by: None,
            challenge: None,
            response: Some(response),
        }
    }

    /// Whether this entry carries a challenge
    pub fn is_challenge(&self) -> bool {
        self.challenged_by.is_some()
    }
}

/// Outcome of adjudicating one disagreement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateResolution {
    pub challenge_valid: bool,
    pub resolution: String,
    /// New score for the challenged agent; 0 means "no change"
    pub adjusted_score: u8,
}

impl DebateResolution {
    pub fn sustained(resolution: impl Into<String>, adjusted_score: u8) -> Self {
        Self {
            challenge_valid: true,
            resolution: resolution.into(),
            adjusted_score: adjusted_score.min(MAX_SCORE),
        }
    }

    pub fn rejected(resolution: impl Into<String>) -> Self {
        Self {
            challenge_valid: false,
            resolution: resolution.into(),
            adjusted_score: 0,
        }
    }

    /// Soft-fail outcome when the adjudicator errors or answers garbage
    pub fn unresolved() -> Self {
        Self::rejected(UNRESOLVED)
    }

    /// Whether the challenged score should be replaced
    ///
    /// Requires both a valid challenge and a non-zero score; a zero score
    /// is never applied even when the challenge is marked valid.
    pub fn applies(&self) -> bool {
        self.challenge_valid && self.adjusted_score > 0
    }

    /// Parse an adjudicator response.
    ///
    /// Anything that is not a JSON object yields [`DebateResolution::unresolved`].
    /// Missing fields default to not-valid / empty / 0. `adjustedScore` is
    /// rounded and clamped to 0-10.
    ///
    /// # Examples
    ///
    /// ```
    /// use council_domain::deliberation::DebateResolution;
    ///
    /// let r = DebateResolution::parse(
    ///     r#"{"challengeValid": true, "resolution": "Costs were double counted", "adjustedScore": 6}"#,
    /// );
    /// assert!(r.applies());
    /// assert_eq!(r.adjusted_score, 6);
    ///
    /// assert_eq!(DebateResolution::parse("no idea"), DebateResolution::unresolved());
    /// ```
    pub fn parse(response: &str) -> Self {
        let Some(json) = extract_json_object(response) else {
            return Self::unresolved();
        };
        let Ok(Value::Object(map)) = serde_json::from_str::<Value>(json) else {
            return Self::unresolved();
        };

        let challenge_valid = match map.get("challengeValid") {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        };

        let resolution = map
            .get("resolution")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        let adjusted_score = map
            .get("adjustedScore")
            .and_then(|v| v.as_f64())
            .map(|s| s.round().clamp(0.0, MAX_SCORE as f64) as u8)
            .unwrap_or(0);

        Self {
            challenge_valid,
            resolution,
            adjusted_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deliberation::disagreement::AgentPosition;
    use crate::evaluation::OptionScore;

    fn disagreement() -> Disagreement {
        Disagreement {
            option_id: "opt-A".to_string(),
            agent1: AgentPosition {
                agent_type: AgentType::Financial,
                score: OptionScore::new("opt-A", 2, "Negative ROI"),
            },
            agent2: AgentPosition {
                agent_type: AgentType::Market,
                score: OptionScore::new("opt-A", 9, "Huge TAM"),
            },
            difference: 7,
        }
    }

    #[test]
    fn test_opening_positions() {
        let [first, second] = AgentDebate::opening_positions(1, &disagreement());

        assert_eq!(first.agent_type, AgentType::Financial);
        assert_eq!(first.position, "Score 2/10: Negative ROI");
        assert!(!first.is_challenge());

        assert_eq!(second.agent_type, AgentType::Market);
        assert_eq!(second.position, "Score 9/10: Huge TAM");
        assert_eq!(second.challenged_by, Some(AgentType::Financial));
        assert_eq!(
            second.challenge.as_deref(),
            Some("Disagrees on opt-A by 7 points")
        );
    }

    #[test]
    fn test_resolution_entry_responses() {
        let d = disagreement();

        let sustained = AgentDebate::resolution(2, &d, &DebateResolution::sustained("ok", 6));
        assert_eq!(sustained.agent_type, AgentType::ChiefOfStaff);
        assert_eq!(sustained.round, 2);
        assert!(sustained.response.unwrap().starts_with("Challenge valid."));

        let rejected = AgentDebate::resolution(2, &d, &DebateResolution::rejected("no"));
        assert_eq!(
            rejected.response.as_deref(),
            Some("Challenge not sustained. Scores stand.")
        );

        let zero = DebateResolution {
            challenge_valid: true,
            resolution: "meh".into(),
            adjusted_score: 0,
        };
        assert!(!zero.applies());
        let entry = AgentDebate::resolution(2, &d, &zero);
        assert!(entry.response.unwrap().contains("Scores stand"));
    }

    #[test]
    fn test_parse_defaults_missing_fields() {
        let r = DebateResolution::parse("{}");
        assert!(!r.challenge_valid);
        assert_eq!(r.resolution, "");
        assert_eq!(r.adjusted_score, 0);
    }

    #[test]
    fn test_parse_invalid_json_is_unresolved() {
        let r = DebateResolution::parse("{challengeValid: yes}");
        assert_eq!(r, DebateResolution::unresolved());
        assert_eq!(r.resolution, UNRESOLVED);
    }

    #[test]
    fn test_parse_clamps_score() {
        let r = DebateResolution::parse(r#"{"challengeValid": "true", "adjustedScore": 12.4}"#);
        assert!(r.challenge_valid);
        assert_eq!(r.adjusted_score, 10);

        let r = DebateResolution::parse(r#"{"challengeValid": true, "adjustedScore": -3}"#);
        assert_eq!(r.adjusted_score, 0);
        assert!(!r.applies());
    }

    #[test]
    fn test_debate_serialization_skips_empty_fields() {
        let [first, _] = AgentDebate::opening_positions(1, &disagreement());
        let json = serde_json::to_value(&first).unwrap();
        assert_eq!(json["agentType"], "financial");
        assert!(json.get("challengedBy").is_none());
    }
}
