//! Agent type value object

use super::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identity of a council member (Value Object)
///
/// The deliberation engine only uses this for equality and labelling, but a
/// closed set keeps the council composition checked at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgentType {
    // Specialists (default council)
    Financial,
    Market,
    Risk,
    GameTheory,
    Resource,
    // Adjudicator / synthesizer
    ChiefOfStaff,
    // Legacy specialists
    Cfo,
    Growth,
}

impl AgentType {
    /// Get the string identifier for this agent
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentType::Financial => "financial",
            AgentType::Market => "market",
            AgentType::Risk => "risk",
            AgentType::GameTheory => "gametheory",
            AgentType::Resource => "resource",
            AgentType::ChiefOfStaff => "chief-of-staff",
            AgentType::Cfo => "cfo",
            AgentType::Growth => "growth",
        }
    }

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            AgentType::Financial => "Financial Analyst",
            AgentType::Market => "Market Analyst",
            AgentType::Risk => "Risk",
            AgentType::GameTheory => "Game Theory",
            AgentType::Resource => "Resource Allocation",
            AgentType::ChiefOfStaff => "Chief of Staff",
            AgentType::Cfo => "CFO",
            AgentType::Growth => "Growth",
        }
    }

    /// The five specialists that make up the default council
    pub fn default_council() -> Vec<AgentType> {
        vec![
            AgentType::Financial,
            AgentType::Market,
            AgentType::Risk,
            AgentType::GameTheory,
            AgentType::Resource,
        ]
    }

    /// Whether this agent scores options (as opposed to adjudicating)
    pub fn is_specialist(&self) -> bool {
        !matches!(self, AgentType::ChiefOfStaff)
    }
}

impl std::fmt::Display for AgentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AgentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "financial" => Ok(AgentType::Financial),
            "market" => Ok(AgentType::Market),
            "risk" => Ok(AgentType::Risk),
            "gametheory" | "game-theory" => Ok(AgentType::GameTheory),
            "resource" => Ok(AgentType::Resource),
            "chief-of-staff" => Ok(AgentType::ChiefOfStaff),
            "cfo" => Ok(AgentType::Cfo),
            "growth" => Ok(AgentType::Growth),
            other => Err(DomainError::UnknownAgentType(other.to_string())),
        }
    }
}

impl Serialize for AgentType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AgentType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_ids() {
        for agent in [
            AgentType::Financial,
            AgentType::Market,
            AgentType::Risk,
            AgentType::GameTheory,
            AgentType::Resource,
            AgentType::ChiefOfStaff,
            AgentType::Cfo,
            AgentType::Growth,
        ] {
            assert_eq!(agent.as_str().parse::<AgentType>().unwrap(), agent);
        }
    }

    #[test]
    fn test_unknown_agent_rejected() {
        let err = "ceo".parse::<AgentType>().unwrap_err();
        assert!(matches!(err, DomainError::UnknownAgentType(s) if s == "ceo"));
    }

    #[test]
    fn test_default_council_is_five_specialists() {
        let council = AgentType::default_council();
        assert_eq!(council.len(), 5);
        assert!(council.iter().all(|a| a.is_specialist()));
        assert!(!AgentType::ChiefOfStaff.is_specialist());
    }

    #[test]
    fn test_serde_uses_string_ids() {
        let json = serde_json::to_string(&AgentType::ChiefOfStaff).unwrap();
        assert_eq!(json, "\"chief-of-staff\"");
        let parsed: AgentType = serde_json::from_str("\"gametheory\"").unwrap();
        assert_eq!(parsed, AgentType::GameTheory);
    }
}
