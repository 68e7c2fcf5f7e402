//! Decision entities

use serde::{Deserialize, Serialize};

/// One course of action the council can recommend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionOption {
    /// Stable identifier agents must echo back in their scores
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Estimated cost in the company's currency
    #[serde(default)]
    pub estimated_cost: f64,
    #[serde(default)]
    pub estimated_time_weeks: u32,
}

impl DecisionOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            estimated_cost: 0.0,
            estimated_time_weeks: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_estimates(mut self, cost: f64, weeks: u32) -> Self {
        self.estimated_cost = cost;
        self.estimated_time_weeks = weeks;
        self
    }
}

/// A strategic decision with multiple options (Entity)
///
/// # Example
///
/// ```
/// use council_domain::decision::{Decision, DecisionOption};
///
/// let decision = Decision::new("d-1", "Where to invest Q3 budget")
///     .with_option(DecisionOption::new("opt-a", "Expand sales team"))
///     .with_option(DecisionOption::new("opt-b", "Build self-serve onboarding"));
///
/// assert_eq!(decision.option_ids(), vec!["opt-a", "opt-b"]);
/// assert_eq!(decision.option("opt-b").unwrap().name, "Build self-serve onboarding");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub options: Vec<DecisionOption>,
}

impl Decision {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            options: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_option(mut self, option: DecisionOption) -> Self {
        self.options.push(option);
        self
    }

    /// Option identifiers in declaration order
    pub fn option_ids(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.id.as_str()).collect()
    }

    /// Look up an option by id
    pub fn option(&self, id: &str) -> Option<&DecisionOption> {
        self.options.iter().find(|o| o.id == id)
    }

    /// Display name for an option id, falling back to the id itself
    pub fn option_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.option(id).map(|o| o.name.as_str()).unwrap_or(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_name_falls_back_to_id() {
        let decision = Decision::new("d", "t").with_option(DecisionOption::new("a", "Alpha"));
        assert_eq!(decision.option_name("a"), "Alpha");
        assert_eq!(decision.option_name("zzz"), "zzz");
    }

    #[test]
    fn test_deserialize_camel_case_with_defaults() {
        let json = r#"{
            "id": "d-7",
            "title": "Pricing",
            "options": [
                {"id": "o1", "name": "Raise", "estimatedCost": 1200.5, "estimatedTimeWeeks": 3},
                {"id": "o2", "name": "Hold"}
            ]
        }"#;
        let decision: Decision = serde_json::from_str(json).unwrap();
        assert_eq!(decision.options.len(), 2);
        assert_eq!(decision.options[0].estimated_time_weeks, 3);
        assert_eq!(decision.options[1].estimated_cost, 0.0);
        assert!(decision.description.is_empty());
    }
}
