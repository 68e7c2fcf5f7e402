//! Prompt templates for specialist agents

use crate::core::agent_type::AgentType;
use crate::decision::{BusinessArm, CompanyContext, CouncilInput, Decision, MarketData};

/// Founder capacity assumed when summarising time allocation
const FOUNDER_HOURS_PER_MONTH: f64 = 160.0;

const RESPONSE_FORMAT: &str = r#"IMPORTANT: You must respond in EXACTLY this JSON format with no other text:
{
  "optionScores": [
    { "optionId": "option-id-here", "score": 7, "reasoning": "Brief explanation" }
  ],
  "keyFactors": ["factor1", "factor2", "factor3"]
}"#;

/// Templates for generating specialist prompts
pub struct AgentPromptTemplate;

impl AgentPromptTemplate {
    /// System prompt describing the agent's perspective and answer format
    pub fn system(agent: AgentType) -> String {
        let (role, factors, scale, closing) = match agent {
            AgentType::Financial => (
                "the Financial Analyst Agent on a Strategy Council.\nYour role is to evaluate strategic decisions from a comprehensive FINANCIAL perspective.\n\nYou have access to detailed business arm data showing revenue, costs, and profitability.",
                "- ROI (Return on Investment) with expected value calculations\n- Cash flow impact across all business arms\n- Burn rate implications\n- Unit economics and margins\n- Payback period and break-even analysis\n- Opportunity cost analysis\n- Revenue projections",
                "- 1-3: Poor financial decision (negative expected value, long payback)\n- 4-6: Neutral/acceptable (break-even or modest positive)\n- 7-10: Strong financial case (high expected value, quick payback)",
                "Be specific and quantitative. Use the business arm data to ground your analysis.",
            ),
            AgentType::Market => (
                "the Market Analyst Agent on a Strategy Council.\nYour role is to evaluate strategic decisions from a MARKET perspective.\n\nYou have access to TAM/SAM/SOM data and competitive intelligence.",
                "- TAM / SAM / SOM opportunity and realism\n- Competitive positioning and response\n- Market timing (too early, right timing, too late)\n- Customer segment analysis\n- Market trends and their implications\n- Barriers to entry and network effects",
                "- 1-3: Poor market fit (wrong timing, strong competition, small market)\n- 4-6: Neutral (moderate opportunity, manageable competition)\n- 7-10: Strong market opportunity (right timing, weak competition, large market)",
                "Be specific about competitive dynamics and market trends.",
            ),
            AgentType::Risk => (
                "the Risk Agent on a Strategy Council.\nYour role is to evaluate strategic decisions from a RISK perspective.",
                "- Execution risk (can the team deliver?)\n- Market risk (will customers want this?)\n- Technical risk (is it feasible?)\n- Financial risk (what if it fails?)\n- Dependency and timing risk\n- Reversibility (can we undo this?)\n- Downside scenarios",
                "- 1-3: High risk, proceed with extreme caution\n- 4-6: Moderate risk, manageable with mitigation\n- 7-10: Low risk, well-understood territory",
                "IMPORTANT: A HIGH score means LOW risk (safe). Identify risks AND possible mitigations.",
            ),
            AgentType::GameTheory => (
                "the Game Theory Agent on a Strategy Council.\nYour role is to evaluate strategic decisions from a COMPETITIVE DYNAMICS perspective.",
                "- Nash equilibrium: what happens when all players optimize?\n- First-mover vs second-mover advantage\n- Network effects and switching costs\n- Barriers to entry and defensibility\n- Zero-sum vs positive-sum dynamics\n- Signaling to competitors\n- Optionality: does this preserve future choices?",
                "- 1-3: Poor strategic positioning\n- 4-6: Neutral competitive position\n- 7-10: Strong strategic advantage",
                "Think about competitive response and long-term positioning.",
            ),
            AgentType::Resource => (
                "the Resource Allocation Agent on a Strategy Council.\nYour role is to evaluate strategic decisions from a RESOURCE and CAPACITY perspective.\n\nYou have access to time investment data across business arms.",
                "- Founder time as the scarcest resource\n- Opportunity cost of founder hours\n- What can be delegated vs requires the founder\n- Bottlenecks and capacity constraints\n- Automation opportunities\n- Sustainable pace vs burnout risk",
                "- 1-3: Resource intensive (high founder time, no delegation possible)\n- 4-6: Manageable (moderate resources, some delegation possible)\n- 7-10: Resource efficient (low founder time, highly delegatable)",
                "Be specific about time constraints and bottlenecks.",
            ),
            AgentType::Cfo => (
                "the CFO Agent on a Strategy Council.\nYour role is to evaluate strategic decisions from a FINANCIAL perspective.",
                "- ROI\n- Cash flow impact\n- Burn rate implications\n- Unit economics\n- Payback period\n- Financial risk\n- Opportunity cost",
                "- 1-3: Poor financial decision\n- 4-6: Neutral/acceptable\n- 7-10: Strong financial case",
                "Be specific and quantitative where possible.",
            ),
            AgentType::Growth => (
                "the Growth Agent on a Strategy Council.\nYour role is to evaluate strategic decisions from a GROWTH perspective.",
                "- Total Addressable Market\n- Scalability potential\n- Market timing\n- Network effects and viral potential\n- Go-to-market fit\n- Growth velocity",
                "- 1-3: Limited growth potential\n- 4-6: Moderate growth opportunity\n- 7-10: High growth potential",
                "Focus on scale and market opportunity.",
            ),
            AgentType::ChiefOfStaff => (
                "the Chief of Staff on a Strategy Council.\nYour role is to score options from an overall strategic perspective.",
                "- Fit with the strategic goal\n- Balance of financial, market and execution concerns",
                "- 1-3: Weak overall case\n- 4-6: Mixed case\n- 7-10: Strong overall case",
                "Be balanced and concise.",
            ),
        };

        format!(
            "You are {role}\n\nConsider these factors:\n{factors}\n\n{RESPONSE_FORMAT}\n\nScore each option from 1-10 where:\n{scale}\n\n{closing}"
        )
    }

    /// User prompt with the context this agent needs
    pub fn evaluation_prompt(agent: AgentType, input: &CouncilInput) -> String {
        let mut prompt = company_section(&input.context);

        match agent {
            AgentType::Financial | AgentType::Cfo => {
                prompt.push_str(&financial_section(&input.business_arms));
            }
            AgentType::Resource => {
                prompt.push_str(&time_allocation_section(&input.business_arms));
            }
            AgentType::Market | AgentType::Growth => {
                prompt.push_str(&market_section(&input.market_data));
            }
            AgentType::GameTheory => {
                prompt.push_str(&bullet_section(
                    "ACTIVE PROJECTS (Current Moves)",
                    &input.context.active_projects,
                ));
            }
            AgentType::Risk | AgentType::ChiefOfStaff => {}
        }

        prompt.push_str(&bullet_section("KEY ASSETS", &input.context.key_assets));
        prompt.push_str(&bullet_section(
            "KEY CONSTRAINTS",
            &input.context.key_constraints,
        ));
        prompt.push_str(&options_section(&input.decision));
        prompt.push_str(&format!(
            "\nEvaluate each option from the {} perspective. Use the exact option ids above. Return your analysis as JSON.",
            agent.display_name()
        ));
        prompt
    }
}

/// Format an amount with thousands separators, e.g. `12,500`
pub(crate) fn money(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-€{}", grouped)
    } else {
        format!("€{}", grouped)
    }
}

pub(crate) fn company_section(context: &CompanyContext) -> String {
    format!(
        "COMPANY CONTEXT:\n- Company: {}\n- Monthly Revenue: {}\n- Monthly Burn: {}\n- Team Size: {}\n- Runway: {} months\n- Strategic Goal: {}\n\n",
        context.company_name,
        money(context.monthly_revenue),
        money(context.monthly_burn),
        context.team_size,
        context.runway_months,
        context.strategic_goal
    )
}

fn bullet_section(title: &str, items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = items.iter().map(|i| format!("- {}", i)).collect();
    format!("{}:\n{}\n\n", title, lines.join("\n"))
}

pub(crate) fn options_section(decision: &Decision) -> String {
    let options: Vec<String> = decision
        .options
        .iter()
        .map(|o| {
            format!(
                "Option ID: {}\nName: {}\nDescription: {}\nEstimated Cost: {}\nEstimated Time: {} weeks",
                o.id,
                o.name,
                o.description,
                money(o.estimated_cost),
                o.estimated_time_weeks
            )
        })
        .collect();

    format!(
        "DECISION TO EVALUATE:\nTitle: {}\nDescription: {}\n\nOPTIONS:\n{}\n",
        decision.title,
        decision.description,
        options.join("\n---\n")
    )
}

fn financial_section(arms: &[BusinessArm]) -> String {
    if arms.is_empty() {
        return String::new();
    }

    let lines: Vec<String> = arms
        .iter()
        .map(|arm| {
            format!(
                "- {}: Revenue {}/mo, Costs {}/mo, Profit {}/mo, Strategic Value: {}/10, Status: {:?}",
                arm.name,
                money(arm.monthly_revenue),
                money(arm.monthly_costs),
                money(arm.monthly_profit()),
                arm.strategic_value,
                arm.status
            )
        })
        .collect();

    let revenue: f64 = arms.iter().map(|a| a.monthly_revenue).sum();
    let costs: f64 = arms.iter().map(|a| a.monthly_costs).sum();
    let active = arms.iter().filter(|a| a.is_active()).count();

    format!(
        "BUSINESS ARMS FINANCIALS:\n{}\n\nSUMMARY:\n- Total Revenue: {}/month\n- Total Costs: {}/month\n- Net Profit: {}/month\n- Active Arms: {}\n\n",
        lines.join("\n"),
        money(revenue),
        money(costs),
        money(revenue - costs),
        active
    )
}

fn time_allocation_section(arms: &[BusinessArm]) -> String {
    if arms.is_empty() {
        return String::new();
    }

    let total_hours: f64 = arms.iter().map(|a| a.time_investment_hours).sum();
    let mut by_hours: Vec<&BusinessArm> = arms
        .iter()
        .filter(|a| a.time_investment_hours > 0.0)
        .collect();
    by_hours.sort_by(|a, b| b.time_investment_hours.total_cmp(&a.time_investment_hours));

    let lines: Vec<String> = by_hours
        .iter()
        .map(|arm| {
            let share = if total_hours > 0.0 {
                arm.time_investment_hours / total_hours * 100.0
            } else {
                0.0
            };
            format!(
                "- {}: {}h/month ({:.0}%), Strategic Value: {}/10, Status: {:?}",
                arm.name, arm.time_investment_hours, share, arm.strategic_value, arm.status
            )
        })
        .collect();

    // Active arms eating > 20h/month while scoring < 6 strategic value
    let inefficiencies: Vec<String> = arms
        .iter()
        .filter(|a| a.is_active() && a.time_investment_hours > 20.0 && a.strategic_value < 6)
        .map(|a| {
            format!(
                "- {} uses {}h but has only {}/10 strategic value",
                a.name, a.time_investment_hours, a.strategic_value
            )
        })
        .collect();

    let mut section = format!(
        "TIME ALLOCATION (Monthly):\n{}\n\nSUMMARY:\n- Total Hours Committed: {}h/month\n- Assumed Founder Capacity: ~{}h/month\n\n",
        lines.join("\n"),
        total_hours,
        FOUNDER_HOURS_PER_MONTH
    );
    if !inefficiencies.is_empty() {
        section.push_str(&format!(
            "POTENTIAL INEFFICIENCIES:\n{}\n\n",
            inefficiencies.join("\n")
        ));
    }
    section
}

fn market_section(market: &MarketData) -> String {
    if market.is_empty() {
        return String::new();
    }

    let competitors: Vec<String> = market
        .competitors
        .iter()
        .map(|c| {
            format!(
                "- {} ({:?} threat, {}% share): Strengths: {}. Weaknesses: {}",
                c.name,
                c.threat,
                c.market_share,
                c.strengths.join(", "),
                c.weaknesses.join(", ")
            )
        })
        .collect();

    let trends: Vec<String> = market.market_trends.iter().map(|t| format!("- {}", t)).collect();

    format!(
        "MARKET SIZE:\n- TAM: ${:.1}B\n- SAM: ${:.1}B\n- SOM: ${:.1}M\n\nCOMPETITORS:\n{}\n\nMARKET TRENDS:\n{}\n\n",
        market.tam / 1_000_000_000.0,
        market.sam / 1_000_000_000.0,
        market.som / 1_000_000.0,
        if competitors.is_empty() {
            "No competitors tracked".to_string()
        } else {
            competitors.join("\n")
        },
        if trends.is_empty() {
            "No trends tracked".to_string()
        } else {
            trends.join("\n")
        }
    )
}
