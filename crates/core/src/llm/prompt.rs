use crate::llm::ReportInput;

const SECTIONS: &str = "\
Executive Summary
• Provide a concise overview of key findings and tariff impact (150 words)
• Include 3 most significant market movements with precise percentages
• Highlight critical correlation between tariff news and market reaction

Market Performance Analysis
• Analyze major indices performance with specific percentage changes
• Compare sector performance (identify top 3 performers and bottom 3 underperformers)
• Include volatility metrics and trading volume analysis where relevant
• Identify specific price movements correlated with tariff announcements

Tariff Policy Evaluation
• Analyze specific tariff measures mentioned in the news
• Evaluate potential economic impact using concrete metrics (GDP effect, inflation implications)
• Compare with historical tariff impacts using relevant precedents

Supply Chain Disruption Assessment
• Identify key industries facing supply chain challenges
• Quantify impact on input costs and pricing power (use percentages)
• Highlight companies/sectors with geographic exposure concerns

Consumer Impact Analysis
• Project effects on consumer prices with specific percentage estimates
• Analyze potential shifts in consumer spending patterns
• Identify categories of goods most affected

Investor Strategy Recommendations
• Provide tactical asset allocation suggestions with specific weighting changes
• Identify 3-5 defensive positioning strategies with clear rationales
• Suggest specific sectors for overweight/underweight positions

International Trade Implications
• Analyze impact on major trading partners (focus on largest 3-4 relationships)
• Evaluate currency implications with specific exchange rate projections
• Assess potential retaliatory measures and their market impact

Future Outlook & Timeline
• Project key milestones for tariff implementation
• Identify critical indicators to monitor over next 30/60/90 days
• Provide probability assessment of various scenarios

Interesting Take
• Give your take on how some \"winners\" are actually losing long-term market share, while certain \"losers\" are developing resilient trade alternatives that could position them better for the future.";

const FORMAT_REQUIREMENTS: &str = "\
FORMAT REQUIREMENTS:
• Use professional, concise language suitable for sophisticated investors
• Include specific data points, percentages, and numbers (e.g., -10.5%, not -10.5 percent)
• Bold key insights and important figures
• Use a level-2 markdown heading (##) for each section title
• Create one brief bullet-point conclusion at the end of each section
• Ensure analytical depth while maintaining readability";

pub const REPORT_SECTIONS: [&str; 9] = [
    "Executive Summary",
    "Market Performance Analysis",
    "Tariff Policy Evaluation",
    "Supply Chain Disruption Assessment",
    "Consumer Impact Analysis",
    "Investor Strategy Recommendations",
    "International Trade Implications",
    "Future Outlook & Timeline",
    "Interesting Take",
];

pub fn build_prompt(input: &ReportInput) -> String {
    format!(
        "Analyze this financial market data and current trade news to generate a comprehensive, \
data-driven report on tariff impacts:\n\n\
MARKET DATA ({period}):\n{market}\n\n\
RECENT TRADE NEWS:\n{news}\n\n\
Create a polished, professional report with the following EXACT sections:\n\n\
{SECTIONS}\n\n\
{FORMAT_REQUIREMENTS}\n",
        period = input.period.compact_label(),
        market = input.market_data,
        news = input.news_headlines,
    )
}
