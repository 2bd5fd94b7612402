use yew::prelude::*;

use super::widgets::ChartCard;
use crate::aggregates::AnalyticsStats;
use crate::charts::builders::{
    BUDGET_RADAR_CHART, CATEGORY_BAR_CHART, CATEGORY_TREND_CHART, GOALS_CHART,
    INCOME_EXPENSE_CHART, INCOME_SOURCES_CHART, SAVINGS_GROWTH_CHART, TREND_CHART,
};
use crate::format::{format_currency, format_percent};
use crate::view_model::Snapshot;

#[derive(Properties, PartialEq)]
pub struct AnalyticsPanelProps {
    pub snapshot: Snapshot,
}

fn stat_box(label: &'static str, value: String, tone: Option<&'static str>) -> Html {
    html! {
        <div class="stat-box">
            <div class="stat-label">{ label }</div>
            <div class={classes!("stat-value", tone)}>{ value }</div>
        </div>
    }
}

#[function_component(AnalyticsPanel)]
pub fn analytics_panel(props: &AnalyticsPanelProps) -> Html {
    let snapshot = &props.snapshot;
    let stats = AnalyticsStats::compute(
        &snapshot.monthly,
        &snapshot.transactions,
        &snapshot.budgets,
        &snapshot.goals,
    );
    let savings = stats.totals.savings();
    let savings_tone = if savings >= 0.0 { "positive" } else { "negative" };

    html! {
        <>
            <div id="analyticsStats" class="stats-grid">
                { stat_box("Total Income", format_currency(stats.totals.income), None) }
                { stat_box("Total Expenses", format_currency(stats.totals.expenses), None) }
                { stat_box("Total Savings", format_currency(savings), Some(savings_tone)) }
                { stat_box("Savings Rate", format_percent(stats.totals.savings_rate()), None) }
                { stat_box("Average Monthly Income", format_currency(stats.totals.average_monthly_income()), None) }
                { stat_box("Average Monthly Expenses", format_currency(stats.totals.average_monthly_expenses()), None) }
                { stat_box(
                    "Goal Completion",
                    format!("{} ({}/{})", format_percent(stats.goals.mean_progress), stats.goals.completed, stats.goals.total),
                    None,
                ) }
                { stat_box("Budget Categories", stats.budget_categories.to_string(), None) }
                { stat_box("Expense Categories", stats.expense_categories.to_string(), None) }
                { stat_box("Income Categories", stats.income_categories.to_string(), None) }
            </div>

            <div class="analytics-grid">
                <ChartCard title="Income & Expense Trend" canvas_id={TREND_CHART} />
                <ChartCard title="Income vs Expenses" canvas_id={INCOME_EXPENSE_CHART} />
                <ChartCard title="Savings Growth" canvas_id={SAVINGS_GROWTH_CHART} />
                <ChartCard title="Top Spending Categories" canvas_id={CATEGORY_BAR_CHART} />
                <ChartCard title="Budget vs Spending" canvas_id={BUDGET_RADAR_CHART} />
                <ChartCard title="Goal Progress" canvas_id={GOALS_CHART} />
                <ChartCard title="Income Sources" canvas_id={INCOME_SOURCES_CHART} />
                <ChartCard title="Category Trends" canvas_id={CATEGORY_TREND_CHART} />
            </div>
        </>
    }
}
