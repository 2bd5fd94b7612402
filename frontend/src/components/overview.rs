use yew::prelude::*;

use super::icons::{icon_arrow_up_right, icon_credit_card, icon_percent, icon_wallet};
use super::widgets::{empty_state, goal_caption, ChartCard, ProgressBar, StatCard};
use crate::charts::builders::EXPENSE_CHART;
use crate::format::format_currency;
use crate::models::{BudgetAlert, DashboardSummary, Goal};

#[derive(Properties, PartialEq)]
pub struct OverviewPanelProps {
    pub summary: DashboardSummary,
}

fn alert_row(alert: &BudgetAlert) -> Html {
    html! {
        <div class={classes!("alert", alert.status.as_str())}>
            <strong>{ alert.category.clone() }</strong>
            { format!(
                ": {} / {} ({:.1}%)",
                format_currency(alert.spent),
                format_currency(alert.limit),
                alert.percentage
            ) }
        </div>
    }
}

fn goal_preview(goal: &Goal) -> Html {
    let progress = goal.progress_percent();
    html! {
        <div class="goal-item">
            <div class="item-info">
                <div class="item-title">{ goal.name.clone() }</div>
                <ProgressBar
                    percent={progress}
                    caption={goal_caption(progress, goal.current, goal.target)} />
            </div>
        </div>
    }
}

#[function_component(OverviewPanel)]
pub fn overview_panel(props: &OverviewPanelProps) -> Html {
    let summary = &props.summary;
    let savings_rate = summary.savings_rate.unwrap_or(0.0);

    html! {
        <>
            <div class="summary-cards">
                <StatCard title="Total Income" value={format_currency(summary.total_income)} icon={icon_arrow_up_right()} />
                <StatCard title="Total Expenses" value={format_currency(summary.total_expenses)} icon={icon_credit_card()} />
                <StatCard title="Balance" value={format_currency(summary.balance)} icon={icon_wallet()} negative={summary.balance < 0.0} />
                <StatCard title="Savings Rate" value={format!("{}%", savings_rate)} icon={icon_percent()} />
            </div>

            if !summary.budget_alerts.is_empty() {
                <div id="budgetAlertsContainer" class="card">
                    <h3>{"Budget Alerts"}</h3>
                    <div id="budgetAlerts">
                        { for summary.budget_alerts.iter().map(alert_row) }
                    </div>
                </div>
            }

            <div class="dashboard-grid">
                <ChartCard title="Expense Breakdown" canvas_id={EXPENSE_CHART} />
                <div class="card">
                    <h3>{"Savings Goals"}</h3>
                    <div id="goalsPreview">
                        if summary.savings_goals.is_empty() {
                            { empty_state("No goals yet.") }
                        } else {
                            { for summary.savings_goals.iter().map(goal_preview) }
                        }
                    </div>
                </div>
            </div>
        </>
    }
}
