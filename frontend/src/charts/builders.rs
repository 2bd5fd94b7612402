//! One builder per visualization. Each takes the current data slice and
//! returns the full chart configuration, or `None` when the chart should be
//! cleared instead of drawn.

use std::collections::BTreeMap;

use serde_json::json;

use super::config::{ChartConfig, ChartKind, Dataset};
use super::palette;
use crate::aggregates::{self, BudgetUsage, CategoryTrend, Totals};
use crate::models::{Goal, MonthlyPoint};

pub const EXPENSE_CHART: &str = "expenseChart";
pub const TREND_CHART: &str = "trendChart";
pub const INCOME_EXPENSE_CHART: &str = "incomeExpenseChart";
pub const SAVINGS_GROWTH_CHART: &str = "savingsGrowthChart";
pub const CATEGORY_BAR_CHART: &str = "categoryBarChart";
pub const BUDGET_RADAR_CHART: &str = "budgetRadarChart";
pub const GOALS_CHART: &str = "goalsChart";
pub const INCOME_SOURCES_CHART: &str = "incomeSourcesChart";
pub const CATEGORY_TREND_CHART: &str = "categoryTrendChart";

fn split(pairs: &[(String, f64)]) -> (Vec<String>, Vec<f64>) {
    pairs.iter().cloned().unzip()
}

fn month_labels(points: &[MonthlyPoint]) -> Vec<String> {
    points.iter().map(|p| p.month.clone()).collect()
}

/// Dashboard doughnut of this period's spending per category.
pub fn expense_breakdown(breakdown: &BTreeMap<String, f64>) -> ChartConfig {
    let labels: Vec<String> = breakdown.keys().cloned().collect();
    let data: Vec<f64> = breakdown.values().copied().collect();
    let colors = palette::clipped(&palette::EXPENSE_BREAKDOWN, labels.len());
    ChartConfig::new(
        ChartKind::Doughnut,
        labels,
        vec![Dataset::new(data)
            .background(colors)
            .border(palette::SLICE_BORDER)
            .border_width(2)],
        json!({
            "responsive": true,
            "plugins": { "legend": { "position": "bottom" } }
        }),
    )
}

pub fn income_expense_trend(points: &[MonthlyPoint]) -> ChartConfig {
    let income = points.iter().map(|p| p.income).collect();
    let expenses = points.iter().map(|p| p.expenses).collect();
    ChartConfig::new(
        ChartKind::Line,
        month_labels(points),
        vec![
            Dataset::new(income)
                .label("Income")
                .border(palette::INCOME)
                .background(palette::INCOME_FILL)
                .area(0.3),
            Dataset::new(expenses)
                .label("Expenses")
                .border(palette::EXPENSE)
                .background(palette::EXPENSE_FILL)
                .area(0.3),
        ],
        json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": { "legend": { "position": "top" } },
            "scales": { "y": { "beginAtZero": true } }
        }),
    )
}

pub fn income_vs_expenses(points: &[MonthlyPoint]) -> ChartConfig {
    let totals = Totals::from_monthly(points);
    ChartConfig::new(
        ChartKind::Doughnut,
        vec!["Income".to_string(), "Expenses".to_string()],
        vec![Dataset::new(vec![totals.income, totals.expenses])
            .background(vec![palette::INCOME.to_string(), palette::EXPENSE.to_string()])
            .border(palette::SLICE_BORDER)
            .border_width(3)],
        json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": { "legend": { "position": "bottom" } }
        }),
    )
}

/// Monthly net as bars (colored by sign) with the running total as a line.
pub fn savings_growth(points: &[MonthlyPoint]) -> ChartConfig {
    let net = aggregates::monthly_net(points);
    let running = aggregates::cumulative(&net);
    let bar_colors = net
        .iter()
        .map(|n| {
            if *n >= 0.0 {
                palette::INCOME.to_string()
            } else {
                palette::EXPENSE.to_string()
            }
        })
        .collect::<Vec<_>>();
    ChartConfig::new(
        ChartKind::Bar,
        month_labels(points),
        vec![
            Dataset::new(net)
                .label("Monthly Savings")
                .background(bar_colors)
                .border_radius(6),
            Dataset::new(running)
                .label("Cumulative Savings")
                .kind(ChartKind::Line)
                .border(palette::CUMULATIVE)
                .background(palette::CUMULATIVE_FILL)
                .area(0.3),
        ],
        json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": { "legend": { "position": "top" } },
            "scales": { "y": { "beginAtZero": true } }
        }),
    )
}

/// Horizontal bars for the biggest expense categories; callers pass the
/// already truncated top-N list.
pub fn category_spending(top: &[(String, f64)]) -> ChartConfig {
    let (labels, data) = split(top);
    ChartConfig::new(
        ChartKind::Bar,
        labels,
        vec![Dataset::new(data)
            .label("Spending")
            .background(palette::clipped(&palette::CATEGORY_BARS, top.len()))
            .border_radius(6)],
        json!({
            "indexAxis": "y",
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": { "legend": { "display": false } }
        }),
    )
}

pub fn budget_radar(usage: &[BudgetUsage]) -> ChartConfig {
    let labels = usage.iter().map(|u| u.category.clone()).collect();
    let limits = usage.iter().map(|u| u.limit).collect();
    let spent = usage.iter().map(|u| u.spent).collect();
    ChartConfig::new(
        ChartKind::Radar,
        labels,
        vec![
            Dataset::new(limits)
                .label("Budget Limit")
                .border(palette::INCOME)
                .background(palette::INCOME_AREA)
                .border_width(2),
            Dataset::new(spent)
                .label("Current Spending")
                .border(palette::EXPENSE)
                .background(palette::EXPENSE_AREA)
                .border_width(2),
        ],
        json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": { "legend": { "position": "bottom" } }
        }),
    )
}

pub fn goal_progress(goals: &[Goal]) -> Option<ChartConfig> {
    if goals.is_empty() {
        return None;
    }
    let progress: Vec<f64> = goals.iter().map(Goal::progress_percent).collect();
    let colors = progress
        .iter()
        .map(|p| palette::goal_band(*p).to_string())
        .collect::<Vec<_>>();
    Some(ChartConfig::new(
        ChartKind::Bar,
        goals.iter().map(|g| g.name.clone()).collect(),
        vec![Dataset::new(progress)
            .label("Progress")
            .background(colors)
            .border_radius(6)],
        json!({
            "indexAxis": "y",
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": { "legend": { "display": false } },
            "scales": { "x": { "max": 100, "beginAtZero": true } }
        }),
    ))
}

pub fn income_sources(by_source: &[(String, f64)]) -> Option<ChartConfig> {
    if by_source.is_empty() {
        return None;
    }
    let (labels, data) = split(by_source);
    let colors = palette::clipped(&palette::INCOME_SOURCES, labels.len());
    Some(ChartConfig::new(
        ChartKind::Pie,
        labels,
        vec![Dataset::new(data)
            .background(colors)
            .border(palette::SLICE_BORDER)
            .border_width(2)],
        json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": { "legend": { "position": "bottom" } }
        }),
    ))
}

pub fn category_trend(trend: &CategoryTrend) -> ChartConfig {
    let datasets = trend
        .series
        .iter()
        .enumerate()
        .map(|(idx, (category, values))| {
            let color = palette::wrapped(&palette::CATEGORY_TREND, idx);
            Dataset::new(values.clone())
                .label(category)
                .background(palette::translucent(&color).as_str())
                .border(color.as_str())
                .area(0.3)
        })
        .collect();
    ChartConfig::new(
        ChartKind::Line,
        trend.months.clone(),
        datasets,
        json!({
            "responsive": true,
            "maintainAspectRatio": false,
            "plugins": { "legend": { "position": "top" } },
            "scales": { "y": { "beginAtZero": true } }
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::config::Colors;

    fn point(month: &str, income: f64, expenses: f64) -> MonthlyPoint {
        MonthlyPoint {
            month: month.to_string(),
            income,
            expenses,
        }
    }

    #[test]
    fn doughnut_colors_clip_to_palette() {
        let breakdown: BTreeMap<String, f64> =
            (0..7).map(|i| (format!("c{}", i), 10.0)).collect();
        let config = expense_breakdown(&breakdown);
        assert_eq!(config.data.labels.len(), 7);
        match &config.data.datasets[0].background_color {
            Some(Colors::Each(colors)) => assert_eq!(colors.len(), 5),
            other => panic!("unexpected colors {:?}", other),
        }
    }

    #[test]
    fn savings_growth_colors_by_sign_and_accumulates() {
        let points = vec![
            point("Jan", 300.0, 200.0),
            point("Feb", 100.0, 150.0),
            point("Mar", 400.0, 200.0),
        ];
        let config = savings_growth(&points);
        assert_eq!(config.data.datasets[0].data, vec![100.0, -50.0, 200.0]);
        assert_eq!(config.data.datasets[1].data, vec![100.0, 50.0, 250.0]);
        assert_eq!(config.data.datasets[1].kind, Some(ChartKind::Line));
        assert_eq!(
            config.data.datasets[0].background_color,
            Some(Colors::Each(vec![
                palette::INCOME.to_string(),
                palette::EXPENSE.to_string(),
                palette::INCOME.to_string(),
            ]))
        );
    }

    #[test]
    fn empty_goal_and_income_charts_are_cleared() {
        assert!(goal_progress(&[]).is_none());
        assert!(income_sources(&[]).is_none());
    }

    #[test]
    fn trend_colors_wrap_past_palette() {
        let trend = CategoryTrend {
            months: vec!["2024-01".to_string()],
            series: (0..7).map(|i| (format!("c{}", i), vec![1.0])).collect(),
        };
        let config = category_trend(&trend);
        assert_eq!(
            config.data.datasets[5].border_color,
            Some(Colors::One(palette::CATEGORY_TREND[0].to_string()))
        );
    }

    #[test]
    fn config_serializes_chart_js_keys() {
        let config = category_spending(&[("Rent".to_string(), 900.0)]);
        let value: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(value["type"], "bar");
        assert_eq!(value["options"]["indexAxis"], "y");
        assert_eq!(value["data"]["datasets"][0]["borderRadius"], 6);
        assert!(value["data"]["datasets"][0].get("tension").is_none());
    }
}
