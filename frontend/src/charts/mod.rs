//! Chart configuration and the registry that owns live chart instances.

pub mod builders;
pub mod canvas;
pub mod config;
pub mod palette;
pub mod registry;

pub use canvas::CanvasSurface;
pub use config::{ChartConfig, ChartKind, Colors, Dataset};
pub use registry::{ChartRegistry, ChartSurface};

use crate::aggregates::{self, CATEGORY_TREND_TOP_N, EXPENSE_BAR_TOP_N};
use crate::error::ChartError;
use crate::view_model::Snapshot;

/// Rebuilds every chart from `snapshot`. Budget usage is measured against
/// `month` (`YYYY-MM`). One chart failing does not stop the others.
pub fn redraw_all<S: ChartSurface>(
    registry: &mut ChartRegistry<S>,
    snapshot: &Snapshot,
    month: &str,
) -> Vec<ChartError> {
    let usage = aggregates::budget_usage(&snapshot.budgets, &snapshot.transactions, month);
    let top = aggregates::top_expense_categories(&snapshot.transactions, EXPENSE_BAR_TOP_N);
    let income = aggregates::income_by_category(&snapshot.transactions);
    let trend = aggregates::category_month_trend(&snapshot.transactions, CATEGORY_TREND_TOP_N);

    let charts = [
        (
            builders::EXPENSE_CHART,
            Some(builders::expense_breakdown(&snapshot.summary.expense_breakdown)),
        ),
        (
            builders::TREND_CHART,
            Some(builders::income_expense_trend(&snapshot.monthly)),
        ),
        (
            builders::INCOME_EXPENSE_CHART,
            Some(builders::income_vs_expenses(&snapshot.monthly)),
        ),
        (
            builders::SAVINGS_GROWTH_CHART,
            Some(builders::savings_growth(&snapshot.monthly)),
        ),
        (
            builders::CATEGORY_BAR_CHART,
            Some(builders::category_spending(&top)),
        ),
        (
            builders::BUDGET_RADAR_CHART,
            Some(builders::budget_radar(&usage)),
        ),
        (builders::GOALS_CHART, builders::goal_progress(&snapshot.goals)),
        (
            builders::INCOME_SOURCES_CHART,
            builders::income_sources(&income),
        ),
        (
            builders::CATEGORY_TREND_CHART,
            Some(builders::category_trend(&trend)),
        ),
    ];

    let mut errors = Vec::new();
    for (container_id, config) in charts.iter() {
        if let Err(err) = registry.sync(container_id, config.as_ref()) {
            log::warn!("chart {} not drawn: {}", container_id, err);
            errors.push(err);
        }
    }
    errors
}
