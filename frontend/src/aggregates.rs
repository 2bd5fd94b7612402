//! Values derived on the client by reducing the fetched collections.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::models::{Budget, Goal, MonthlyPoint, Transaction, TransactionKind};

/// Monthly averages divide by the length of the server's analytics window.
pub const MONTHS_IN_WINDOW: f64 = 12.0;
pub const EXPENSE_BAR_TOP_N: usize = 8;
pub const CATEGORY_TREND_TOP_N: usize = 5;

/// Per-category totals for one kind of transaction, largest first.
/// Ties keep alphabetical order so the output is stable between reloads.
pub fn category_totals(transactions: &[Transaction], kind: TransactionKind) -> Vec<(String, f64)> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for tx in transactions.iter().filter(|tx| tx.kind == kind) {
        *totals.entry(tx.category.as_str()).or_insert(0.0) += tx.amount;
    }
    let mut sorted: Vec<(String, f64)> = totals
        .into_iter()
        .map(|(category, total)| (category.to_string(), total))
        .collect();
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1));
    sorted
}

pub fn top_expense_categories(transactions: &[Transaction], n: usize) -> Vec<(String, f64)> {
    let mut totals = category_totals(transactions, TransactionKind::Expense);
    totals.truncate(n);
    totals
}

pub fn income_by_category(transactions: &[Transaction]) -> Vec<(String, f64)> {
    category_totals(transactions, TransactionKind::Income)
}

/// Expense totals per month for the biggest categories.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryTrend {
    /// `YYYY-MM` keys, ascending.
    pub months: Vec<String>,
    /// One series per category, aligned with `months`.
    pub series: Vec<(String, Vec<f64>)>,
}

pub fn category_month_trend(transactions: &[Transaction], top_n: usize) -> CategoryTrend {
    let months: Vec<String> = transactions
        .iter()
        .filter_map(|tx| tx.month_key())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut by_category: HashMap<&str, HashMap<&str, f64>> = HashMap::new();
    for tx in transactions.iter().filter(|tx| tx.is_expense()) {
        if let Some(month) = tx.month_key() {
            *by_category
                .entry(tx.category.as_str())
                .or_default()
                .entry(month)
                .or_insert(0.0) += tx.amount;
        }
    }

    let series = top_expense_categories(transactions, top_n)
        .into_iter()
        .map(|(category, _)| {
            let per_month = by_category.get(category.as_str());
            let values = months
                .iter()
                .map(|m| {
                    per_month
                        .and_then(|pm| pm.get(m.as_str()))
                        .copied()
                        .unwrap_or(0.0)
                })
                .collect();
            (category, values)
        })
        .collect();

    CategoryTrend { months, series }
}

pub fn monthly_net(points: &[MonthlyPoint]) -> Vec<f64> {
    points.iter().map(MonthlyPoint::net).collect()
}

/// Running sum of a series.
pub fn cumulative(series: &[f64]) -> Vec<f64> {
    series
        .iter()
        .scan(0.0, |total, value| {
            *total += value;
            Some(*total)
        })
        .collect()
}

/// `(income - expenses) / income` as a percentage; zero when there is no income.
pub fn savings_rate(income: f64, expenses: f64) -> f64 {
    if income > 0.0 {
        (income - expenses) * 100.0 / income
    } else {
        0.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
}

impl Totals {
    pub fn from_monthly(points: &[MonthlyPoint]) -> Self {
        points.iter().fold(Totals::default(), |acc, p| Totals {
            income: acc.income + p.income,
            expenses: acc.expenses + p.expenses,
        })
    }

    pub fn savings(&self) -> f64 {
        self.income - self.expenses
    }

    pub fn savings_rate(&self) -> f64 {
        savings_rate(self.income, self.expenses)
    }

    pub fn average_monthly_income(&self) -> f64 {
        self.income / MONTHS_IN_WINDOW
    }

    pub fn average_monthly_expenses(&self) -> f64 {
        self.expenses / MONTHS_IN_WINDOW
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GoalCompletion {
    pub mean_progress: f64,
    pub completed: usize,
    pub total: usize,
}

pub fn goal_completion(goals: &[Goal]) -> GoalCompletion {
    if goals.is_empty() {
        return GoalCompletion::default();
    }
    let sum: f64 = goals.iter().map(Goal::progress_percent).sum();
    GoalCompletion {
        mean_progress: sum / goals.len() as f64,
        completed: goals.iter().filter(|g| g.is_complete()).count(),
        total: goals.len(),
    }
}

pub fn distinct_categories(transactions: &[Transaction], kind: TransactionKind) -> usize {
    transactions
        .iter()
        .filter(|tx| tx.kind == kind)
        .map(|tx| tx.category.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

/// Expense totals per category for one `YYYY-MM` month.
pub fn spent_in_month<'a>(transactions: &'a [Transaction], month: &str) -> HashMap<&'a str, f64> {
    let mut spent = HashMap::new();
    for tx in transactions
        .iter()
        .filter(|tx| tx.is_expense() && tx.month_key() == Some(month))
    {
        *spent.entry(tx.category.as_str()).or_insert(0.0) += tx.amount;
    }
    spent
}

#[derive(Clone, Debug, PartialEq)]
pub struct BudgetUsage {
    pub budget_id: i64,
    pub category: String,
    pub limit: f64,
    pub spent: f64,
    pub percentage: f64,
}

impl BudgetUsage {
    pub fn is_over(&self) -> bool {
        self.percentage > 100.0
    }

    /// Width of the progress bar, capped at a full bar.
    pub fn bar_width(&self) -> f64 {
        self.percentage.clamp(0.0, 100.0)
    }

    pub fn status_label(&self) -> String {
        if self.is_over() {
            "Over budget!".to_string()
        } else {
            format!("{}% used", self.percentage.round())
        }
    }
}

/// Spend against each budget, counting only expenses dated in `month`.
pub fn budget_usage(budgets: &[Budget], transactions: &[Transaction], month: &str) -> Vec<BudgetUsage> {
    let spent = spent_in_month(transactions, month);
    budgets
        .iter()
        .map(|b| {
            let spent = spent.get(b.category.as_str()).copied().unwrap_or(0.0);
            let percentage = if b.limit > 0.0 { spent / b.limit * 100.0 } else { 0.0 };
            BudgetUsage {
                budget_id: b.id,
                category: b.category.clone(),
                limit: b.limit,
                spent,
                percentage,
            }
        })
        .collect()
}

/// Everything shown in the analytics stats grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalyticsStats {
    pub totals: Totals,
    pub goals: GoalCompletion,
    pub budget_categories: usize,
    pub expense_categories: usize,
    pub income_categories: usize,
}

impl AnalyticsStats {
    pub fn compute(
        monthly: &[MonthlyPoint],
        transactions: &[Transaction],
        budgets: &[Budget],
        goals: &[Goal],
    ) -> Self {
        AnalyticsStats {
            totals: Totals::from_monthly(monthly),
            goals: goal_completion(goals),
            budget_categories: budgets.len(),
            expense_categories: distinct_categories(transactions, TransactionKind::Expense),
            income_categories: distinct_categories(transactions, TransactionKind::Income),
        }
    }
}
