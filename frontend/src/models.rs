use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurringFrequency {
    pub const ALL: [RecurringFrequency; 4] = [
        RecurringFrequency::Daily,
        RecurringFrequency::Weekly,
        RecurringFrequency::Monthly,
        RecurringFrequency::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecurringFrequency::Daily => "daily",
            RecurringFrequency::Weekly => "weekly",
            RecurringFrequency::Monthly => "monthly",
            RecurringFrequency::Yearly => "yearly",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value.trim())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl GoalPriority {
    pub const ALL: [GoalPriority; 3] = [GoalPriority::Low, GoalPriority::Medium, GoalPriority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalPriority::Low => "low",
            GoalPriority::Medium => "medium",
            GoalPriority::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value.trim())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub date: String,
    #[serde(default)]
    pub is_recurring: Option<bool>,
    #[serde(default)]
    pub recurring_frequency: Option<RecurringFrequency>,
}

impl Transaction {
    /// `YYYY-MM` prefix of the date, if the date is long enough to have one.
    pub fn month_key(&self) -> Option<&str> {
        self.date.get(..7)
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Budget {
    pub id: i64,
    pub category: String,
    pub limit: f64,
    #[serde(default)]
    pub alert_threshold: Option<f64>,
    #[serde(default)]
    pub month: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub target: f64,
    #[serde(default)]
    pub current: f64,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
}

impl Goal {
    /// Server-provided progress, or `current / target` as a one-decimal percentage.
    pub fn progress_percent(&self) -> f64 {
        if let Some(progress) = self.progress {
            return progress;
        }
        if self.target > 0.0 {
            (self.current / self.target * 1000.0).round() / 10.0
        } else {
            0.0
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress_percent() >= 100.0
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct MonthlyPoint {
    pub month: String,
    #[serde(default)]
    pub income: f64,
    #[serde(default)]
    pub expenses: f64,
}

impl MonthlyPoint {
    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Warning,
    Over,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Warning => "warning",
            AlertStatus::Over => "over",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct BudgetAlert {
    pub category: String,
    pub spent: f64,
    pub limit: f64,
    pub percentage: f64,
    pub status: AlertStatus,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct DashboardSummary {
    #[serde(default, alias = "totalIncome")]
    pub total_income: f64,
    #[serde(default, alias = "totalExpenses")]
    pub total_expenses: f64,
    #[serde(default)]
    pub balance: f64,
    #[serde(default, alias = "savingsRate")]
    pub savings_rate: Option<f64>,
    #[serde(default, alias = "expenseBreakdown")]
    pub expense_breakdown: BTreeMap<String, f64>,
    #[serde(default, alias = "savingsGoals")]
    pub savings_goals: Vec<Goal>,
    #[serde(default, alias = "budgetAlerts")]
    pub budget_alerts: Vec<BudgetAlert>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of every auth endpoint and of most error responses.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub amount: f64,
    pub description: String,
    pub date: String,
    pub is_recurring: bool,
    pub recurring_frequency: Option<RecurringFrequency>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewBudget {
    pub category: String,
    pub limit: f64,
    pub alert_threshold: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewGoal {
    pub name: String,
    pub target: f64,
    pub priority: GoalPriority,
    pub deadline: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GoalContribution {
    pub current_addition: f64,
}
