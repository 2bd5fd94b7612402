//! Raw form input as typed by the user, and the checks that turn it into
//! request payloads. Nothing here touches the network.

use crate::error::ValidationError;
use crate::models::{
    GoalContribution, GoalPriority, LoginRequest, NewBudget, NewGoal, NewTransaction,
    RecurringFrequency, SignupRequest, TransactionKind,
};

pub const DEFAULT_ALERT_THRESHOLD: f64 = 80.0;

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(value.to_string())
}

/// Like `required`, but keeps the value byte for byte. Used for passwords.
fn non_empty(value: &str, field: &'static str) -> Result<String, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(value.to_string())
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn number(value: &str, field: &'static str) -> Result<f64, ValidationError> {
    let raw = required(value, field)?;
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(ValidationError::NotANumber(field)),
    }
}

fn positive(value: &str, field: &'static str) -> Result<f64, ValidationError> {
    let n = number(value, field)?;
    if n <= 0.0 {
        return Err(ValidationError::NotPositive(field));
    }
    Ok(n)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, ValidationError> {
        Ok(LoginRequest {
            username: required(&self.username, "Username")?,
            password: non_empty(&self.password, "Password")?,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<SignupRequest, ValidationError> {
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(SignupRequest {
            username: required(&self.username, "Username")?,
            email: required(&self.email, "Email")?,
            password: non_empty(&self.password, "Password")?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransactionForm {
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub description: String,
    pub date: String,
    pub is_recurring: bool,
    pub recurring_frequency: String,
}

impl TransactionForm {
    /// Empty form with the date preset, the way the page shows it after a reset.
    pub fn starting_on(date: &str) -> Self {
        TransactionForm {
            kind: TransactionKind::Expense.as_str().to_string(),
            category: String::new(),
            amount: String::new(),
            description: String::new(),
            date: date.to_string(),
            is_recurring: false,
            recurring_frequency: RecurringFrequency::Monthly.as_str().to_string(),
        }
    }

    pub fn validate(&self) -> Result<NewTransaction, ValidationError> {
        let kind = TransactionKind::parse(&self.kind).ok_or(ValidationError::Missing("Type"))?;
        let category = required(&self.category, "Category")?;
        let amount = positive(&self.amount, "Amount")?;
        let date = required(&self.date, "Date")?;
        let recurring_frequency = if self.is_recurring {
            RecurringFrequency::parse(&self.recurring_frequency)
        } else {
            None
        };
        Ok(NewTransaction {
            kind,
            category,
            amount,
            description: self.description.trim().to_string(),
            date,
            is_recurring: self.is_recurring,
            recurring_frequency,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BudgetForm {
    pub category: String,
    pub limit: String,
    pub alert_threshold: String,
}

impl BudgetForm {
    pub fn validate(&self) -> Result<NewBudget, ValidationError> {
        let category = required(&self.category, "Category")?;
        let limit = positive(&self.limit, "Limit")?;
        let alert_threshold = match optional(&self.alert_threshold) {
            None => DEFAULT_ALERT_THRESHOLD,
            Some(raw) => {
                let threshold = number(&raw, "Alert threshold")?;
                if !(0.0..=100.0).contains(&threshold) {
                    return Err(ValidationError::OutOfRange("Alert threshold"));
                }
                threshold
            }
        };
        Ok(NewBudget {
            category,
            limit,
            alert_threshold,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GoalForm {
    pub name: String,
    pub target: String,
    pub priority: String,
    pub deadline: String,
}

impl GoalForm {
    pub fn validate(&self) -> Result<NewGoal, ValidationError> {
        Ok(NewGoal {
            name: required(&self.name, "Name")?,
            target: positive(&self.target, "Target")?,
            priority: GoalPriority::parse(&self.priority).unwrap_or_default(),
            deadline: optional(&self.deadline),
        })
    }
}

/// A contribution must be a positive number before anything is sent.
pub fn parse_contribution(raw: &str) -> Result<GoalContribution, ValidationError> {
    Ok(GoalContribution {
        current_addition: positive(raw, "Amount")?,
    })
}
