//! Dashboard state and the refresh contract behind it.
//!
//! Every successful mutation is followed by a full, parallel re-fetch of the
//! five dashboard sources. Nothing is patched locally; the snapshot is
//! replaced wholesale or left as it was.

use std::cell::Cell;
use std::rc::Rc;

use yew::Reducible;

use crate::api::DataFetcher;
use crate::error::{ActionError, ApiError, ValidationError};
use crate::forms::{self, BudgetForm, GoalForm, TransactionForm};
use crate::models::{
    Budget, DashboardSummary, Goal, GoalContribution, MonthlyPoint, NewBudget, NewGoal,
    NewTransaction, Transaction,
};
use crate::notify::{Notice, NoticeLevel, PendingDelete};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Dashboard,
    Transactions,
    Budgets,
    Goals,
    Analytics,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Dashboard,
        Tab::Transactions,
        Tab::Budgets,
        Tab::Goals,
        Tab::Analytics,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Tab::Dashboard => "dashboard",
            Tab::Transactions => "transactions",
            Tab::Budgets => "budgets",
            Tab::Goals => "goals",
            Tab::Analytics => "analytics",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Transactions => "Transactions",
            Tab::Budgets => "Budgets",
            Tab::Goals => "Goals",
            Tab::Analytics => "Analytics",
        }
    }
}

/// Everything the dashboard renders, as returned by one reload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub summary: DashboardSummary,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub goals: Vec<Goal>,
    pub monthly: Vec<MonthlyPoint>,
}

/// Hands out increasing numbers so late reload results can be recognised.
#[derive(Debug, Default)]
pub struct ReloadTickets {
    last: Cell<u64>,
}

impl ReloadTickets {
    pub fn issue(&self) -> u64 {
        let next = self.last.get() + 1;
        self.last.set(next);
        next
    }
}

/// Blocks a second submit while the first is still on the wire.
///
/// Checked and set synchronously, so two clicks in the same frame cannot
/// both get through.
#[derive(Debug, Default)]
pub struct InFlight {
    busy: Cell<bool>,
}

impl InFlight {
    /// `true` if the caller may send; the guard stays taken until `end`.
    pub fn try_begin(&self) -> bool {
        !self.busy.replace(true)
    }

    pub fn end(&self) {
        self.busy.set(false);
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Loaded {
    pub ticket: u64,
    pub snapshot: Snapshot,
}

/// Fetches all five sources concurrently. Any failure fails the whole reload.
pub async fn load_snapshot<F: DataFetcher + ?Sized>(api: &F) -> Result<Snapshot, ApiError> {
    let (summary, transactions, budgets, goals, monthly) = futures::try_join!(
        api.dashboard(),
        api.transactions(),
        api.budgets(),
        api.goals(),
        api.monthly_analytics()
    )?;
    Ok(Snapshot {
        summary,
        transactions,
        budgets,
        goals,
        monthly,
    })
}

pub async fn reload<F: DataFetcher + ?Sized>(
    api: &F,
    tickets: &ReloadTickets,
) -> Result<Loaded, ApiError> {
    let ticket = tickets.issue();
    let snapshot = load_snapshot(api).await?;
    Ok(Loaded { ticket, snapshot })
}

/// A single create/update/delete request.
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    AddTransaction(NewTransaction),
    AddBudget(NewBudget),
    AddGoal(NewGoal),
    Contribute {
        goal_id: i64,
        contribution: GoalContribution,
    },
    Delete(PendingDelete),
}

impl Mutation {
    pub fn add_transaction(form: &TransactionForm) -> Result<Self, ValidationError> {
        form.validate().map(Mutation::AddTransaction)
    }

    pub fn add_budget(form: &BudgetForm) -> Result<Self, ValidationError> {
        form.validate().map(Mutation::AddBudget)
    }

    pub fn add_goal(form: &GoalForm) -> Result<Self, ValidationError> {
        form.validate().map(Mutation::AddGoal)
    }

    /// Adds `raw_amount` to the goal's current amount.
    pub fn contribute(goal_id: i64, raw_amount: &str) -> Result<Self, ValidationError> {
        forms::parse_contribution(raw_amount).map(|contribution| Mutation::Contribute {
            goal_id,
            contribution,
        })
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Mutation::AddTransaction(_) => "Transaction added.",
            Mutation::AddBudget(_) => "Budget added.",
            Mutation::AddGoal(_) => "Goal added.",
            Mutation::Contribute { .. } => "Contribution added.",
            Mutation::Delete(pending) => pending.success_message(),
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Mutation::AddTransaction(_) => "Error adding transaction",
            Mutation::AddBudget(_) => "Error adding budget",
            Mutation::AddGoal(_) => "Error adding goal",
            Mutation::Contribute { .. } => "Error updating goal",
            Mutation::Delete(pending) => pending.failure_message(),
        }
    }

    async fn send<F: DataFetcher + ?Sized>(&self, api: &F) -> Result<(), ApiError> {
        match self {
            Mutation::AddTransaction(tx) => api.create_transaction(tx).await,
            Mutation::AddBudget(budget) => api.create_budget(budget).await,
            Mutation::AddGoal(goal) => api.create_goal(goal).await,
            Mutation::Contribute {
                goal_id,
                contribution,
            } => api.contribute_to_goal(*goal_id, contribution).await,
            Mutation::Delete(PendingDelete::Transaction(id)) => api.delete_transaction(*id).await,
            Mutation::Delete(PendingDelete::Budget(id)) => api.delete_budget(*id).await,
            Mutation::Delete(PendingDelete::Goal(id)) => api.delete_goal(*id).await,
        }
    }
}

/// Sends the mutation, then reloads everything.
///
/// `Ok(None)` means the server accepted the change but the follow-up reload
/// failed; the page keeps its previous snapshot in that case.
pub async fn commit<F: DataFetcher + ?Sized>(
    api: &F,
    tickets: &ReloadTickets,
    mutation: &Mutation,
) -> Result<Option<Loaded>, ApiError> {
    mutation.send(api).await?;
    log::info!("{}", mutation.success_message());
    match reload(api, tickets).await {
        Ok(loaded) => Ok(Some(loaded)),
        Err(err) => {
            log::warn!("reload after mutation failed: {}", err);
            Ok(None)
        }
    }
}

/// Validates, sends and reloads. A mutation that failed validation is
/// reported without touching the network.
pub async fn apply<F: DataFetcher + ?Sized>(
    api: &F,
    tickets: &ReloadTickets,
    mutation: Result<Mutation, ValidationError>,
) -> Result<Option<Loaded>, ActionError> {
    let mutation = mutation?;
    Ok(commit(api, tickets, &mutation).await?)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardState {
    pub tab: Tab,
    pub snapshot: Snapshot,
    pub loaded: bool,
    applied_ticket: u64,
    pub notice: Option<Notice>,
    next_notice_id: u64,
    pub pending_delete: Option<PendingDelete>,
}

pub enum DashboardAction {
    SelectTab(Tab),
    Loaded(Loaded),
    Notify(NoticeLevel, String),
    DismissNotice(u64),
    RequestDelete(PendingDelete),
    CancelDelete,
}

impl Reducible for DashboardState {
    type Action = DashboardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            DashboardAction::SelectTab(tab) => {
                if tab == self.tab {
                    return self;
                }
                next.tab = tab;
            }
            DashboardAction::Loaded(loaded) => {
                if loaded.ticket <= self.applied_ticket {
                    log::debug!(
                        "dropping reload #{} (already showing #{})",
                        loaded.ticket,
                        self.applied_ticket
                    );
                    return self;
                }
                next.applied_ticket = loaded.ticket;
                next.snapshot = loaded.snapshot;
                next.loaded = true;
            }
            DashboardAction::Notify(level, message) => {
                next.next_notice_id += 1;
                next.notice = Some(Notice {
                    id: next.next_notice_id,
                    level,
                    message,
                });
            }
            DashboardAction::DismissNotice(id) => {
                if self.notice.as_ref().map(|n| n.id) != Some(id) {
                    return self;
                }
                next.notice = None;
            }
            DashboardAction::RequestDelete(pending) => next.pending_delete = Some(pending),
            DashboardAction::CancelDelete => next.pending_delete = None,
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(ticket: u64, balance: f64) -> Loaded {
        let mut snapshot = Snapshot::default();
        snapshot.summary.balance = balance;
        Loaded { ticket, snapshot }
    }

    #[test]
    fn starts_on_dashboard_tab() {
        let state = DashboardState::default();
        assert_eq!(state.tab, Tab::Dashboard);
        assert!(!state.loaded);
    }

    #[test]
    fn exactly_one_tab_is_selected() {
        let state = Rc::new(DashboardState::default());
        let state = state.reduce(DashboardAction::SelectTab(Tab::Goals));
        assert_eq!(state.tab, Tab::Goals);
        let state = state.reduce(DashboardAction::SelectTab(Tab::Analytics));
        assert_eq!(state.tab, Tab::Analytics);
        assert_eq!(Tab::ALL.iter().filter(|t| **t == state.tab).count(), 1);
    }

    #[test]
    fn stale_reload_is_ignored() {
        let state = Rc::new(DashboardState::default());
        let state = state.reduce(DashboardAction::Loaded(loaded(2, 20.0)));
        let state = state.reduce(DashboardAction::Loaded(loaded(1, 10.0)));
        assert_eq!(state.snapshot.summary.balance, 20.0);
        let state = state.reduce(DashboardAction::Loaded(loaded(3, 30.0)));
        assert_eq!(state.snapshot.summary.balance, 30.0);
    }

    #[test]
    fn dismiss_only_clears_matching_notice() {
        let state = Rc::new(DashboardState::default());
        let state = state.reduce(DashboardAction::Notify(NoticeLevel::Error, "first".into()));
        let first_id = state.notice.as_ref().unwrap().id;
        let state = state.reduce(DashboardAction::Notify(NoticeLevel::Success, "second".into()));
        let state = state.reduce(DashboardAction::DismissNotice(first_id));
        assert_eq!(state.notice.as_ref().unwrap().message, "second");
        let second_id = state.notice.as_ref().unwrap().id;
        let state = state.reduce(DashboardAction::DismissNotice(second_id));
        assert!(state.notice.is_none());
    }

    #[test]
    fn delete_needs_explicit_confirmation_state() {
        let state = Rc::new(DashboardState::default());
        let state = state.reduce(DashboardAction::RequestDelete(PendingDelete::Budget(4)));
        assert_eq!(state.pending_delete, Some(PendingDelete::Budget(4)));
        let state = state.reduce(DashboardAction::CancelDelete);
        assert_eq!(state.pending_delete, None);
    }

    #[test]
    fn in_flight_admits_one_submit_at_a_time() {
        let guard = InFlight::default();
        assert!(guard.try_begin());
        assert!(!guard.try_begin());
        assert!(guard.is_busy());
        guard.end();
        assert!(!guard.is_busy());
        assert!(guard.try_begin());
    }

    #[test]
    fn tickets_increase() {
        let tickets = ReloadTickets::default();
        assert_eq!(tickets.issue(), 1);
        assert_eq!(tickets.issue(), 2);
    }
}
