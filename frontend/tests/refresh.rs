use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures::executor::block_on;
use futures::task::noop_waker;

use finance_tracker_frontend::api::{AuthApi, DataFetcher};
use finance_tracker_frontend::auth;
use finance_tracker_frontend::charts::{self, ChartConfig, ChartRegistry, ChartSurface};
use finance_tracker_frontend::error::{ActionError, ApiError, ChartError, ValidationError};
use finance_tracker_frontend::forms::{BudgetForm, SignupForm, TransactionForm};
use finance_tracker_frontend::models::{
    AuthResponse, Budget, DashboardSummary, Goal, GoalContribution, LoginRequest, MonthlyPoint,
    NewBudget, NewGoal, NewTransaction, SignupRequest, Transaction, TransactionKind, User,
};
use finance_tracker_frontend::notify::PendingDelete;
use finance_tracker_frontend::view_model::{self, InFlight, Mutation, ReloadTickets, Snapshot};

/// In-memory server that counts every call by name.
#[derive(Default)]
struct FakeServer {
    calls: RefCell<HashMap<&'static str, usize>>,
    contributions: RefCell<Vec<(i64, f64)>>,
    reject_writes: bool,
}

impl FakeServer {
    fn rejecting() -> Self {
        FakeServer {
            reject_writes: true,
            ..FakeServer::default()
        }
    }

    fn hit(&self, name: &'static str) {
        *self.calls.borrow_mut().entry(name).or_insert(0) += 1;
    }

    fn count(&self, name: &str) -> usize {
        self.calls.borrow().get(name).copied().unwrap_or(0)
    }

    fn total(&self) -> usize {
        self.calls.borrow().values().sum()
    }

    fn write(&self, name: &'static str) -> Result<(), ApiError> {
        self.hit(name);
        if self.reject_writes {
            Err(ApiError::Status {
                status: 400,
                message: Some("rejected".to_string()),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait(?Send)]
impl DataFetcher for FakeServer {
    async fn dashboard(&self) -> Result<DashboardSummary, ApiError> {
        self.hit("dashboard");
        Ok(DashboardSummary::default())
    }

    async fn transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.hit("transactions");
        Ok(vec![Transaction {
            id: 1,
            kind: TransactionKind::Expense,
            category: "Food".to_string(),
            amount: 12.5,
            description: None,
            date: "2024-03-02".to_string(),
            is_recurring: None,
            recurring_frequency: None,
        }])
    }

    async fn create_transaction(&self, _: &NewTransaction) -> Result<(), ApiError> {
        self.write("create_transaction")
    }

    async fn delete_transaction(&self, _: i64) -> Result<(), ApiError> {
        self.write("delete_transaction")
    }

    async fn budgets(&self) -> Result<Vec<Budget>, ApiError> {
        self.hit("budgets");
        Ok(Vec::new())
    }

    async fn create_budget(&self, _: &NewBudget) -> Result<(), ApiError> {
        self.write("create_budget")
    }

    async fn delete_budget(&self, _: i64) -> Result<(), ApiError> {
        self.write("delete_budget")
    }

    async fn goals(&self) -> Result<Vec<Goal>, ApiError> {
        self.hit("goals");
        Ok(Vec::new())
    }

    async fn create_goal(&self, _: &NewGoal) -> Result<(), ApiError> {
        self.write("create_goal")
    }

    async fn contribute_to_goal(
        &self,
        id: i64,
        contribution: &GoalContribution,
    ) -> Result<(), ApiError> {
        self.contributions
            .borrow_mut()
            .push((id, contribution.current_addition));
        self.write("contribute_to_goal")
    }

    async fn delete_goal(&self, _: i64) -> Result<(), ApiError> {
        self.write("delete_goal")
    }

    async fn monthly_analytics(&self) -> Result<Vec<MonthlyPoint>, ApiError> {
        self.hit("monthly_analytics");
        Ok(Vec::new())
    }
}

#[async_trait(?Send)]
impl AuthApi for FakeServer {
    async fn login(&self, _: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.hit("login");
        Ok(AuthResponse {
            success: true,
            error: None,
        })
    }

    async fn signup(&self, _: &SignupRequest) -> Result<AuthResponse, ApiError> {
        self.hit("signup");
        Ok(AuthResponse {
            success: true,
            error: None,
        })
    }

    async fn me(&self) -> Result<User, ApiError> {
        self.hit("me");
        Err(ApiError::Status {
            status: 401,
            message: None,
        })
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.hit("logout");
        Ok(())
    }
}

const SOURCES: [&str; 5] = [
    "dashboard",
    "transactions",
    "budgets",
    "goals",
    "monthly_analytics",
];

fn assert_reloaded_once(server: &FakeServer) {
    for source in SOURCES {
        assert_eq!(server.count(source), 1, "{} fetched once", source);
    }
}

fn valid_transaction() -> TransactionForm {
    TransactionForm {
        category: "Food".to_string(),
        amount: "12.50".to_string(),
        ..TransactionForm::starting_on("2024-03-02")
    }
}

#[test]
fn successful_mutation_reloads_every_source_once() {
    let server = FakeServer::default();
    let tickets = ReloadTickets::default();
    let loaded = block_on(view_model::apply(
        &server,
        &tickets,
        Mutation::add_transaction(&valid_transaction()),
    ))
    .unwrap()
    .expect("reload succeeded");

    assert_eq!(server.count("create_transaction"), 1);
    assert_reloaded_once(&server);
    assert_eq!(loaded.ticket, 1);
    assert_eq!(loaded.snapshot.transactions.len(), 1);
}

#[test]
fn invalid_form_never_reaches_the_server() {
    let server = FakeServer::default();
    let tickets = ReloadTickets::default();
    let form = BudgetForm {
        category: "Rent".to_string(),
        limit: "abc".to_string(),
        alert_threshold: String::new(),
    };
    let result = block_on(view_model::apply(
        &server,
        &tickets,
        Mutation::add_budget(&form),
    ));

    assert!(matches!(
        result,
        Err(ActionError::Invalid(ValidationError::NotANumber(_)))
    ));
    assert_eq!(server.total(), 0);
}

#[test]
fn bad_contribution_sends_nothing() {
    let server = FakeServer::default();
    let tickets = ReloadTickets::default();
    for raw in ["", "abc", "0", "-5"] {
        let result = block_on(view_model::apply(
            &server,
            &tickets,
            Mutation::contribute(7, raw),
        ));
        assert!(result.is_err(), "{:?} rejected", raw);
    }
    assert_eq!(server.total(), 0);
}

#[test]
fn contribution_is_one_additive_update() {
    let server = FakeServer::default();
    let tickets = ReloadTickets::default();
    block_on(view_model::apply(
        &server,
        &tickets,
        Mutation::contribute(7, "25"),
    ))
    .unwrap();

    assert_eq!(server.count("contribute_to_goal"), 1);
    assert_eq!(*server.contributions.borrow(), vec![(7, 25.0)]);
    assert_reloaded_once(&server);
}

#[test]
fn double_click_on_contribution_sends_one_update() {
    let server = FakeServer::default();
    let tickets = ReloadTickets::default();
    let guard = InFlight::default();

    let mut sent = Vec::new();
    for _ in 0..2 {
        if guard.try_begin() {
            sent.push(view_model::apply(
                &server,
                &tickets,
                Mutation::contribute(7, "25"),
            ));
        }
    }
    assert_eq!(sent.len(), 1);
    for request in sent {
        block_on(request).unwrap();
    }
    guard.end();

    assert_eq!(server.count("contribute_to_goal"), 1);
    assert_eq!(*server.contributions.borrow(), vec![(7, 25.0)]);
}

#[test]
fn rejected_mutation_skips_reload() {
    let server = FakeServer::rejecting();
    let tickets = ReloadTickets::default();
    let result = block_on(view_model::apply(
        &server,
        &tickets,
        Ok(Mutation::Delete(PendingDelete::Goal(3))),
    ));

    match result {
        Err(ActionError::Api(err)) => {
            assert_eq!(err.user_message("Error deleting goal"), "rejected")
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(server.count("delete_goal"), 1);
    for source in SOURCES {
        assert_eq!(server.count(source), 0);
    }
}

#[test]
fn later_reload_gets_newer_ticket() {
    let server = FakeServer::default();
    let tickets = ReloadTickets::default();
    let first = block_on(view_model::reload(&server, &tickets)).unwrap();
    let second = block_on(view_model::reload(&server, &tickets)).unwrap();
    assert!(second.ticket > first.ticket);
}

#[test]
fn signup_mismatch_makes_no_call() {
    let server = FakeServer::default();
    let form = SignupForm {
        username: "ana".to_string(),
        email: "ana@example.com".to_string(),
        password: "secret1".to_string(),
        confirm_password: "secret2".to_string(),
    };
    let result = block_on(auth::signup(&server, &form));

    assert_eq!(result, Err("Passwords do not match".to_string()));
    assert_eq!(server.total(), 0);
}

#[test]
fn matching_signup_posts_once() {
    let server = FakeServer::default();
    let form = SignupForm {
        username: "ana".to_string(),
        email: "ana@example.com".to_string(),
        password: "secret1".to_string(),
        confirm_password: "secret1".to_string(),
    };
    assert_eq!(block_on(auth::signup(&server, &form)), Ok(()));
    assert_eq!(server.count("signup"), 1);
}

/// Holds every read until all five have been started.
#[derive(Default)]
struct Gate {
    started: Cell<usize>,
}

struct Arrive<'a> {
    gate: &'a Gate,
    counted: bool,
}

impl Gate {
    fn arrive(&self) -> Arrive<'_> {
        Arrive {
            gate: self,
            counted: false,
        }
    }
}

impl Future for Arrive<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<()> {
        if !self.counted {
            self.counted = true;
            self.gate.started.set(self.gate.started.get() + 1);
        }
        if self.gate.started.get() >= SOURCES.len() {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    }
}

/// Server whose reads only answer once every source has been requested.
#[derive(Default)]
struct GatedServer {
    gate: Gate,
}

#[async_trait(?Send)]
impl DataFetcher for GatedServer {
    async fn dashboard(&self) -> Result<DashboardSummary, ApiError> {
        self.gate.arrive().await;
        Ok(DashboardSummary::default())
    }

    async fn transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.gate.arrive().await;
        Ok(Vec::new())
    }

    async fn create_transaction(&self, _: &NewTransaction) -> Result<(), ApiError> {
        Ok(())
    }

    async fn delete_transaction(&self, _: i64) -> Result<(), ApiError> {
        Ok(())
    }

    async fn budgets(&self) -> Result<Vec<Budget>, ApiError> {
        self.gate.arrive().await;
        Ok(Vec::new())
    }

    async fn create_budget(&self, _: &NewBudget) -> Result<(), ApiError> {
        Ok(())
    }

    async fn delete_budget(&self, _: i64) -> Result<(), ApiError> {
        Ok(())
    }

    async fn goals(&self) -> Result<Vec<Goal>, ApiError> {
        self.gate.arrive().await;
        Ok(Vec::new())
    }

    async fn create_goal(&self, _: &NewGoal) -> Result<(), ApiError> {
        Ok(())
    }

    async fn contribute_to_goal(&self, _: i64, _: &GoalContribution) -> Result<(), ApiError> {
        Ok(())
    }

    async fn delete_goal(&self, _: i64) -> Result<(), ApiError> {
        Ok(())
    }

    async fn monthly_analytics(&self) -> Result<Vec<MonthlyPoint>, ApiError> {
        self.gate.arrive().await;
        Ok(Vec::new())
    }
}

#[test]
fn reload_requests_all_sources_before_any_answers() {
    let server = GatedServer::default();
    let waker = noop_waker();
    let mut cx = Context::from_waker(&waker);
    let mut load = Box::pin(view_model::load_snapshot(&server));

    // Fetched one after another, the first read would wait forever.
    let mut result = None;
    for _ in 0..10 {
        if let Poll::Ready(done) = load.as_mut().poll(&mut cx) {
            result = Some(done);
            break;
        }
    }

    let snapshot = result.expect("reload finished").unwrap();
    assert_eq!(server.gate.started.get(), SOURCES.len());
    assert_eq!(snapshot, Snapshot::default());
}

/// Chart surface that only remembers what it was asked to draw.
#[derive(Default)]
struct Recorder {
    drawn: RefCell<Vec<String>>,
    destroyed: RefCell<usize>,
}

impl ChartSurface for &Recorder {
    type Handle = String;

    fn create(&self, container_id: &str, _: &ChartConfig) -> Result<String, ChartError> {
        self.drawn.borrow_mut().push(container_id.to_string());
        Ok(container_id.to_string())
    }

    fn destroy(&self, _: String) {
        *self.destroyed.borrow_mut() += 1;
    }
}

#[test]
fn redraw_covers_every_chart_and_replaces_old_ones() {
    let recorder = Recorder::default();
    let mut registry = ChartRegistry::new(&recorder);
    let mut snapshot = Snapshot::default();
    snapshot.goals.push(Goal {
        id: 1,
        name: "Trip".to_string(),
        target: 1000.0,
        current: 250.0,
        progress: None,
        priority: None,
        deadline: None,
    });
    snapshot.transactions.push(Transaction {
        id: 2,
        kind: TransactionKind::Income,
        category: "Salary".to_string(),
        amount: 3000.0,
        description: None,
        date: "2024-03-01".to_string(),
        is_recurring: None,
        recurring_frequency: None,
    });

    let errors = charts::redraw_all(&mut registry, &snapshot, "2024-03");
    assert!(errors.is_empty());
    assert_eq!(recorder.drawn.borrow().len(), 9);
    assert_eq!(*recorder.destroyed.borrow(), 0);

    charts::redraw_all(&mut registry, &snapshot, "2024-03");
    assert_eq!(recorder.drawn.borrow().len(), 18);
    assert_eq!(*recorder.destroyed.borrow(), 9);

    // Without goals or income the two optional charts are taken down.
    let empty = Snapshot::default();
    charts::redraw_all(&mut registry, &empty, "2024-03");
    assert!(!registry.is_live("goalsChart"));
    assert!(!registry.is_live("incomeSourcesChart"));
    assert!(registry.is_live("expenseChart"));
}
