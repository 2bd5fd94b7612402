use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::analytics::AnalyticsPanel;
use super::budgets::BudgetsPanel;
use super::goals::GoalsPanel;
use super::icons::{
    icon_bar_chart, icon_credit_card, icon_layout_grid, icon_log_out, icon_target, icon_wallet,
};
use super::overview::OverviewPanel;
use super::transactions::TransactionsPanel;
use super::widgets::{Banner, ConfirmModal};
use crate::api::{AuthApi, HttpClient};
use crate::auth::AUTH_ROUTE;
use crate::browser;
use crate::charts::{self, CanvasSurface, ChartRegistry};
use crate::config::AppConfig;
use crate::error::{ActionError, ValidationError};
use crate::notify::{NoticeLevel, PendingDelete};
use crate::view_model::{
    self, DashboardAction, DashboardState, Loaded, Mutation, ReloadTickets, Snapshot, Tab,
};

/// What every panel needs to change data: the client, the reload counter and
/// a way back into the dashboard state.
#[derive(Clone)]
pub struct Actions {
    api: Rc<HttpClient>,
    tickets: Rc<ReloadTickets>,
    dispatch: UseReducerDispatcher<DashboardState>,
}

impl PartialEq for Actions {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.api, &other.api)
            && Rc::ptr_eq(&self.tickets, &other.tickets)
            && self.dispatch == other.dispatch
    }
}

impl Actions {
    fn notify(&self, level: NoticeLevel, message: impl Into<String>) {
        self.dispatch
            .dispatch(DashboardAction::Notify(level, message.into()));
    }

    /// Applies a finished mutation to the page. Returns whether it succeeded.
    fn finish(
        &self,
        result: Result<Option<Loaded>, ActionError>,
        success: &str,
        failure: &str,
    ) -> bool {
        match result {
            Ok(loaded) => {
                if let Some(loaded) = loaded {
                    self.dispatch.dispatch(DashboardAction::Loaded(loaded));
                }
                self.notify(NoticeLevel::Success, success);
                true
            }
            Err(ActionError::Invalid(err)) => {
                self.notify(NoticeLevel::Error, err.to_string());
                false
            }
            Err(ActionError::Api(err)) => {
                log::error!("{}: {}", failure, err);
                self.notify(NoticeLevel::Error, err.user_message(failure));
                false
            }
        }
    }

    pub fn reload(&self) {
        let actions = self.clone();
        spawn_local(async move {
            match view_model::reload(&*actions.api, &actions.tickets).await {
                Ok(loaded) => actions.dispatch.dispatch(DashboardAction::Loaded(loaded)),
                Err(err) => log::error!("Error loading data: {}", err),
            }
        });
    }

    /// Sends a mutation; `on_done` hears whether it went through so the
    /// caller can reset its form.
    pub fn submit(&self, mutation: Result<Mutation, ValidationError>, on_done: Callback<bool>) {
        let (success, failure) = match &mutation {
            Ok(m) => (m.success_message(), m.failure_message()),
            Err(_) => ("", ""),
        };
        let actions = self.clone();
        spawn_local(async move {
            let result = view_model::apply(&*actions.api, &actions.tickets, mutation).await;
            let ok = actions.finish(result, success, failure);
            on_done.emit(ok);
        });
    }

    pub fn request_delete(&self, pending: PendingDelete) {
        self.dispatch
            .dispatch(DashboardAction::RequestDelete(pending));
    }
}

fn tab_icon(tab: Tab) -> Html {
    match tab {
        Tab::Dashboard => icon_layout_grid(),
        Tab::Transactions => icon_credit_card(),
        Tab::Budgets => icon_wallet(),
        Tab::Goals => icon_target(),
        Tab::Analytics => icon_bar_chart(),
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let state = use_reducer(DashboardState::default);
    let api = use_memo(|config| HttpClient::new(config.clone()), config.clone());
    let tickets = use_memo(|_| ReloadTickets::default(), ());
    let greeting = use_state(String::new);
    let today = use_state(browser::today);
    let charts = use_mut_ref(|| ChartRegistry::new(CanvasSurface));

    let actions = Actions {
        api: api.clone(),
        tickets: tickets.clone(),
        dispatch: state.dispatcher(),
    };

    {
        let api = api.clone();
        let greeting = greeting.clone();
        let actions = actions.clone();
        let redirect_delay = config.auth_redirect_delay_ms;
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match api.me().await {
                        Ok(user) => {
                            greeting.set(format!("Welcome back, {}!", user.username));
                            actions.reload();
                        }
                        Err(err) => {
                            if err.is_unauthorized() {
                                log::info!("no active session, returning to login");
                            } else {
                                log::warn!("session check failed: {}", err);
                            }
                            Timeout::new(redirect_delay, || browser::navigate(AUTH_ROUTE)).forget();
                        }
                    }
                });
                || ()
            },
            (),
        );
    }

    {
        let today = today.clone();
        let refresh_ms = config.clock_refresh_ms;
        use_effect_with_deps(
            move |_| {
                let clock = Interval::new(refresh_ms, move || today.set(browser::today()));
                move || drop(clock)
            },
            (),
        );
    }

    {
        let charts = charts.clone();
        use_effect_with_deps(
            move |(snapshot, loaded, month): &(Snapshot, bool, String)| {
                if *loaded {
                    let mut registry = charts.borrow_mut();
                    let failed = charts::redraw_all(&mut *registry, snapshot, month);
                    if !failed.is_empty() {
                        log::debug!("{} chart(s) not drawn", failed.len());
                    }
                }
                || ()
            },
            (
                state.snapshot.clone(),
                state.loaded,
                browser::month_key(*today),
            ),
        );
    }

    let on_logout = {
        let api = api.clone();
        Callback::from(move |_: MouseEvent| {
            let api = api.clone();
            spawn_local(async move {
                if let Err(err) = api.logout().await {
                    log::warn!("logout failed: {}", err);
                }
                browser::navigate(AUTH_ROUTE);
            });
        })
    };

    let on_dismiss = {
        let dispatch = state.dispatcher();
        Callback::from(move |id: u64| dispatch.dispatch(DashboardAction::DismissNotice(id)))
    };

    let on_confirm_delete = {
        let actions = actions.clone();
        Callback::from(move |pending: PendingDelete| {
            actions.dispatch.dispatch(DashboardAction::CancelDelete);
            actions.submit(Ok(Mutation::Delete(pending)), Callback::noop());
        })
    };

    let on_cancel_delete = {
        let dispatch = state.dispatcher();
        Callback::from(move |_| dispatch.dispatch(DashboardAction::CancelDelete))
    };

    let panel_class = |tab: Tab| classes!("tab-content", (state.tab == tab).then_some("active"));
    let month = browser::month_key(*today);

    html! {
        <div class="container">
            <header class="dashboard-header">
                <div>
                    <h1 id="userGreeting">{ (*greeting).clone() }</h1>
                    <p id="currentDate" class="current-date">{ browser::long_date(*today) }</p>
                </div>
                <button type="button" class="btn-secondary logout-button" onclick={on_logout}>
                    { icon_log_out() }
                    <span>{"Logout"}</span>
                </button>
            </header>

            <Banner notice={state.notice.clone()} timeout_ms={config.notice_timeout_ms} {on_dismiss} />

            <nav class="tabs">
                { for Tab::ALL.iter().map(|tab| {
                    let tab = *tab;
                    let dispatch = state.dispatcher();
                    let onclick = Callback::from(move |_| dispatch.dispatch(DashboardAction::SelectTab(tab)));
                    html! {
                        <button type="button"
                            class={classes!("tab-button", (state.tab == tab).then_some("active"))}
                            data-tab={tab.id()}
                            {onclick}>
                            { tab_icon(tab) }
                            <span>{ tab.label() }</span>
                        </button>
                    }
                }) }
            </nav>

            <section id={Tab::Dashboard.id()} class={panel_class(Tab::Dashboard)}>
                <OverviewPanel summary={state.snapshot.summary.clone()} />
            </section>
            <section id={Tab::Transactions.id()} class={panel_class(Tab::Transactions)}>
                <TransactionsPanel
                    transactions={state.snapshot.transactions.clone()}
                    today={browser::iso_date(*today)}
                    actions={actions.clone()} />
            </section>
            <section id={Tab::Budgets.id()} class={panel_class(Tab::Budgets)}>
                <BudgetsPanel
                    budgets={state.snapshot.budgets.clone()}
                    transactions={state.snapshot.transactions.clone()}
                    month={month.clone()}
                    actions={actions.clone()} />
            </section>
            <section id={Tab::Goals.id()} class={panel_class(Tab::Goals)}>
                <GoalsPanel goals={state.snapshot.goals.clone()} actions={actions.clone()} />
            </section>
            <section id={Tab::Analytics.id()} class={panel_class(Tab::Analytics)}>
                <AnalyticsPanel snapshot={state.snapshot.clone()} />
            </section>

            <ConfirmModal
                pending={state.pending_delete}
                on_confirm={on_confirm_delete}
                on_cancel={on_cancel_delete} />
        </div>
    }
}
