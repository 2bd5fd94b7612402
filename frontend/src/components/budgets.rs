use yew::prelude::*;

use super::dashboard::Actions;
use super::icons::icon_plus;
use super::widgets::{empty_state, on_text, ProgressBar};
use crate::aggregates::{budget_usage, BudgetUsage};
use crate::format::format_currency;
use crate::forms::{BudgetForm, DEFAULT_ALERT_THRESHOLD};
use crate::models::{Budget, Transaction};
use crate::notify::PendingDelete;
use crate::view_model::{InFlight, Mutation};

#[derive(Properties, PartialEq)]
pub struct BudgetsPanelProps {
    pub budgets: Vec<Budget>,
    pub transactions: Vec<Transaction>,
    /// `YYYY-MM` the usage bars are measured against.
    pub month: String,
    pub actions: Actions,
}

#[function_component(BudgetsPanel)]
pub fn budgets_panel(props: &BudgetsPanelProps) -> Html {
    let form = use_state(BudgetForm::default);
    let saving = use_state(|| false);
    let in_flight = use_memo(|_| InFlight::default(), ());

    let on_submit = {
        let form = form.clone();
        let saving = saving.clone();
        let in_flight = in_flight.clone();
        let actions = props.actions.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if !in_flight.try_begin() {
                return;
            }
            saving.set(true);
            let mutation = Mutation::add_budget(&form);
            let form = form.clone();
            let saving = saving.clone();
            let in_flight = in_flight.clone();
            actions.submit(
                mutation,
                Callback::from(move |ok: bool| {
                    in_flight.end();
                    saving.set(false);
                    if ok {
                        form.set(BudgetForm::default());
                    }
                }),
            );
        })
    };

    let usage = budget_usage(&props.budgets, &props.transactions, &props.month);

    html! {
        <>
            <div class="card">
                <h3>{"Add Budget"}</h3>
                <form id="budgetForm" class="form-grid" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="budgetCategory">{"Category"}</label>
                        <input id="budgetCategory" type="text" required=true
                            value={form.category.clone()}
                            oninput={on_text(&form, |f, v| f.category = v)} />
                    </div>
                    <div class="form-group">
                        <label for="budgetLimit">{"Monthly Limit"}</label>
                        <input id="budgetLimit" type="number" step="0.01" required=true
                            value={form.limit.clone()}
                            oninput={on_text(&form, |f, v| f.limit = v)} />
                    </div>
                    <div class="form-group">
                        <label for="alertThreshold">{"Alert Threshold (%)"}</label>
                        <input id="alertThreshold" type="number" min="0" max="100"
                            placeholder={DEFAULT_ALERT_THRESHOLD.to_string()}
                            value={form.alert_threshold.clone()}
                            oninput={on_text(&form, |f, v| f.alert_threshold = v)} />
                    </div>
                    <button type="submit" class="btn-primary" disabled={*saving}>
                        { icon_plus() }
                        <span>{ if *saving { "Saving..." } else { "Add Budget" } }</span>
                    </button>
                </form>
            </div>

            <div class="card">
                <h3>{"Budgets"}</h3>
                <div id="budgetsList">
                    if usage.is_empty() {
                        { empty_state("No budgets yet.") }
                    } else {
                        { for usage.iter().map(|u| budget_row(u, &props.actions)) }
                    }
                </div>
            </div>
        </>
    }
}

fn budget_row(usage: &BudgetUsage, actions: &Actions) -> Html {
    let on_delete = {
        let actions = actions.clone();
        let id = usage.budget_id;
        Callback::from(move |_: MouseEvent| actions.request_delete(PendingDelete::Budget(id)))
    };
    let caption = format!(
        "{} / {} ({})",
        format_currency(usage.spent),
        format_currency(usage.limit),
        usage.status_label()
    );
    html! {
        <div class="budget-item">
            <div class="item-info">
                <div class="item-title">{ usage.category.clone() }</div>
                <ProgressBar percent={usage.bar_width()} over={usage.is_over()} {caption} />
            </div>
            <button type="button" class="btn-danger" onclick={on_delete}>{"Delete"}</button>
        </div>
    }
}
