use yew::prelude::*;

use super::dashboard::Actions;
use super::icons::icon_plus;
use super::widgets::{empty_state, on_check, on_select, on_text};
use crate::format::{capitalized, format_currency};
use crate::forms::TransactionForm;
use crate::models::{RecurringFrequency, Transaction, TransactionKind};
use crate::notify::PendingDelete;
use crate::view_model::{InFlight, Mutation};

#[derive(Properties, PartialEq)]
pub struct TransactionsPanelProps {
    pub transactions: Vec<Transaction>,
    /// `YYYY-MM-DD`, preset into the date field.
    pub today: String,
    pub actions: Actions,
}

#[function_component(TransactionsPanel)]
pub fn transactions_panel(props: &TransactionsPanelProps) -> Html {
    let form = use_state(|| TransactionForm::starting_on(&props.today));
    let saving = use_state(|| false);
    let in_flight = use_memo(|_| InFlight::default(), ());

    let on_submit = {
        let form = form.clone();
        let saving = saving.clone();
        let in_flight = in_flight.clone();
        let actions = props.actions.clone();
        let today = props.today.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if !in_flight.try_begin() {
                return;
            }
            saving.set(true);
            let mutation = Mutation::add_transaction(&form);
            let form = form.clone();
            let saving = saving.clone();
            let in_flight = in_flight.clone();
            let today = today.clone();
            let on_done = Callback::from(move |ok: bool| {
                in_flight.end();
                saving.set(false);
                if ok {
                    form.set(TransactionForm::starting_on(&today));
                }
            });
            actions.submit(mutation, on_done);
        })
    };

    html! {
        <>
            <div class="card">
                <h3>{"Add Transaction"}</h3>
                <form id="transactionForm" class="form-grid" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="transactionType">{"Type"}</label>
                        <select id="transactionType" onchange={on_select(&form, |f, v| f.kind = v)}>
                            { for [TransactionKind::Expense, TransactionKind::Income].iter().map(|kind| html! {
                                <option value={kind.as_str()} selected={form.kind == kind.as_str()}>
                                    { capitalized(kind.as_str()) }
                                </option>
                            }) }
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="category">{"Category"}</label>
                        <input id="category" type="text" required=true
                            value={form.category.clone()}
                            oninput={on_text(&form, |f, v| f.category = v)} />
                    </div>
                    <div class="form-group">
                        <label for="amount">{"Amount"}</label>
                        <input id="amount" type="number" step="0.01" required=true
                            value={form.amount.clone()}
                            oninput={on_text(&form, |f, v| f.amount = v)} />
                    </div>
                    <div class="form-group">
                        <label for="description">{"Description"}</label>
                        <input id="description" type="text"
                            value={form.description.clone()}
                            oninput={on_text(&form, |f, v| f.description = v)} />
                    </div>
                    <div class="form-group">
                        <label for="date">{"Date"}</label>
                        <input id="date" type="date" required=true
                            value={form.date.clone()}
                            oninput={on_text(&form, |f, v| f.date = v)} />
                    </div>
                    <div class="form-group checkbox-group">
                        <label>
                            <input id="isRecurring" type="checkbox"
                                checked={form.is_recurring}
                                onchange={on_check(&form, |f, v| f.is_recurring = v)} />
                            {" Recurring"}
                        </label>
                        if form.is_recurring {
                            <select id="recurringFrequency" onchange={on_select(&form, |f, v| f.recurring_frequency = v)}>
                                { for RecurringFrequency::ALL.iter().map(|freq| html! {
                                    <option value={freq.as_str()} selected={form.recurring_frequency == freq.as_str()}>
                                        { capitalized(freq.as_str()) }
                                    </option>
                                }) }
                            </select>
                        }
                    </div>
                    <button type="submit" class="btn-primary" disabled={*saving}>
                        { icon_plus() }
                        <span>{ if *saving { "Saving..." } else { "Add Transaction" } }</span>
                    </button>
                </form>
            </div>

            <div class="card">
                <h3>{"Transactions"}</h3>
                <div id="transactionsList">
                    if props.transactions.is_empty() {
                        { empty_state("No transactions yet.") }
                    } else {
                        { for props.transactions.iter().map(|t| transaction_row(t, &props.actions)) }
                    }
                </div>
            </div>
        </>
    }
}

fn transaction_row(transaction: &Transaction, actions: &Actions) -> Html {
    let sign = if transaction.is_income() { "+" } else { "-" };
    let on_delete = {
        let actions = actions.clone();
        let id = transaction.id;
        Callback::from(move |_: MouseEvent| actions.request_delete(PendingDelete::Transaction(id)))
    };
    html! {
        <div class={classes!("transaction-item", transaction.kind.as_str())}>
            <div class="item-info">
                <div class="item-title">{ transaction.category.clone() }</div>
                <div class="transaction-date">{ transaction.date.clone() }</div>
                if let Some(description) = transaction.description.as_ref().filter(|d| !d.is_empty()) {
                    <div class="transaction-description">{ description.clone() }</div>
                }
            </div>
            <div class="transaction-amount">{ format!("{}{}", sign, format_currency(transaction.amount)) }</div>
            <button type="button" class="btn-danger" onclick={on_delete}>{"Delete"}</button>
        </div>
    }
}
