use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::dashboard::Actions;
use super::icons::icon_plus;
use super::widgets::{empty_state, goal_caption, on_select, on_text, ProgressBar};
use crate::format::capitalized;
use crate::forms::GoalForm;
use crate::models::{Goal, GoalPriority};
use crate::notify::PendingDelete;
use crate::view_model::{InFlight, Mutation};

#[derive(Properties, PartialEq)]
pub struct GoalsPanelProps {
    pub goals: Vec<Goal>,
    pub actions: Actions,
}

#[function_component(GoalsPanel)]
pub fn goals_panel(props: &GoalsPanelProps) -> Html {
    let form = use_state(GoalForm::default);
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
            let mutation = Mutation::add_goal(&form);
            let form = form.clone();
            let saving = saving.clone();
            let in_flight = in_flight.clone();
            actions.submit(
                mutation,
                Callback::from(move |ok: bool| {
                    in_flight.end();
                    saving.set(false);
                    if ok {
                        form.set(GoalForm::default());
                    }
                }),
            );
        })
    };

    let selected_priority = GoalPriority::parse(&form.priority).unwrap_or_default();

    html! {
        <>
            <div class="card">
                <h3>{"Add Savings Goal"}</h3>
                <form id="goalForm" class="form-grid" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="goalName">{"Goal Name"}</label>
                        <input id="goalName" type="text" required=true
                            value={form.name.clone()}
                            oninput={on_text(&form, |f, v| f.name = v)} />
                    </div>
                    <div class="form-group">
                        <label for="goalTarget">{"Target Amount"}</label>
                        <input id="goalTarget" type="number" step="0.01" required=true
                            value={form.target.clone()}
                            oninput={on_text(&form, |f, v| f.target = v)} />
                    </div>
                    <div class="form-group">
                        <label for="goalPriority">{"Priority"}</label>
                        <select id="goalPriority" onchange={on_select(&form, |f, v| f.priority = v)}>
                            { for GoalPriority::ALL.iter().map(|p| html! {
                                <option value={p.as_str()} selected={*p == selected_priority}>
                                    { capitalized(p.as_str()) }
                                </option>
                            }) }
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="goalDeadline">{"Deadline"}</label>
                        <input id="goalDeadline" type="date"
                            value={form.deadline.clone()}
                            oninput={on_text(&form, |f, v| f.deadline = v)} />
                    </div>
                    <button type="submit" class="btn-primary" disabled={*saving}>
                        { icon_plus() }
                        <span>{ if *saving { "Saving..." } else { "Add Goal" } }</span>
                    </button>
                </form>
            </div>

            <div class="card">
                <h3>{"Savings Goals"}</h3>
                <div id="goalsList">
                    if props.goals.is_empty() {
                        { empty_state("No goals yet.") }
                    } else {
                        { for props.goals.iter().map(|goal| html! {
                            <GoalRow key={goal.id} goal={goal.clone()} actions={props.actions.clone()} />
                        }) }
                    }
                </div>
            </div>
        </>
    }
}

#[derive(Properties, PartialEq)]
struct GoalRowProps {
    goal: Goal,
    actions: Actions,
}

#[function_component(GoalRow)]
fn goal_row(props: &GoalRowProps) -> Html {
    let amount = use_state(String::new);
    let saving = use_state(|| false);
    let in_flight = use_memo(|_| InFlight::default(), ());
    let goal = &props.goal;
    let progress = goal.progress_percent();

    let on_amount = {
        let amount = amount.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            amount.set(input.value());
        })
    };

    let on_add = {
        let amount = amount.clone();
        let saving = saving.clone();
        let in_flight = in_flight.clone();
        let actions = props.actions.clone();
        let id = goal.id;
        Callback::from(move |_: MouseEvent| {
            if !in_flight.try_begin() {
                return;
            }
            saving.set(true);
            let mutation = Mutation::contribute(id, &amount);
            let amount = amount.clone();
            let saving = saving.clone();
            let in_flight = in_flight.clone();
            actions.submit(
                mutation,
                Callback::from(move |ok: bool| {
                    in_flight.end();
                    saving.set(false);
                    if ok {
                        amount.set(String::new());
                    }
                }),
            );
        })
    };

    let on_delete = {
        let actions = props.actions.clone();
        let id = goal.id;
        Callback::from(move |_: MouseEvent| actions.request_delete(PendingDelete::Goal(id)))
    };

    let priority = goal
        .priority
        .as_deref()
        .and_then(GoalPriority::parse)
        .unwrap_or_default();

    html! {
        <div class="goal-item">
            <div class="item-info">
                <div class="item-title">{ goal.name.clone() }</div>
                <div class="goal-meta">
                    {"Priority: "}<strong>{ priority.as_str() }</strong>
                    if let Some(deadline) = goal.deadline.as_ref().filter(|d| !d.is_empty()) {
                        { format!(" | Deadline: {}", deadline) }
                    }
                </div>
                <ProgressBar
                    percent={progress}
                    caption={goal_caption(progress, goal.current, goal.target)} />
            </div>
            <div class="item-actions">
                <input type="number" step="0.01" placeholder="Amount"
                    id={format!("goalAmount-{}", goal.id)}
                    value={(*amount).clone()}
                    oninput={on_amount} />
                <button type="button" class="btn-secondary" disabled={*saving} onclick={on_add}>{"Add"}</button>
                <button type="button" class="btn-danger" onclick={on_delete}>{"Delete"}</button>
            </div>
        </div>
    }
}
