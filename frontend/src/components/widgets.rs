use gloo_timers::callback::Timeout;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::format::format_currency;
use crate::notify::{Notice, PendingDelete};

/// `oninput` handler that writes the input's text into one field of a form state.
pub fn on_text<T: Clone + 'static>(
    form: &UseStateHandle<T>,
    set: fn(&mut T, String),
) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut next = (*form).clone();
        set(&mut next, input.value());
        form.set(next);
    })
}

pub fn on_select<T: Clone + 'static>(
    form: &UseStateHandle<T>,
    set: fn(&mut T, String),
) -> Callback<Event> {
    let form = form.clone();
    Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        let mut next = (*form).clone();
        set(&mut next, select.value());
        form.set(next);
    })
}

pub fn on_check<T: Clone + 'static>(
    form: &UseStateHandle<T>,
    set: fn(&mut T, bool),
) -> Callback<Event> {
    let form = form.clone();
    Callback::from(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut next = (*form).clone();
        set(&mut next, input.checked());
        form.set(next);
    })
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: &'static str,
    pub value: String,
    pub icon: Html,
    #[prop_or_default]
    pub negative: bool,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class={classes!("summary-card", props.negative.then_some("negative"))}>
            <div>
                <p class="summary-label">{ props.title }</p>
                <h3 class="summary-value">{ props.value.clone() }</h3>
            </div>
            <div class="summary-icon">{ props.icon.clone() }</div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProgressBarProps {
    /// 0..=100; larger values draw a full bar.
    pub percent: f64,
    #[prop_or_default]
    pub over: bool,
    pub caption: String,
}

#[function_component(ProgressBar)]
pub fn progress_bar(props: &ProgressBarProps) -> Html {
    let width = props.percent.clamp(0.0, 100.0);
    html! {
        <div class="progress-container">
            <div class="progress-bar">
                <div class={classes!("progress-fill", props.over.then_some("over"))} style={format!("width: {}%", width)}></div>
            </div>
            <div class="progress-text">{ props.caption.clone() }</div>
        </div>
    }
}

/// Caption used under every goal progress bar.
pub fn goal_caption(progress: f64, current: f64, target: f64) -> String {
    format!(
        "{}% - {} / {}",
        progress,
        format_currency(current),
        format_currency(target)
    )
}

#[derive(Properties, PartialEq)]
pub struct BannerProps {
    pub notice: Option<Notice>,
    pub timeout_ms: u32,
    pub on_dismiss: Callback<u64>,
}

/// Dismissible message that hides itself after `timeout_ms`.
#[function_component(Banner)]
pub fn banner(props: &BannerProps) -> Html {
    {
        let on_dismiss = props.on_dismiss.clone();
        let timeout_ms = props.timeout_ms;
        use_effect_with_deps(
            move |id: &Option<u64>| {
                let timer = id.map(|id| Timeout::new(timeout_ms, move || on_dismiss.emit(id)));
                move || drop(timer)
            },
            props.notice.as_ref().map(|n| n.id),
        );
    }

    match &props.notice {
        Some(notice) => {
            let id = notice.id;
            let on_close = {
                let on_dismiss = props.on_dismiss.clone();
                Callback::from(move |_| on_dismiss.emit(id))
            };
            html! {
                <div class={classes!(notice.level.css_class(), "show")} role="alert">
                    <span>{ notice.message.clone() }</span>
                    <button type="button" class="notice-close" aria-label="Dismiss" onclick={on_close}>{"×"}</button>
                </div>
            }
        }
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct ConfirmModalProps {
    pub pending: Option<PendingDelete>,
    pub on_confirm: Callback<PendingDelete>,
    pub on_cancel: Callback<()>,
}

#[function_component(ConfirmModal)]
pub fn confirm_modal(props: &ConfirmModalProps) -> Html {
    let Some(pending) = props.pending else {
        return html! {};
    };
    let on_confirm = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_| on_confirm.emit(pending))
    };
    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_| on_cancel.emit(()))
    };
    html! {
        <div class="modal-backdrop">
            <div class="modal" role="dialog" aria-modal="true">
                <p>{ pending.prompt() }</p>
                <div class="modal-actions">
                    <button type="button" class="btn-secondary" onclick={on_cancel}>{"Cancel"}</button>
                    <button type="button" class="btn-danger" onclick={on_confirm}>{"Delete"}</button>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ChartCardProps {
    pub title: &'static str,
    pub canvas_id: &'static str,
}

#[function_component(ChartCard)]
pub fn chart_card(props: &ChartCardProps) -> Html {
    html! {
        <div class="chart-card">
            <h3>{ props.title }</h3>
            <div class="chart-wrapper">
                <canvas id={props.canvas_id}></canvas>
            </div>
        </div>
    }
}

pub fn empty_state(message: &'static str) -> Html {
    html! { <p class="empty-state">{ message }</p> }
}
