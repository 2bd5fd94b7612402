use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::widgets::{on_text, Banner};
use crate::api::HttpClient;
use crate::auth::{self, AuthMode, DASHBOARD_ROUTE};
use crate::browser;
use crate::config::AppConfig;
use crate::forms::{LoginForm, SignupForm};
use crate::notify::{Notice, NoticeLevel};

#[function_component(AuthPage)]
pub fn auth_page() -> Html {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let mode = use_state(|| AuthMode::Login);
    let login_form = use_state(LoginForm::default);
    let signup_form = use_state(SignupForm::default);
    let error = use_state(|| None::<Notice>);
    let notice_seq = use_mut_ref(|| 0u64);
    let loading = use_state(|| false);

    let show_error = {
        let error = error.clone();
        let notice_seq = notice_seq.clone();
        move |message: String| {
            let mut seq = notice_seq.borrow_mut();
            *seq += 1;
            error.set(Some(Notice {
                id: *seq,
                level: NoticeLevel::Error,
                message,
            }));
        }
    };

    let on_submit = {
        let mode = mode.clone();
        let login_form = login_form.clone();
        let signup_form = signup_form.clone();
        let loading = loading.clone();
        let config = config.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *loading {
                return;
            }
            let api = HttpClient::new(config.clone());
            let mode = *mode;
            let login = (*login_form).clone();
            let signup = (*signup_form).clone();
            let loading = loading.clone();
            let show_error = show_error.clone();
            loading.set(true);
            spawn_local(async move {
                let result = match mode {
                    AuthMode::Login => auth::login(&api, &login).await,
                    AuthMode::Signup => auth::signup(&api, &signup).await,
                };
                loading.set(false);
                match result {
                    Ok(()) => browser::navigate(DASHBOARD_ROUTE),
                    Err(message) => show_error(message),
                }
            });
        })
    };

    let toggle_mode = {
        let mode = mode.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            error.set(None);
            mode.set(mode.toggled());
        })
    };

    let on_dismiss = {
        let error = error.clone();
        Callback::from(move |id: u64| {
            if error.as_ref().map(|n| n.id) == Some(id) {
                error.set(None);
            }
        })
    };

    let is_login = *mode == AuthMode::Login;

    html! {
        <div class="auth-container">
            <div class="auth-card">
                <div class="auth-header">
                    <h1>{"Finance Tracker"}</h1>
                    <p>{ if is_login { "Sign in to continue." } else { "Create an account to start tracking." } }</p>
                </div>

                <Banner notice={(*error).clone()} timeout_ms={config.notice_timeout_ms} {on_dismiss} />

                <form class="auth-form" onsubmit={on_submit}>
                    if is_login {
                        <div class="form-group">
                            <label for="login-username">{"Username"}</label>
                            <input id="login-username" type="text" required=true
                                value={login_form.username.clone()}
                                oninput={on_text(&login_form, |f, v| f.username = v)} />
                        </div>
                        <div class="form-group">
                            <label for="login-password">{"Password"}</label>
                            <input id="login-password" type="password" required=true
                                value={login_form.password.clone()}
                                oninput={on_text(&login_form, |f, v| f.password = v)} />
                        </div>
                    } else {
                        <div class="form-group">
                            <label for="signup-username">{"Username"}</label>
                            <input id="signup-username" type="text" required=true
                                value={signup_form.username.clone()}
                                oninput={on_text(&signup_form, |f, v| f.username = v)} />
                        </div>
                        <div class="form-group">
                            <label for="signup-email">{"Email"}</label>
                            <input id="signup-email" type="email" required=true
                                value={signup_form.email.clone()}
                                oninput={on_text(&signup_form, |f, v| f.email = v)} />
                        </div>
                        <div class="form-group">
                            <label for="signup-password">{"Password"}</label>
                            <input id="signup-password" type="password" required=true
                                value={signup_form.password.clone()}
                                oninput={on_text(&signup_form, |f, v| f.password = v)} />
                        </div>
                        <div class="form-group">
                            <label for="signup-confirm-password">{"Confirm Password"}</label>
                            <input id="signup-confirm-password" type="password" required=true
                                value={signup_form.confirm_password.clone()}
                                oninput={on_text(&signup_form, |f, v| f.confirm_password = v)} />
                        </div>
                    }

                    <button type="submit" class="btn-primary" disabled={*loading}>
                        { if *loading { "Please wait..." } else if is_login { "Login" } else { "Sign up" } }
                    </button>
                </form>

                <div class="auth-toggle">
                    { if is_login { "Don't have an account?" } else { "Already have an account?" } }
                    <button type="button" class="link-button" onclick={toggle_mode}>
                        { if is_login { "Sign up" } else { "Login" } }
                    </button>
                </div>
            </div>
        </div>
    }
}
