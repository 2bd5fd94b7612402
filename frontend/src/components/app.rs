use yew::prelude::*;

use super::auth_page::AuthPage;
use super::dashboard::DashboardPage;
use crate::auth::DASHBOARD_ROUTE;
use crate::browser;
use crate::config::AppConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Page {
    Auth,
    Dashboard,
}

impl Page {
    fn from_path(path: &str) -> Self {
        if path.trim_end_matches('/') == DASHBOARD_ROUTE {
            Page::Dashboard
        } else {
            Page::Auth
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo(|_| AppConfig::from_build_env(), ());
    let page = Page::from_path(&browser::pathname());

    html! {
        <ContextProvider<AppConfig> context={(*config).clone()}>
            {
                match page {
                    Page::Auth => html! { <AuthPage /> },
                    Page::Dashboard => html! { <DashboardPage /> },
                }
            }
        </ContextProvider<AppConfig>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_by_path() {
        assert_eq!(Page::from_path("/dashboard"), Page::Dashboard);
        assert_eq!(Page::from_path("/dashboard/"), Page::Dashboard);
        assert_eq!(Page::from_path("/"), Page::Auth);
        assert_eq!(Page::from_path("/anything"), Page::Auth);
    }
}
