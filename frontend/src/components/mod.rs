//! Yew components. `App` picks the page from the current path.

mod analytics;
mod app;
mod auth_page;
mod budgets;
mod dashboard;
mod goals;
mod icons;
mod overview;
mod transactions;
mod widgets;

pub use app::App;
