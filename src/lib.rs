use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

pub mod api;
pub mod config;
pub mod error;
pub mod filter;
pub mod format;
pub mod models;
pub mod pages;
pub mod pagination;
pub mod state;

use crate::config::ApiConfig;
use crate::pages::{HomePage, RepositoryPage};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(ApiConfig::from_build_env());

    view! {
        <Title text="Repo Issues" />
        <Router>
            <Routes fallback=|| "Page not found">
                <Route path=path!("/") view=HomePage />
                <Route path=path!("/repository/:owner/:name") view=RepositoryPage />
            </Routes>
        </Router>
    }
}
