use chrono::Utc;
use leptos::logging::log;
use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;
use wasm_bindgen::JsValue;

use crate::api::GithubClient;
use crate::config::ApiConfig;
use crate::filter::IssueFilter;
use crate::format::{format_age, format_number, label_text_color};
use crate::models::{Issue, RepoName, Repository};
use crate::state::RepositoryState;

// Route params arrive percent-encoded.
fn decode_param(raw: &str) -> String {
    js_sys::decode_uri_component(raw)
        .map(String::from)
        .unwrap_or_else(|_: JsValue| raw.to_string())
}

#[component]
pub fn RepositoryPage() -> impl IntoView {
    let params = use_params_map();
    let client = GithubClient::new(use_context::<ApiConfig>().unwrap_or_default());

    let repo_name = Memo::new(move |_| {
        let params = params.get();
        let owner = decode_param(&params.get("owner").unwrap_or_default());
        let name = decode_param(&params.get("name").unwrap_or_default());
        RepoName::new(&owner, &name)
    });

    let state = RwSignal::new(RepositoryState::default());
    // Only the filter and page number drive refetching; learning the last page must not.
    let filter = Memo::new(move |_| state.with(|s| s.filter));
    let page = Memo::new(move |_| state.with(|s| s.pager.page));
    let loading = Memo::new(move |_| state.with(RepositoryState::is_loading));
    let repository = Memo::new(move |_| state.with(|s| s.repository.clone()));
    let repo_error = Memo::new(move |_| state.with(|s| s.repo_error.clone()));

    // Repository metadata, once per repository
    {
        let client = client.clone();
        Effect::new(move |prev: Option<()>| {
            let current = repo_name.get();

            if prev.is_some() {
                // Navigated to another repository without remounting.
                state.update(RepositoryState::switch_repository);
            }

            let repo = match current {
                Ok(repo) => repo,
                Err(e) => {
                    state.update(|s| s.fail_repository(&e));
                    return;
                }
            };

            let mut ticket = 0;
            state.update(|s| ticket = s.begin_repository());

            let client = client.clone();
            leptos::task::spawn_local(async move {
                let result = client.fetch_repository(&repo).await;
                let mut applied = false;
                state.update(|s| applied = s.apply_repository(ticket, result));
                if !applied {
                    log!("dropping stale metadata for {repo}");
                }
            });
        });
    }

    // Issues, whenever repository, filter or page changes
    Effect::new(move |_| {
        let Ok(repo) = repo_name.get() else {
            return;
        };
        let query = client.issues_query(repo, filter.get(), page.get());

        let mut ticket = 0;
        state.update(|s| ticket = s.begin_issues());

        let client = client.clone();
        leptos::task::spawn_local(async move {
            let result = client.fetch_issues(&query).await;
            let mut applied = false;
            state.update(|s| applied = s.apply_issues(ticket, query.page, result));
            if !applied {
                log!("dropping stale issues response for page {}", query.page);
            }
        });
    });

    view! {
        <Title text=move || {
            repo_name
                .get()
                .map(|r| format!("{r} issues"))
                .unwrap_or_else(|_| "Repo Issues".to_string())
        } />

        {move || {
            if loading.get() {
                return view! { <div class="loading">"Loading"</div> }.into_any();
            }

            if let Some(e) = repo_error.get() {
                return view! {
                    <div class="app">
                        <A href="/" attr:class="back-link">"< Back to repositories"</A>
                        <div class="error">
                            <strong>"Error: "</strong>{e}
                        </div>
                    </div>
                }
                .into_any();
            }

            let Some(repo): Option<Repository> = repository.get() else {
                return view! { <div class="empty">"Repository not found."</div> }.into_any();
            };

            view! {
                <div class="app">
                    <header class="owner">
                        <A href="/" attr:class="back-link">"< Back to repositories"</A>
                        <img src=repo.owner.avatar_url.clone() alt=repo.owner.login.clone() />
                        <h1>
                            <a href=repo.html_url.clone() target="_blank" rel="noopener noreferrer">
                                {repo.name.clone()}
                            </a>
                        </h1>
                        <p>{repo.description.clone().unwrap_or_default()}</p>
                        <div class="repo-meta">
                            <span>{format_number(repo.stargazers_count)}" stars"</span>
                            <span>{format_number(repo.forks_count)}" forks"</span>
                            <span>{format_number(repo.open_issues_count)}" open issues"</span>
                            {repo.language.clone().map(|l| view! { <span class="language-badge">{l}</span> })}
                        </div>
                    </header>

                    <section class="issue-list">
                        <div class="issue-filter">
                            {IssueFilter::ALL.iter().map(move |&f| {
                                view! {
                                    <button
                                        type="button"
                                        class:active=move || filter.get() == f
                                        on:click=move |_| {
                                            state.update(|s| {
                                                s.select_filter(f);
                                            });
                                        }
                                    >
                                        {f.label()}
                                    </button>
                                }
                            }).collect::<Vec<_>>()}
                        </div>

                        {move || state.with(|s| s.issues_error.clone()).map(|e| view! {
                            <div class="error">
                                <strong>"Error: "</strong>{e}
                            </div>
                        })}

                        <ul class:refreshing=move || state.with(|s| s.fetching)>
                            {move || {
                                let list = state.with(|s| s.issues.clone());
                                if list.is_empty() {
                                    view! { <li class="empty">"No issues to show."</li> }.into_any()
                                } else {
                                    let now = Utc::now();
                                    list.into_iter()
                                        .map(|issue| view! { <IssueRow issue=issue now=now /> })
                                        .collect::<Vec<_>>()
                                        .into_any()
                                }
                            }}
                        </ul>

                        <div class="issue-pagination">
                            <button
                                type="button"
                                disabled=move || !state.with(RepositoryState::can_go_previous)
                                on:click=move |_| state.update(|s| {
                                    s.previous_page();
                                })
                            >
                                "Previous"
                            </button>
                            <span>{move || state.with(|s| s.pager.describe())}</span>
                            <button
                                type="button"
                                disabled=move || !state.with(RepositoryState::can_go_next)
                                on:click=move |_| state.update(|s| {
                                    s.next_page();
                                })
                            >
                                "Next"
                            </button>
                        </div>
                    </section>
                </div>
            }
            .into_any()
        }}
    }
}

#[component]
fn IssueRow(issue: Issue, now: chrono::DateTime<Utc>) -> impl IntoView {
    let age = format_age(issue.created_at, now);
    let is_pr = issue.is_pull_request();

    view! {
        <li>
            <img src=issue.user.avatar_url.clone() alt=issue.user.login.clone() />
            <div>
                <strong>
                    <a href=issue.html_url.clone() target="_blank" rel="noopener noreferrer">
                        {issue.title.clone()}
                    </a>
                    {is_pr.then(|| view! { <span class="badge pr-badge">"PR"</span> })}
                    {issue.labels.iter().map(|label| {
                        let style = format!(
                            "background: #{}; color: {}",
                            label.color,
                            label_text_color(&label.color)
                        );
                        view! { <span class="issue-label" style=style>{label.name.clone()}</span> }
                    }).collect::<Vec<_>>()}
                </strong>
                <p>
                    "#"{issue.number}" opened "{age}" by "{issue.user.login.clone()}
                    {(issue.comments > 0).then(|| format!(" · {} comments", issue.comments))}
                </p>
            </div>
        </li>
    }
}
