use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::api::encode_segment;
use crate::models::RepoName;

#[component]
pub fn HomePage() -> impl IntoView {
    let navigate = use_navigate();
    let (input, set_input) = signal(String::new());
    let (error, set_error) = signal(Option::<String>::None);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        match input.get_untracked().parse::<RepoName>() {
            Ok(repo) => {
                set_error.set(None);
                navigate(&repository_path(&repo), Default::default());
            }
            Err(e) => set_error.set(Some(e.to_string())),
        }
    };

    view! {
        <div class="app">
            <header>
                <h1>"Repo Issues"</h1>
                <p class="subtitle">"Browse a GitHub repository and page through its issues"</p>
            </header>

            <form class="search-box" on:submit=on_submit>
                <input
                    type="text"
                    placeholder="owner/name (e.g. rust-lang/rust)"
                    prop:value=move || input.get()
                    on:input=move |ev| {
                        set_input.set(event_target_value(&ev));
                    }
                />
                <button type="submit" disabled=move || input.get().trim().is_empty()>
                    "Open"
                </button>
            </form>

            {move || error.get().map(|e| view! {
                <div class="error">
                    <strong>"Error: "</strong>{e}
                </div>
            })}
        </div>
    }
}

pub fn repository_path(repo: &RepoName) -> String {
    format!(
        "/repository/{}/{}",
        encode_segment(&repo.owner),
        encode_segment(&repo.name)
    )
}
