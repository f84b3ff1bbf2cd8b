use leptos::logging::log;
use repo_issues::App;

fn main() {
    console_error_panic_hook::set_once();
    log!("starting repo-issues");
    leptos::mount::mount_to_body(App);
}
