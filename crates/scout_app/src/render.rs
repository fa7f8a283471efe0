use scout_core::{JobState, SeoPhase, SessionViewModel};

pub fn print_banner(view: &SessionViewModel) {
    if let Some(session_id) = &view.session_id {
        println!("analyzing {} (session {session_id})", view.url_input.trim());
    }
    if !view.history.is_empty() {
        println!("{} earlier analyses on record", view.history.len());
    }
    println!("press c to cancel");
}

pub fn render(view: &SessionViewModel) {
    if let Some(reason) = &view.validation_error {
        println!("error: {reason}");
        return;
    }
    println!("[{:3}%] {}", view.percent, view.status_message);
    if view.prompt_open {
        if let Some(message) = &view.prompt_message {
            println!("server: {message}");
        }
        println!("keep watching (w) or leave and get the result by email (l)?");
    }
}

pub fn print_deferred_notice() {
    println!("you can close this terminal; the result will arrive by email");
}

pub fn print_summary(view: &SessionViewModel) {
    match view.job {
        JobState::Completed => {
            let Some(result) = &view.result else {
                return;
            };
            println!("analysis complete: {}", result.final_url);
            println!(
                "  {} pages, {} extracted paths{}",
                result.page_count,
                result.path_count,
                if result.ai_enriched {
                    ", AI enriched"
                } else {
                    ""
                }
            );
            match (&result.seo, view.seo) {
                (Some(seo), _) => println!(
                    "  seo score {} ({} issues, {} warnings)",
                    seo.score, seo.issue_count, seo.warning_count
                ),
                (None, SeoPhase::Abandoned) => println!("  seo report unavailable"),
                (None, _) => {}
            }
        }
        JobState::Failed => println!("analysis failed: {}", view.status_message),
        JobState::Cancelled => println!("{}", view.status_message),
        JobState::Idle | JobState::Running => {}
    }
}
