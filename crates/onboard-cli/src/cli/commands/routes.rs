//! Prints the transition table.

use onboard_core::navigation::{self, NavRequest, Screen, UserAction, auth_success_request};

pub fn run() {
    for (from, trigger, request) in table() {
        println!(
            "{:<14} {:<28} -> {:<14}{}",
            from,
            trigger,
            request.target,
            describe_options(&request)
        );
    }
}

fn table() -> Vec<(String, String, NavRequest)> {
    let mut rows = Vec::new();
    for from in Screen::ALL {
        for action in UserAction::ALL {
            if let Some(request) = navigation::transition(from, action) {
                rows.push((from.to_string(), action.label().to_string(), request));
            }
        }
        if from.is_auth_form() {
            rows.push((
                from.to_string(),
                "auth state has user".to_string(),
                auth_success_request(),
            ));
        }
    }
    rows
}

fn describe_options(request: &NavRequest) -> String {
    let mut notes = Vec::new();
    if let Some(pop) = request.options.pop_up_to {
        let bound = if pop.inclusive { "inclusive" } else { "exclusive" };
        notes.push(format!("clear history to {} ({bound})", pop.screen));
    }
    if request.options.single_top {
        notes.push("single top".to_string());
    }
    if notes.is_empty() {
        String::new()
    } else {
        format!(" [{}]", notes.join(", "))
    }
}
