use clap::Subcommand;
use emberday_core::storage::Config;
use emberday_core::{
    Database, Notification, NotificationKind, Result, StatusView, StreakTracker,
};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Record today's activity
    Record,
    /// Reset the streak to zero
    Reset,
    /// Print the current streak
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: StreakAction) -> Result<()> {
    let db = Database::open()?;
    let config = Config::load_or_default();
    let mut tracker = StreakTracker::new(db);

    // Continuity check runs before anything renders the count, so a
    // lapsed streak is never shown. With --json the launch notices are
    // suppressed to keep stdout machine-readable.
    let launch = tracker.launch();
    let json_output = matches!(action, StreakAction::Status { json: true });
    for notification in &launch.notifications {
        if json_output && notification.kind != NotificationKind::Error {
            continue;
        }
        show(&config, notification);
    }

    match action {
        StreakAction::Record => {
            let report = tracker.record();
            if let Some(event) = &report.event {
                println!("{}", serde_json::to_string_pretty(event)?);
            }
            show(&config, &report.notification);
        }
        StreakAction::Reset => {
            let report = tracker.reset();
            if let Some(event) = &report.event {
                println!("{}", serde_json::to_string_pretty(event)?);
            }
            show(&config, &report.notification);
        }
        StreakAction::Status { json } => {
            let status = tracker.status();
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("{}", render_status(&config, &status));
            }
        }
    }
    Ok(())
}

fn render_status(config: &Config, status: &StatusView) -> String {
    let flame = if config.ui.show_flame { "🔥 " } else { "" };
    let marker = if status.recorded_today {
        "recorded today"
    } else {
        "not yet recorded today"
    };
    format!("{flame}{} day streak ({marker})", status.count)
}

fn show(config: &Config, notification: &Notification) {
    match notification.kind {
        NotificationKind::Error => {
            eprintln!("{}: {}", notification.title, notification.body);
        }
        _ if config.notifications.enabled => {
            println!("{} {}", notification.title, notification.body);
        }
        _ => {}
    }
}
