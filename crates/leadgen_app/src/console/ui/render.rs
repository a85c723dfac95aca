use std::fmt::Write;

use chrono::{DateTime, Local};
use leadgen_core::{
    EmailRecord, Notification, NotificationLevel, PipelineViewModel, Stage, UploadSummary,
    WebsiteId,
};

pub const HELP: &str = "\
Commands:
  fetch <keyword> [country=<name>] [locality=<name>] [count=<1-500>]
  filter [active] [shopify] [fast] [exclude=a,b,c]
  upload filter|email <path.csv>
  extract                 find emails for the filtered websites
  export                  write email_results.csv
  show                    print the current lists
  help                    this text
  quit";

/// One-line summary printed after each state change.
pub fn render_status(view: &PipelineViewModel) -> String {
    let stages: Vec<String> = Stage::ALL
        .iter()
        .map(|&stage| {
            let marker = if view.busy == Some(stage) {
                "*"
            } else if view.controls.is_enabled(stage) {
                "+"
            } else {
                "-"
            };
            format!("{marker}{stage}")
        })
        .collect();
    format!(
        "[{}] stage={} fetched={} filtered={} emails={}",
        stages.join(" "),
        view.active_stage,
        view.fetched_websites.len(),
        view.filtered_websites.len(),
        view.email_count()
    )
}

pub fn render_view(view: &PipelineViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", render_status(view));
    render_upload(&mut out, "Filter upload", view.filter_upload.as_ref());
    render_upload(&mut out, "Email upload", view.email_upload.as_ref());
    out.push_str(&render_websites("Fetched websites", &view.fetched_websites));
    out.push_str(&render_websites("Filtered websites", &view.filtered_websites));
    out.push_str(&render_results(&view.email_results));
    out
}

pub fn render_websites(title: &str, websites: &[WebsiteId]) -> String {
    let mut out = format!("{title} ({}):\n", websites.len());
    if websites.is_empty() {
        out.push_str("  (none)\n");
    }
    for (index, site) in websites.iter().enumerate() {
        let _ = writeln!(out, "  {:>3}. {site}", index + 1);
    }
    out
}

pub fn render_results(results: &[EmailRecord]) -> String {
    let mut out = format!("Email results ({} websites):\n", results.len());
    if results.is_empty() {
        out.push_str("  (none)\n");
    }
    for record in results {
        if record.emails.is_empty() {
            let _ = writeln!(out, "  {}: no emails found", record.website);
        } else {
            let _ = writeln!(out, "  {}: {}", record.website, record.emails.join(", "));
        }
    }
    out
}

pub fn render_notification(notification: &Notification, at: DateTime<Local>) -> String {
    let tag = match notification.level {
        NotificationLevel::Info => "info",
        NotificationLevel::Error => "error",
    };
    format!(
        "{} [{tag}] {}: {}",
        at.format("%H:%M:%S"),
        notification.title,
        notification.message
    )
}

fn render_upload(out: &mut String, label: &str, upload: Option<&UploadSummary>) {
    if let Some(upload) = upload {
        let _ = writeln!(
            out,
            "{label}: {} ({} websites)",
            upload.source_name, upload.website_count
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{render_notification, render_results, render_status, render_websites};
    use chrono::{Local, TimeZone};
    use leadgen_core::{EmailRecord, Notification, PipelineViewModel, Stage, StageControls};

    #[test]
    fn status_marks_busy_and_enabled_stages() {
        let view = PipelineViewModel {
            active_stage: Stage::Filter,
            busy: Some(Stage::Filter),
            controls: StageControls {
                fetch: false,
                filter: false,
                email: false,
            },
            fetched_websites: vec!["a.com".into(), "b.com".into()],
            ..PipelineViewModel::default()
        };
        assert_eq!(
            render_status(&view),
            "[-fetch *filter -email] stage=filter fetched=2 filtered=0 emails=0"
        );
    }

    #[test]
    fn lists_are_numbered_and_empty_lists_say_so() {
        assert_eq!(
            render_websites("Fetched websites", &["a.com".to_string()]),
            "Fetched websites (1):\n    1. a.com\n"
        );
        assert_eq!(render_websites("Filtered", &[]), "Filtered (0):\n  (none)\n");
    }

    #[test]
    fn results_show_sites_without_emails() {
        let results = vec![
            EmailRecord::new("a.com", vec!["info@a.com".into(), "x@a.com".into()]),
            EmailRecord::new("b.com", vec![]),
        ];
        assert_eq!(
            render_results(&results),
            "Email results (2 websites):\n  a.com: info@a.com, x@a.com\n  b.com: no emails found\n"
        );
    }

    #[test]
    fn notification_carries_timestamp_and_level() {
        let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 5).unwrap();
        let line = render_notification(&Notification::error("Error", "boom"), at);
        assert_eq!(line, "09:30:05 [error] Error: boom");
    }
}
