use colored::Colorize;

use crate::features::focus::{Mode, Technique};
use crate::features::history::SessionRecord;

/// Format a list of records as a pretty table
pub fn format_records_pretty(records: &[SessionRecord], title: &str) -> String {
    if records.is_empty() {
        return format!("{title} (0 sessions)\n  No sessions logged yet");
    }

    let mut output = format!("{} ({} sessions)\n", title, records.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for record in records {
        output.push_str(&record_line(record));
        output.push('\n');
    }

    output
}

fn record_line(record: &SessionRecord) -> String {
    let mut line = format!(
        "{}  {}  {}",
        record.formatted_timestamp().dimmed(),
        mode_tag(record.mode),
        record.display_subject().bold()
    );
    line.push_str(&format!("  {}", energy_meter(record.energy.value())));

    if !record.notes.is_empty() {
        line.push_str(&format!("  {}", record.notes.dimmed()));
    }

    line
}

/// Format a single record as pretty output
pub fn format_record_pretty(record: &SessionRecord) -> String {
    let mut output = format!("{} {}\n", "Logged".green(), record.display_subject().bold());
    output.push_str(&format!("  {}: {}\n", "Date".dimmed(), record.formatted_timestamp()));
    output.push_str(&format!("  {}: {}\n", "Mode".dimmed(), record.mode));
    output.push_str(&format!(
        "  {}: {} ({})\n",
        "Energy".dimmed(),
        record.energy,
        record.energy.describe()
    ));

    if !record.notes.is_empty() {
        output.push_str(&format!("  {}: {}\n", "Notes".dimmed(), record.notes));
    }

    output
}

/// Format the technique rotation, highlighting `current`
pub fn format_techniques_pretty(techniques: &[Technique], current: Technique) -> String {
    let mut output = format!("Techniques ({})\n", techniques.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for technique in techniques {
        let marker = if *technique == current { "▸".cyan() } else { " ".normal() };
        output.push_str(&format!("{} {}\n", marker, technique.display_name().bold()));
        output.push_str(&format!("    {}\n", technique.prompt().dimmed()));
    }

    output
}

fn mode_tag(mode: Mode) -> colored::ColoredString {
    match mode {
        Mode::Focus => "[FOCUS]".red(),
        Mode::Rest => "[REST] ".green(),
    }
}

/// Five-slot meter such as `●●●○○`.
fn energy_meter(level: u8) -> String {
    let filled = usize::from(level.min(5));
    let meter = format!("{}{}", "●".repeat(filled), "○".repeat(5 - filled));
    match level {
        4..=5 => meter.green().to_string(),
        3 => meter.yellow().to_string(),
        _ => meter.red().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::history::NewSession;
    use chrono::NaiveDate;

    fn make_record(subject: &str, energy: i64, mode: Mode, notes: &str) -> SessionRecord {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        SessionRecord::from_input(NewSession::new(subject, energy, mode, notes), ts).unwrap()
    }

    #[test]
    fn test_format_records_empty() {
        let output = format_records_pretty(&[], "Recent");
        assert!(output.contains("Recent (0 sessions)"));
        assert!(output.contains("No sessions logged yet"));
    }

    #[test]
    fn test_format_records_lists_each() {
        let records = vec![
            make_record("Math", 5, Mode::Focus, "ok"),
            make_record("", 2, Mode::Rest, ""),
        ];
        let output = format_records_pretty(&records, "Recent");

        assert!(output.contains("Recent (2 sessions)"));
        assert!(output.contains("Math"));
        assert!(output.contains("General study"));
        assert!(output.contains("2024-03-10 09:30:00"));
        assert!(output.contains("ok"));
    }

    #[test]
    fn test_format_record_pretty() {
        let output = format_record_pretty(&make_record("History", 3, Mode::Focus, "ch. 2"));

        assert!(output.contains("History"));
        assert!(output.contains("FOCUS"));
        assert!(output.contains("Average"));
        assert!(output.contains("ch. 2"));
    }

    #[test]
    fn test_energy_meter_slots() {
        colored::control::set_override(false);
        assert_eq!(energy_meter(3), "●●●○○");
        assert_eq!(energy_meter(5), "●●●●●");
        assert_eq!(energy_meter(1), "●○○○○");
    }

    #[test]
    fn test_format_techniques_pretty() {
        let output = format_techniques_pretty(&Technique::ALL, Technique::Feynman);
        assert!(output.contains("Techniques (5)"));
        assert!(output.contains("Feynman Technique"));
        assert!(output.contains("Elaboration"));
    }
}
