use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::scoring::RankedTask;
use crate::tasks::{Task, TaskSummary};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with one decimal place ("87.5", "0.0")
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate title to fit available width, accounting for Unicode
fn truncate_title(title: &str, max_width: usize) -> String {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= max_width {
        title.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// "Customer (A)", "Customer", "(A)" or "" depending on what is known
fn customer_label(task: &Task) -> String {
    let name = task.customer_name.as_deref().map(str::trim).unwrap_or("");
    let tier = task.customer_tier.as_deref().map(str::trim).unwrap_or("");
    match (name.is_empty(), tier.is_empty()) {
        (false, false) => format!("{} ({})", name, tier.to_uppercase()),
        (false, true) => name.to_string(),
        (true, false) => format!("({})", tier.to_uppercase()),
        (true, true) => String::new(),
    }
}

/// Format ranked tasks as a table with columns: Index, Score, Title, Customer
/// No headers. Index column is 3 chars ("99."), score column 5 chars ("100.0").
/// Waiting tasks get a trailing "waiting" marker.
pub fn format_scored_table(tasks: &[RankedTask], use_colors: bool) -> String {
    if tasks.is_empty() {
        return "No prioritized tasks.".to_string();
    }

    let term_width = get_terminal_width();

    let index_width = 3;
    let score_width = 5;
    let separator = "  ";

    tasks
        .iter()
        .enumerate()
        .map(|(idx, ranked)| {
            // 1-based index, right-aligned with trailing dot
            let index_str = format!("{:>2}.", idx + 1);
            let score_padded = format!(
                "{:>width$}",
                format_score(ranked.result.score),
                width = score_width
            );
            let customer = customer_label(ranked.task);
            let marker = if ranked.result.waiting { " waiting" } else { "" };

            let fixed_width = index_width
                + 1
                + score_width
                + separator.len() * 2
                + customer.chars().count()
                + marker.len();
            let full_title = ranked.task.display_title();

            let title = if let Some(width) = term_width {
                if width > fixed_width + 10 {
                    truncate_title(&full_title, width - fixed_width)
                } else {
                    // Very narrow terminal, show truncated
                    truncate_title(&full_title, 20)
                }
            } else {
                // No terminal (pipe), don't truncate
                full_title
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    title,
                    separator,
                    customer.cyan(),
                    marker.yellow()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}",
                    index_str, score_padded, separator, title, separator, customer, marker
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ranked tasks as tab-separated values for scripting
/// Columns: score, id, title, customer, tier, status (no headers, no colors)
/// Quick tasks follow the ranked rows with `quick` in the score column.
pub fn format_tsv(tasks: &[RankedTask], quick: &[Task]) -> String {
    let ranked_rows = tasks
        .iter()
        .map(|ranked| tsv_row(&format_score(ranked.result.score), ranked.task));
    let quick_rows = quick.iter().map(|task| tsv_row("quick", task));

    ranked_rows.chain(quick_rows).collect::<Vec<_>>().join("\n")
}

fn tsv_row(score: &str, task: &Task) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        score,
        task.id.map(|id| id.to_string()).unwrap_or_default(),
        task.display_title(),
        task.customer_name.as_deref().unwrap_or(""),
        task.customer_tier.as_deref().unwrap_or(""),
        task.status.as_deref().unwrap_or("")
    )
}

/// Format the quick-task section of the list view: a header with the count,
/// then one line per task. Empty when there are no quick tasks.
pub fn format_quick_tasks(tasks: &[Task], use_colors: bool) -> String {
    if tasks.is_empty() {
        return String::new();
    }

    let header = format!("Quick tasks ({}):", tasks.len());
    let mut lines = vec![if use_colors {
        header.bold().to_string()
    } else {
        header
    }];

    for task in tasks {
        let customer = customer_label(task);
        let customer = if customer.is_empty() {
            customer
        } else {
            format!("  {}", customer)
        };
        let due = task
            .due_at()
            .map(|at| format!("  due {}", at.format("%Y-%m-%d")))
            .unwrap_or_default();

        if use_colors {
            lines.push(format!(
                "  - {}{}{}",
                task.display_title(),
                customer.cyan(),
                due.dimmed()
            ));
        } else {
            lines.push(format!("  - {}{}{}", task.display_title(), customer, due));
        }
    }

    lines.join("\n")
}

/// Format the per-factor breakdown of a single ranked task (for `explain`)
pub fn format_breakdown(ranked: &RankedTask, use_colors: bool) -> String {
    let result = &ranked.result;
    let mut lines = Vec::new();

    let title = ranked.task.display_title();
    let score = format_score(result.score);
    if use_colors {
        lines.push(format!("{}  {}", title.bold(), score.bold()));
    } else {
        lines.push(format!("{}  {}", title, score));
    }

    let customer = customer_label(ranked.task);
    if !customer.is_empty() {
        lines.push(format!("  Customer: {}", customer));
    }
    if let Some(status) = ranked.task.status.as_deref() {
        lines.push(format!("  Status: {}", status));
    }

    for contribution in &result.breakdown.factors {
        lines.push(format!(
            "  {:<15}{:>5} / {:<5}  {}",
            format!("{}:", contribution.factor.label()),
            format_score(contribution.points),
            format_score(contribution.max_points),
            contribution.description
        ));
    }

    lines.push(format!(
        "  {:<15}{:>5}",
        "Total:",
        format_score(result.breakdown.raw_total)
    ));

    if result.waiting {
        let note = "  Waiting on a future follow-up: score pinned to the minimum";
        if use_colors {
            lines.push(note.yellow().to_string());
        } else {
            lines.push(note.to_string());
        }
    }

    lines.join("\n")
}

/// Format the dashboard task summary
pub fn format_summary(summary: &TaskSummary, use_colors: bool) -> String {
    let rows = [
        ("Open tasks", summary.total_open_tasks.to_string()),
        ("Quick tasks", summary.total_quick_tasks.to_string()),
        ("Due today", summary.tasks_due_today.to_string()),
        ("Average score", format_score(summary.avg_score)),
    ];

    rows.iter()
        .map(|(label, value)| {
            let label = format!("{:<16}", format!("{}:", label));
            if use_colors {
                format!("{}{}", label.dimmed(), value.bold())
            } else {
                format!("{}{}", label, value)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
