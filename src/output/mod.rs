pub mod formatter;

pub use formatter::{
    format_breakdown, format_quick_tasks, format_score, format_scored_table, format_summary,
    format_tsv, should_use_colors,
};
