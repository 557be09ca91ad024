pub mod export;
pub mod formatter;

pub use export::{save_export, BoardExport, ExportProblem, ExportRow};
pub use formatter::{
    format_board, format_penalty, format_remaining, format_summary_table, format_tsv,
    format_upsolve_deadline, should_use_colors, NamedRow,
};
