//! Statistics reporting.

use console::style;

use crate::download::BatchState;

/// One-line summary of a batch, for stderr.
pub fn batch_summary(label: &str, state: &BatchState) -> String {
    let mut line = format!(
        "{}: {}/{} downloaded",
        label,
        style(state.downloaded).green().for_stderr(),
        state.total
    );
    if state.failed > 0 {
        line.push_str(&format!(
            ", {} failed",
            style(state.failed).red().for_stderr()
        ));
    }
    line
}

/// Print batch statistics unless quiet.
pub fn print_batch_stats(label: &str, state: &BatchState, quiet: bool) {
    if quiet || state.total == 0 {
        return;
    }
    eprintln!("{}", batch_summary(label, state));
}
