use std::io::Write;
use std::time::Duration;

use crate::fleet::InstanceStatus;

/// Elapsed wall-clock time as `{h}h {m}m {s:.2}s`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs_f64();
    let hours = (total / 3600.0) as u64;
    let minutes = ((total / 60.0) as u64) % 60;
    let seconds = total % 60.0;
    format!("{hours}h {minutes}m {seconds:.2}s")
}

/// Header row of instance indices. The first cell is 6 wide; every later
/// cell is 9 wide, absorbing the three-space gutter, so the columns line up
/// with the status row below.
pub fn header_row(instances: usize) -> String {
    let mut row = String::new();
    for index in 0..instances {
        if index == 0 {
            row.push_str(&format!("{index:>6}"));
        } else {
            row.push_str(&format!("{index:>9}"));
        }
    }
    row
}

/// Status row of per-instance booleans: `true` when the instance shows
/// fault evidence (or cannot be reached), `false` when clean. Each value is
/// left-justified into a 6-wide field, then right-aligned into its 9-wide
/// cell.
pub fn status_row(statuses: &[InstanceStatus]) -> String {
    let mut row = String::new();
    for status in statuses {
        row.push_str(&format!("{:>9}", format!("{:<6}", status.shows_fault())));
    }
    row.trim_end().to_string()
}

/// Print one cycle's snapshot: separator, elapsed time, index header, and
/// boolean status row, followed by a note for each unreachable instance so
/// the conservative faulted reading is visible to the operator.
pub fn print_cycle(
    out: &mut dyn Write,
    elapsed: Duration,
    names: &[String],
    statuses: &[InstanceStatus],
) -> std::io::Result<()> {
    writeln!(out, "\n\n\n\nDuration / Found bugs:")?;
    writeln!(out, "           {}", format_elapsed(elapsed))?;
    writeln!(out, "{}", header_row(statuses.len()))?;
    writeln!(out, "{}", status_row(statuses))?;
    for (name, status) in names.iter().zip(statuses) {
        if *status == InstanceStatus::Unreachable {
            writeln!(out, "note: {name} is unreachable; counted as faulted")?;
        }
    }
    Ok(())
}
