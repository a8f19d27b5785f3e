//! Startup and relaunch argument filtering.

/// Leading argv entries that are not file paths (the executable itself).
const RESERVED_LEADING: usize = 1;

/// Extract file paths from an argument list.
///
/// Skips the reserved leading entry and drops anything that looks like a
/// flag. Applies identically to the process's own startup argv and to the
/// argv relayed by a second instance.
pub fn file_args<I>(argv: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    argv.into_iter()
        .skip(RESERVED_LEADING)
        .filter(|arg| !arg.starts_with("--"))
        .collect()
}
