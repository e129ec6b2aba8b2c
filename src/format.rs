/// Format elapsed milliseconds as `MM:SS.CC`
///
/// Minutes do not wrap at an hour and grow past two digits as needed. Hundredths are truncated,
/// not rounded.
pub fn format_elapsed(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms / 1000) % 60;
    let hundredths = (ms % 1000) / 10;
    format!("{:02}:{:02}.{:02}", minutes, seconds, hundredths)
}
