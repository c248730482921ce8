//! Transfer progress bars.

use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str =
    "{spinner:.green} {msg} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({percent}%) {bytes_per_sec} ETA: {eta}";

/// Creates a byte progress bar for a transfer of `total_size` bytes.
pub fn create_progress_bar(total_size: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(total_size);
    let style = ProgressStyle::default_bar()
        .template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(label.to_string());
    pb
}

/// Bar for a response body, only when the size is declared and non-zero.
/// Unsized bodies stream without a bar.
pub fn transfer_bar(content_length: Option<u64>, label: &str, enabled: bool) -> Option<ProgressBar> {
    match content_length {
        Some(total) if enabled && total > 0 => Some(create_progress_bar(total, label)),
        _ => None,
    }
}
