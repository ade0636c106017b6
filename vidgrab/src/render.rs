use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc::UnboundedReceiver;
use vidgrab_engine::{format_bytes, Format, FormatKind, ProgressSnapshot};

/// Prints the resolved renditions, video section first, with their index in
/// the full listing so `--format`/`--video`/`--audio` can refer to them.
pub fn format_listing(title: &str, formats: &[Format]) {
    println!("{title}");
    for kind in [FormatKind::Video, FormatKind::Audio] {
        println!("\n{kind} formats:");
        for (index, format) in formats.iter().enumerate() {
            if format.kind() != kind {
                continue;
            }
            let codec = format.codec.as_deref().unwrap_or("-");
            let size = format
                .size_hint()
                .map_or_else(|| "unknown size".to_string(), format_bytes);
            let detail = match kind {
                FormatKind::Video => format
                    .resolution
                    .clone()
                    .unwrap_or_else(|| "-".to_string()),
                FormatKind::Audio => {
                    let bitrate = format
                        .bitrate
                        .map_or_else(|| "-".to_string(), |b| format!("{b:.0} kbps"));
                    let sample_rate = format
                        .sample_rate
                        .map_or_else(|| "-".to_string(), |sr| format!("{sr:.0} Hz"));
                    format!("{bitrate} {sample_rate}")
                }
            };
            println!(
                "  [{index:>2}] {:<34} {codec:<14} .{:<5} {detail:<18} {size}",
                format.descriptor, format.extension
            );
        }
    }
}

/// Drives a progress bar from the engine's snapshot channel until the
/// channel closes. Unknown totals get a spinner instead of a bar.
pub async fn progress_bar(mut rx: UnboundedReceiver<ProgressSnapshot>) {
    let mut bar: Option<ProgressBar> = None;
    while let Some(snapshot) = rx.recv().await {
        let bar = bar.get_or_insert_with(|| new_bar(snapshot.total_bytes));
        bar.set_position(snapshot.bytes_received);
        bar.set_message(snapshot.report().status_text);
    }
    if let Some(bar) = bar {
        bar.finish();
    }
}

fn new_bar(total_bytes: Option<u64>) -> ProgressBar {
    let (bar, template) = match total_bytes {
        Some(total) => (
            ProgressBar::new(total),
            "{bar:40.cyan/blue} {percent:>3}% {wide_msg}",
        ),
        None => {
            let spinner = ProgressBar::new_spinner();
            spinner.enable_steady_tick(Duration::from_millis(100));
            (spinner, "{spinner:.cyan} {wide_msg}")
        }
    };
    if let Ok(style) = ProgressStyle::with_template(template) {
        bar.set_style(style);
    }
    bar
}
