//! Live download progress line

use console::Term;
use spout_dist::HumanSize;
use spout_net::DownloadSession;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

const SPINNER: [char; 4] = ['/', '|', '\\', '-'];

/// Render one frame: `[/] [1.2 / 3.4 MiB] Downloading pkg 1.0 (sdist)...`
///
/// The byte count uses the unit of the total.
pub fn progress_line(frame: usize, read: u64, total: u64, label: &str) -> String {
    let total = HumanSize::from_bytes(total);
    let read = HumanSize::in_unit(read, total.unit);
    format!(
        "[{}] [{:.1} / {total}] Downloading {label}...",
        SPINNER[frame % SPINNER.len()],
        read.value
    )
}

/// Spawn the reporter task
///
/// It redraws every `interval` until the session reaches a terminal status,
/// then clears the line. Nothing is drawn when stdout is not a terminal.
pub fn spawn_reporter(
    session: Arc<DownloadSession>,
    label: String,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let term = Term::stdout();
        let draw = term.is_term();
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut frame = 0usize;
        while !session.is_finished() {
            if draw {
                let line =
                    progress_line(frame, session.bytes_transferred(), session.total(), &label);
                let _ = term.write_str(&format!("\r{line}"));
            }
            frame = frame.wrapping_add(1);
            ticker.tick().await;
        }

        if draw {
            let _ = term.clear_line();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_line_shares_total_unit() {
        assert_eq!(
            progress_line(0, 102_400, 500_000, "pkg 1.0 (sdist)"),
            "[/] [100.0 / 488.2 KiB] Downloading pkg 1.0 (sdist)..."
        );
        assert_eq!(
            progress_line(1, 1_049_000, 2_098_000, "pkg 1.0 (bdist_wheel)"),
            "[|] [1.0 / 2.0 MiB] Downloading pkg 1.0 (bdist_wheel)..."
        );
    }

    #[test]
    fn test_spinner_cycles() {
        let frames: Vec<char> = (0..5)
            .map(|i| progress_line(i, 0, 0, "x").chars().nth(1).unwrap())
            .collect();
        assert_eq!(frames, vec!['/', '|', '\\', '-', '/']);
    }
}
