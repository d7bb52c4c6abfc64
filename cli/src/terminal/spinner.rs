use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Progress spinner on stderr. Hidden in verbose mode, where every port is
/// printed anyway.
#[derive(Clone)]
pub struct ScanProgress {
    bar: ProgressBar,
}

impl ScanProgress {
    pub fn new(total_ports: u64, hidden: bool) -> anyhow::Result<Self> {
        if hidden {
            return Ok(Self {
                bar: ProgressBar::hidden(),
            });
        }

        let bar = ProgressBar::new(total_ports);
        let style = ProgressStyle::with_template("{spinner:.blue} probed {pos}/{len} ports")?
            .tick_strings(TICK_STRINGS);

        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));
        Ok(Self { bar })
    }

    pub fn inc(&self) {
        self.bar.inc(1);
    }

    /// Runs `f` with the spinner cleared so stdout lines are not torn.
    pub fn suspend<F: FnOnce()>(&self, f: F) {
        self.bar.suspend(f);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
