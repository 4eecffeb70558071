//! Live stage board for the watch view, rendered via `indicatif`.
//!
//! One spinner row per pipeline stage plus a header and a status line,
//! multiplexed through a single `MultiProgress` so updates never tear.

use console::style;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::client::ExecutionRecord;
use crate::stage::{Stage, derive_stages};
use crate::status::StatusKind;
use crate::ui::render_execution_header;

pub struct StageBoard {
    multi: MultiProgress,
    header: ProgressBar,
    stage_bars: Vec<(Stage, ProgressBar)>,
}

impl StageBoard {
    pub fn new() -> Self {
        let multi = MultiProgress::new();

        let header_style = ProgressStyle::default_bar()
            .template("{msg}")
            .expect("progress bar template is a valid static string");
        let header = multi.add(ProgressBar::new(0));
        header.set_style(header_style);

        let stage_style = ProgressStyle::default_spinner()
            .template("  {prefix:>10.bold} {spinner} {msg}")
            .expect("progress bar template is a valid static string");

        let stage_bars = Stage::ALL
            .iter()
            .map(|&stage| {
                let bar = multi.add(ProgressBar::new_spinner());
                bar.set_style(stage_style.clone());
                bar.set_prefix(stage.name());
                bar.set_message(format!("{} {}", stage.icon(), style("PENDING").dim()));
                (stage, bar)
            })
            .collect();

        Self {
            multi,
            header,
            stage_bars,
        }
    }

    /// Print a line above the board, falling back to stderr if the rich UI
    /// is unavailable.
    pub fn print_line(&self, msg: impl AsRef<str>) {
        if self.multi.println(msg.as_ref()).is_err() {
            eprintln!("{}", msg.as_ref());
        }
    }

    /// Redraw the board from a freshly fetched record.
    pub fn update(&self, record: &ExecutionRecord) {
        self.header.set_message(render_execution_header(record));
        for ((_, bar), view) in self.stage_bars.iter().zip(derive_stages(record)) {
            let label = view.status.color().apply_to(&view.label).to_string();
            bar.set_message(format!("{} {}", view.stage.icon(), label));
            if view.status == StatusKind::Running {
                bar.enable_steady_tick(Duration::from_millis(120));
            } else {
                bar.disable_steady_tick();
            }
        }
    }

    /// Freeze the board once the execution is terminal.
    pub fn finish(&self, record: &ExecutionRecord) {
        self.update(record);
        for (_, bar) in &self.stage_bars {
            bar.disable_steady_tick();
            let msg = bar.message();
            bar.finish_with_message(msg);
        }
        self.header.finish_with_message(render_execution_header(record));
    }
}

impl Default for StageBoard {
    fn default() -> Self {
        Self::new()
    }
}
