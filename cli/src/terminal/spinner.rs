//! Busy indicator for the configuring stage.
//!
//! At most one spinner is active at a time. Log output goes through
//! [`SpinnerWriter`], which prints above the spinner while it is running and
//! falls back to stderr otherwise.

use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

static ACTIVE: Mutex<Option<ProgressBar>> = Mutex::new(None);

pub fn start(message: String) {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap()
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);

    pb.set_style(style);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));

    *ACTIVE.lock().unwrap() = Some(pb);
}

pub fn stop() {
    if let Some(pb) = ACTIVE.lock().unwrap().take() {
        pb.finish_and_clear();
    }
}

pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let msg = String::from_utf8_lossy(buf);
        let msg = msg.trim_end();

        match ACTIVE.lock().unwrap().as_ref() {
            Some(pb) => pb.println(msg),
            // Raw mode needs the explicit carriage return.
            None => eprint!("{msg}\r\n"),
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
