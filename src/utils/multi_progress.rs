use crate::model::Result;
use crate::utils::ProgressStyleTemplate;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

pub trait MultiProgressNew {
    fn add_with_style(&self, pb: ProgressBar, style: ProgressStyle) -> ProgressBar;
    fn add_step(&self, step: usize, total: usize, message: &str) -> Result<ProgressBar>;
}

impl MultiProgressNew for MultiProgress {
    fn add_with_style(&self, pb: ProgressBar, style: ProgressStyle) -> ProgressBar {
        let pb = self.add(pb);
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    fn add_step(&self, step: usize, total: usize, message: &str) -> Result<ProgressBar> {
        let pb = self.add_with_style(ProgressBar::new_spinner(), ProgressStyleTemplate::step()?);
        pb.set_prefix(format!("[{}/{}]", step, total));
        pb.set_message(message.to_string());
        Ok(pb)
    }
}
