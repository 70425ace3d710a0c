use crate::model::Result;
use indicatif::ProgressStyle;

const STEP_TEMPLATE: &str = "{spinner} {prefix:.bold.dim} {wide_msg}";

pub struct ProgressStyleTemplate;

impl ProgressStyleTemplate {
    pub fn step() -> Result<ProgressStyle> {
        Ok(ProgressStyle::with_template(STEP_TEMPLATE)?.tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈✓"))
    }
}
