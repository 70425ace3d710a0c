use crate::analyze::SprintAnalyzed;
use crate::model::Result;
use crate::report::html::write_creating_dirs;
use std::path::Path;

pub trait JsonSummary {
    fn summary_create(&self, path: &Path) -> Result<()>;
}

impl JsonSummary for SprintAnalyzed {
    fn summary_create(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_creating_dirs(path, json.as_bytes())?;
        tracing::info!(path = %path.display(), "Summary written");
        Ok(())
    }
}
