use anyhow::{anyhow, Context as _, Result};
use leadboard_config::AppConfig;
use leadboard_grid::{GridConfig, LeadGrid, LoadState};
use leadboard_source::{load_leads, open_source};
use serde::Serialize;
use std::io::{self, Write};
use tracing::debug;

use crate::util::resolve_source;

pub mod accounts;
pub mod completions;
pub mod export;
pub mod leads;
pub mod tui;

pub struct Context<'a> {
    pub json: bool,
    pub config: &'a AppConfig,
    pub source: Option<String>,
}

impl Context<'_> {
    pub fn source_location(&self) -> Result<String> {
        resolve_source(self.source.as_deref(), self.config.data_source.as_deref())
    }

    pub fn grid_config(&self) -> GridConfig {
        GridConfig {
            page_size: self.config.page_size,
            page_overflow: self.config.page_overflow,
            column_widths: self.config.column_widths.clone(),
        }
    }

    /// Fetches the payload once and hands it to a fresh grid.
    pub fn load_grid(&self) -> Result<LeadGrid> {
        let location = self.source_location()?;
        debug!(location = %location, "loading leads");
        let source = open_source(&location);
        let leads =
            load_leads(source.as_ref()).with_context(|| format!("load leads from {location}"))?;
        let mut grid = LeadGrid::new(&self.grid_config());
        grid.finish_load(Ok::<_, leadboard_source::SourceError>(leads));
        if let LoadState::Failed(message) = grid.load_state() {
            return Err(anyhow!("load leads from {location}: {message}"));
        }
        Ok(grid)
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
