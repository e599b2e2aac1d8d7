use anyhow::{Context as _, Result};
use clap::Args;
use leadboard_grid::{ExportFormat, ExportScope, GridAction};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::parse_id_list;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// csv or excel
    #[arg(long, default_value = "csv")]
    pub format: String,
    /// Export only these lead ids, e.g. `1,2,3`
    #[arg(long)]
    pub ids: Option<String>,
    /// Directory to write into; defaults to `export_dir`, then the current directory
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn export_leads(ctx: &Context<'_>, args: ExportArgs) -> Result<()> {
    let format =
        ExportFormat::from_str(&args.format).map_err(|err| invalid_input(err.to_string()))?;
    let dir = match args.out.or_else(|| ctx.config.export_dir.clone()) {
        Some(dir) => dir,
        None => env::current_dir().with_context(|| "resolve current directory")?,
    };

    let mut grid = ctx.load_grid()?;
    let scope = match args.ids.as_deref() {
        Some(raw) => {
            let ids = parse_id_list(raw)?;
            if ids.is_empty() {
                return Err(invalid_input("--ids needs at least one lead id"));
            }
            for id in ids {
                if !grid.store().contains(id) {
                    return Err(not_found(format!("lead {id} not found")));
                }
                grid.dispatch(GridAction::ToggleSelect(id));
            }
            ExportScope::Selected
        }
        None => ExportScope::All,
    };
    let count = match scope {
        ExportScope::All => grid.store().len(),
        ExportScope::Selected => grid.state().selection.len(),
    };

    let path = grid
        .save_export(&dir, format, scope)
        .with_context(|| format!("export leads to {}", dir.display()))?;

    if ctx.json {
        print_json(&serde_json::json!({
            "path": path,
            "format": format.extension(),
            "mime": format.mime(),
            "count": count,
        }))?;
    } else {
        println!("exported {} lead(s) to {}", count, path.display());
    }
    Ok(())
}
