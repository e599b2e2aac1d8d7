use anyhow::Result;
use clap::Args;
use leadboard_core::time::format_display;
use leadboard_core::{ColumnKey, LeadDetailDto, LeadPageDto, LeadSummaryDto};
use leadboard_grid::{cell_text, DynamicTable, GridAction, RowDetail, SortDirection};
use leadboard_source::{load_dynamic, open_source};
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::debug;

use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{parse_column_filter, parse_lead_id};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Matches name or company, case-insensitively
    #[arg(long)]
    pub search: Option<String>,
    /// Per-column filter, `column=query`; repeatable
    #[arg(long = "filter", value_name = "COLUMN=QUERY")]
    pub filters: Vec<String>,
    #[arg(long)]
    pub sort: Option<String>,
    #[arg(long, requires = "sort")]
    pub desc: bool,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    /// Show the payload as a schemaless table
    #[arg(long, conflicts_with_all = ["filters"])]
    pub dynamic: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: String,
}

pub fn list_leads(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    if args.page == 0 {
        return Err(invalid_input("page must be at least 1"));
    }
    if args.dynamic {
        return list_dynamic(ctx, args);
    }

    let mut grid = ctx.load_grid()?;
    if let Some(search) = args.search {
        grid.dispatch(GridAction::SetGlobalSearch(search));
    }
    for raw in &args.filters {
        let (key, query) = parse_column_filter(raw)?;
        grid.dispatch(GridAction::SetColumnFilter(key, query));
    }
    if let Some(raw) = args.sort.as_deref() {
        let key = ColumnKey::from_str(raw)?;
        if !key.is_data() {
            return Err(invalid_input(format!("column {key} is not sortable")));
        }
        grid.dispatch(GridAction::SortBy(key));
        if args.desc {
            grid.dispatch(GridAction::SortBy(key));
        }
    }
    grid.dispatch(GridAction::SetPage(args.page));

    let view = grid.view();
    debug!(
        matches = view.total_matches,
        page = view.page,
        total_pages = view.total_pages,
        "leads view"
    );

    if ctx.json {
        let dto = LeadPageDto {
            page: view.page,
            total_pages: view.total_pages,
            total_matches: view.total_matches,
            leads: view.rows.iter().map(|lead| LeadSummaryDto::from(*lead)).collect(),
        };
        return print_json(&dto);
    }

    if view.is_empty() {
        println!("no records");
        return Ok(());
    }

    for lead in &view.rows {
        let assigned = if lead.assigned_to.is_empty() {
            String::new()
        } else {
            format!("  @{}", lead.assigned_to)
        };
        println!(
            "{}  {}  ({})  [{}]  {}{}",
            lead.id, lead.name, lead.company, lead.status, lead.lead_score, assigned
        );
    }
    println!(
        "{}  (page {}/{})",
        view.range_text(),
        view.page,
        view.total_pages.max(1)
    );
    Ok(())
}

fn list_dynamic(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    let location = ctx.source_location()?;
    let source = open_source(&location);
    let records = load_dynamic(source.as_ref())?;
    let mut table = DynamicTable::new(records).with_page_size(ctx.config.page_size);
    if let Some(search) = args.search.as_deref() {
        table.set_search(search);
    }
    if let Some(key) = args.sort.as_deref() {
        let direction = if args.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        table.sort_by(key, direction);
    }
    table.set_page(args.page);
    let rows = table.page_rows();

    if ctx.json {
        let rows: Vec<Value> = rows
            .iter()
            .map(|(_, record)| {
                let cells: Map<String, Value> = table
                    .columns()
                    .iter()
                    .map(|key| (key.clone(), Value::String(cell_text(record, key))))
                    .collect();
                Value::Object(cells)
            })
            .collect();
        return print_json(&serde_json::json!({
            "page": table.page(),
            "total_pages": table.total_pages(),
            "columns": table.columns(),
            "rows": rows,
        }));
    }

    if rows.is_empty() {
        println!("no records");
        return Ok(());
    }

    println!("{}", table.columns().join(" | "));
    for (_, record) in &rows {
        let cells: Vec<String> = table
            .columns()
            .iter()
            .map(|key| cell_text(record, key))
            .collect();
        println!("{}", cells.join(" | "));
    }
    println!("page {}/{}", table.page(), table.total_pages().max(1));
    Ok(())
}

pub fn show_lead(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let id = parse_lead_id(&args.id)?;
    let grid = ctx.load_grid()?;
    let lead = grid
        .store()
        .get(id)
        .ok_or_else(|| not_found(format!("lead {id} not found")))?;

    if ctx.json {
        return print_json(&LeadDetailDto::from(lead));
    }

    println!("id: {}", lead.id);
    println!("name: {}", lead.name);
    println!("company: {}", lead.company);
    println!("status: {}", lead.status);
    println!("lead score: {}", lead.lead_score);
    if !lead.assigned_to.is_empty() {
        println!("assigned to: {}", lead.assigned_to);
    }
    if !lead.industry.is_empty() {
        println!("industry: {}", lead.industry);
    }
    if !lead.location.is_empty() {
        println!("location: {}", lead.location);
    }
    println!("created: {}", format_display(&lead.created_at));
    println!("updated: {}", format_display(&lead.updated_at));
    for line in RowDetail::for_lead(lead).lines() {
        println!("{line}");
    }
    Ok(())
}
