use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use leadboard_core::time::now_utc;
use leadboard_core::{InteractionDraft, LeadDraft, LeadId, LeadPatch};
use leadboard_grid::{ExportFormat, ExportScope, LoadState};
use leadboard_source::{load_leads, open_source};
use tracing::debug;

use crate::app::App;

/// Where the grid reads from and writes exports to.
#[derive(Debug, Clone)]
pub struct Session {
    pub location: String,
    pub export_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub enum Action {
    Load,
    Create(LeadDraft, InteractionDraft),
    Update(LeadId, LeadPatch, InteractionDraft),
    Delete(BTreeSet<LeadId>),
    DeleteSelected,
    ResetSelected,
    Export(ExportFormat, ExportScope),
}

pub fn execute_action(app: &mut App, session: &Session, action: Action) -> Result<()> {
    match action {
        Action::Load => {
            debug!(location = %session.location, "loading leads");
            let source = open_source(&session.location);
            app.grid.finish_load(load_leads(source.as_ref()));
            match app.grid.load_state().clone() {
                LoadState::Failed(message) => app.set_error(message),
                _ => {
                    let count = app.grid.store().len();
                    app.set_status(format!("Loaded {count} lead(s)"));
                    app.clear_error();
                }
            }
        }
        Action::Create(draft, interaction) => {
            let now = now_utc();
            let lead = app.grid.create(now, draft)?;
            app.grid.add_interaction(now, lead.id, interaction);
            app.set_status(format!("Created {}", lead.name));
            app.clear_error();
        }
        Action::Update(id, patch, interaction) => {
            let now = now_utc();
            match app.grid.update(now, id, patch)? {
                Some(lead) => {
                    let added = app.grid.add_interaction(now, id, interaction).is_some();
                    let suffix = if added { " (interaction added)" } else { "" };
                    app.set_status(format!("Updated {}{}", lead.name, suffix));
                    app.clear_error();
                }
                None => app.set_error(format!("lead {id} no longer exists")),
            }
        }
        Action::Delete(ids) => {
            let removed = app.grid.delete(&ids);
            app.set_status(format!("Deleted {removed} lead(s)"));
        }
        Action::DeleteSelected => {
            let removed = app.grid.delete_selected();
            app.set_status(format!("Deleted {removed} lead(s)"));
        }
        Action::ResetSelected => {
            let touched = app.grid.reset_selected(now_utc());
            app.set_status(format!("Reset {touched} lead score(s)"));
        }
        Action::Export(format, scope) => {
            let path = app.grid.save_export(&session.export_dir, format, scope)?;
            app.set_status(format!("Exported to {}", path.display()));
            app.clear_error();
        }
    }
    app.clamp_cursor();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{execute_action, Action, Session};
    use crate::app::App;
    use leadboard_core::{ContactInfo, InteractionDraft, LeadDraft, LeadId, LeadStatus};
    use leadboard_grid::{ExportFormat, ExportScope, GridAction, GridConfig, LoadState};
    use std::fs;
    use tempfile::TempDir;

    fn session(temp: &TempDir, payload: &str) -> Session {
        let location = temp.path().join("leads.json");
        fs::write(&location, payload).unwrap();
        Session {
            location: location.to_string_lossy().into_owned(),
            export_dir: temp.path().to_path_buf(),
        }
    }

    fn loaded(session: &Session) -> App {
        let mut app = App::new(&GridConfig::default());
        while let Some(action) = app.next_action() {
            execute_action(&mut app, session, action).unwrap();
        }
        app
    }

    const PAYLOAD: &str = r#"[
        {"id": 1, "name": "Ada", "company": "Acme", "status": "Hot", "leadScore": 50},
        {"id": 2, "name": "Brook", "company": "Globex", "status": "Cold", "leadScore": 20}
    ]"#;

    #[test]
    fn initial_load_fills_the_grid() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp, PAYLOAD);
        let app = loaded(&session);
        assert!(app.grid.is_ready());
        assert_eq!(app.grid.store().len(), 2);
        assert_eq!(app.status.as_deref(), Some("Loaded 2 lead(s)"));
    }

    #[test]
    fn failed_load_surfaces_the_message() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp, "{not json");
        let app = loaded(&session);
        assert!(matches!(app.grid.load_state(), LoadState::Failed(_)));
        assert!(app.error.as_deref().unwrap_or_default().contains("malformed"));
    }

    #[test]
    fn create_with_interaction() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp, PAYLOAD);
        let mut app = loaded(&session);
        let draft = LeadDraft {
            name: "Cyd".to_string(),
            company: "Initech".to_string(),
            contact_info: ContactInfo {
                email: "cyd@initech.test".to_string(),
                phone: "555".to_string(),
            },
            status: LeadStatus::Warm,
            ..Default::default()
        };
        let interaction = InteractionDraft {
            kind: "Call".to_string(),
            notes: "Intro".to_string(),
            ..Default::default()
        };
        execute_action(&mut app, &session, Action::Create(draft, interaction)).unwrap();
        let created = app.grid.store().get(LeadId(3)).unwrap();
        assert_eq!(created.interactions.len(), 1);
        assert_eq!(app.status.as_deref(), Some("Created Cyd"));
    }

    #[test]
    fn export_selected_writes_into_export_dir() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp, PAYLOAD);
        let mut app = loaded(&session);
        app.grid.dispatch(GridAction::ToggleSelect(LeadId(2)));
        execute_action(
            &mut app,
            &session,
            Action::Export(ExportFormat::Csv, ExportScope::Selected),
        )
        .unwrap();
        let written = fs::read_to_string(temp.path().join("selected_leads_export.csv")).unwrap();
        assert!(written.contains("\"Brook\""));
        assert!(!written.contains("\"Ada\""));
        assert!(app.grid.state().selection.is_empty());
    }

    #[test]
    fn delete_selected_prunes() {
        let temp = TempDir::new().unwrap();
        let session = session(&temp, PAYLOAD);
        let mut app = loaded(&session);
        app.grid.dispatch(GridAction::ToggleSelect(LeadId(1)));
        execute_action(&mut app, &session, Action::DeleteSelected).unwrap();
        assert_eq!(app.grid.store().len(), 1);
        assert_eq!(app.status.as_deref(), Some("Deleted 1 lead(s)"));
    }
}
