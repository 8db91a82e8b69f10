use chrono::Utc;
use clap::Subcommand;
use purepath_core::content::shield::{builtin_guides, find_guide, ShieldGuide};
use purepath_core::{Database, Event, StatsStore};
use serde::Serialize;

use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum ShieldAction {
    /// List lockdown guides and whether each is configured
    List,
    /// Show the steps of one guide
    Show {
        /// Guide id (android, ios, mac, windows)
        id: String,
    },
    /// Mark a guide as configured on this device
    Done {
        id: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GuideStatus<'a> {
    #[serde(flatten)]
    guide: &'a ShieldGuide,
    configured: bool,
}

fn lookup(id: &str) -> Result<ShieldGuide, Box<dyn std::error::Error>> {
    find_guide(id).ok_or_else(|| format!("no shield guide named '{id}'").into())
}

pub fn run(action: ShieldAction) -> CmdResult {
    let db = Database::open()?;
    let store = StatsStore::new(&db);

    match action {
        ShieldAction::List => {
            let configured = store.configured_guides()?;
            let guides = builtin_guides();
            let statuses: Vec<_> = guides
                .iter()
                .map(|guide| GuideStatus {
                    guide,
                    configured: configured.contains(&guide.id),
                })
                .collect();
            print_json(&statuses)?;
        }
        ShieldAction::Show { id } => {
            let guide = lookup(&id)?;
            println!("{} ({} difficulty)", guide.platform, guide.difficulty);
            if let Some(warning) = &guide.warning {
                println!("Warning: {warning}");
            }
            for (i, step) in guide.steps.iter().enumerate() {
                println!();
                println!("{}. {}", i + 1, step.title);
                println!("   {}", step.description);
            }
        }
        ShieldAction::Done { id } => {
            let guide = lookup(&id)?;
            if !store.mark_guide_configured(&guide.id)? {
                eprintln!("{} was already marked as configured", guide.platform);
            }
            print_json(&Event::ShieldGuideConfigured {
                guide_id: guide.id,
                at: Utc::now(),
            })?;
        }
    }
    Ok(())
}
