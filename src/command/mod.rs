pub mod find;
pub mod parse;

use anyhow::{Context, Result};

use crate::tfvc::Workspace;

/// Print a parse outcome as JSON or as an aligned summary.
pub fn print_workspace(workspace: Option<&Workspace>, json: bool) -> Result<()> {
    if json {
        let text =
            serde_json::to_string_pretty(&workspace).context("Failed to serialize workspace")?;
        println!("{}", text);
        return Ok(());
    }

    match workspace {
        Some(ws) => print!("{}", format_workspace(ws)),
        None => println!("No workspace reported for this path."),
    }
    Ok(())
}

fn format_workspace(ws: &Workspace) -> String {
    let mut out = String::new();
    let fields = [
        ("Workspace", ws.name.as_deref()),
        ("Collection", ws.server.as_deref()),
        ("Team project", Some(ws.default_team_project.as_str())),
        ("Owner", ws.owner.as_deref()),
        ("Computer", ws.computer.as_deref()),
        ("Comment", ws.comment.as_deref()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            out.push_str(&format!("{:<14}{}\n", format!("{}:", label), value));
        }
    }

    out.push_str("Mappings:\n");
    for mapping in &ws.mappings {
        if mapping.cloaked {
            out.push_str(&format!("  {} (cloaked)\n", mapping.server_path));
        } else {
            out.push_str(&format!("  {} -> {}\n", mapping.server_path, mapping.local_path));
        }
    }
    out
}
