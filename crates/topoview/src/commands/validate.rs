//! Integrity check command handler.

use tabled::Tabled;

use topoview_core::{DisplayGraph, IntegrityIssue};

use crate::cli::GlobalOpts;
use crate::config::Session;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "Element")]
    subject: String,
    #[tabled(rename = "Problem")]
    detail: String,
}

impl From<&IntegrityIssue> for IssueRow {
    fn from(issue: &IntegrityIssue) -> Self {
        let kind = match issue {
            IntegrityIssue::DuplicateNodeId { .. } => "duplicate node",
            IntegrityIssue::DanglingLink { .. } => "dangling link",
            IntegrityIssue::SelfLoop { .. } => "self loop",
            IntegrityIssue::UtilizationOutOfRange { .. } => "utilization",
        };
        Self {
            kind,
            subject: issue.subject().to_owned(),
            detail: issue.to_string(),
        }
    }
}

pub fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let issues = session.data.integrity_report();

    if issues.is_empty() {
        if !global.quiet {
            let graph = DisplayGraph::from_topology(&session.data);
            eprintln!(
                "{}: {} nodes, {} links, no issues",
                session.source,
                graph.len(),
                graph.edges().len()
            );
        }
        return Ok(());
    }

    let out = output::render_list(&global.output, &issues, |i| IssueRow::from(i), |i| {
        i.subject().to_owned()
    });
    output::print_output(&out, global.quiet);
    Err(CliError::IntegrityIssues {
        count: issues.len(),
    })
}
