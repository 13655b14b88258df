//! Tree command handler.

use std::fmt::Write;

use topoview_core::{TreeNode, build_tree};

use crate::cli::{GlobalOpts, TreeArgs};
use crate::config::Session;
use crate::error::CliError;
use crate::output;

/// Copy of `node` with everything deeper than `depth` levels cut off.
fn prune(node: &TreeNode, depth: usize) -> TreeNode {
    let mut out = node.clone();
    out.children = if depth == 0 {
        Vec::new()
    } else {
        node.children.iter().map(|c| prune(c, depth - 1)).collect()
    };
    out
}

fn describe(node: &TreeNode, colored: bool) -> String {
    let mut line = format!(
        "{}  [{}] {}",
        node.label,
        node.node_type,
        output::status(node.status, colored)
    );
    if let Some(role) = node.role {
        let _ = write!(line, " {role}");
    }
    if let Some(ip) = &node.ip {
        let _ = write!(line, " {ip}");
    }
    if let Some(bw) = &node.bandwidth_label {
        let _ = write!(line, " {bw}");
    }
    line
}

/// Box-drawing rendering: `├──`/`└──` connectors with `│` guides for
/// ancestors that still have siblings below.
fn render_guides(root: &TreeNode, colored: bool) -> String {
    fn walk(node: &TreeNode, guides: &mut Vec<bool>, out: &mut String, colored: bool) {
        let count = node.children.len();
        for (i, child) in node.children.iter().enumerate() {
            let last = i + 1 == count;
            for &open in guides.iter() {
                out.push_str(if open { "│   " } else { "    " });
            }
            out.push_str(if last { "└── " } else { "├── " });
            out.push_str(&describe(child, colored));
            out.push('\n');
            guides.push(!last);
            walk(child, guides, out, colored);
            guides.pop();
        }
    }

    let mut out = format!("{}\n", root.label);
    walk(root, &mut Vec::new(), &mut out, colored);
    out.truncate(out.trim_end().len());
    out
}

pub fn handle(session: &Session, args: &TreeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let Some(tree) = build_tree(&session.data, session.view) else {
        if !global.quiet {
            eprintln!("No topology data");
        }
        return Ok(());
    };
    let tree = match args.depth {
        Some(depth) => prune(&tree, depth),
        None => tree,
    };

    let colored = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &tree,
        |t| render_guides(t, colored),
        |t| t.ids().join("\n"),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
