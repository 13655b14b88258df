//! Device onboarding command handlers.

use tracing::info;

use topoview_core::{
    ConnectionParams, DeviceApi, InventoryDeviceApi, NewDevice, Protocol, save_topology,
};

use crate::cli::{DeviceArgs, DeviceCommand, GlobalOpts};
use crate::config::{Session, TopologySource};
use crate::error::CliError;
use crate::output;

fn detail_test(r: &topoview_core::ConnectionTestResult) -> String {
    [
        format!("Host:      {}", r.host),
        format!("Protocol:  {}", r.protocol),
        format!("Port:      {}", r.port),
        format!("Result:    {}", if r.success { "ok" } else { "failed" }),
        format!("Message:   {}", r.message),
    ]
    .join("\n")
}

pub async fn handle(
    session: Session,
    args: DeviceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let api = InventoryDeviceApi::new(session.data);

    match args.command {
        DeviceCommand::Test {
            host,
            protocol,
            port,
            username,
            community,
        } => {
            let mut params = ConnectionParams::new(host, Protocol::from(protocol));
            params.port = port;
            params.username = username;
            params.community = community;

            let result = api.test_connection(&params).await?;
            let out = output::render_single(&global.output, &result, detail_test, |r| {
                format!("{}:{}", r.host, r.port)
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DeviceCommand::Add {
            id,
            label,
            node_type,
            ip,
            role,
            vlan,
            layer,
            write,
        } => {
            let device = NewDevice {
                label: label.unwrap_or_else(|| id.clone()),
                id,
                node_type: node_type.into(),
                ip,
                role: role.map(Into::into),
                vlan,
                layer,
            };
            let id = device.id.clone();
            api.add_device(device).await?;
            let inventory = api.snapshot().await;

            if write {
                let TopologySource::File(path) = &session.source else {
                    return Err(CliError::Validation {
                        field: "--write".into(),
                        reason: "the demo topology has no file to write to".into(),
                    });
                };
                save_topology(path, &inventory)?;
                info!(path = %path.display(), %id, "inventory written");
            }

            let Some(node) = inventory.node(&id) else {
                return Err(CliError::NotFound {
                    resource_type: "node".into(),
                    identifier: id,
                    list_command: "attrs nodes".into(),
                });
            };
            let out = output::render_single(
                &global.output,
                node,
                |n| {
                    format!(
                        "Added {} ({}, {}) to {}{}",
                        n.id,
                        n.node_type,
                        n.status,
                        session.source,
                        if write { "" } else { " (not saved, pass --write)" }
                    )
                },
                |n| n.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
