// ── Demo fabric ──
//
// A small spine/leaf data center used by `--demo` and by tests across the
// workspace: two spines, three leaves, two access switches, hosts on
// VLANs 100/101/200/300, a firewall, a controller and a VTEP reached over
// a VXLAN overlay link.

use crate::model::{
    LinkStatus, LinkType, NetworkLink, NetworkNode, NodeRole, NodeStatus, NodeType, TopologyData,
};

fn switch(id: &str, label: &str, role: NodeRole, layer: u8, ip: &str) -> NetworkNode {
    let mut node = NetworkNode::new(id, label, NodeType::Switch)
        .with_role(role)
        .with_layer(layer)
        .with_ip(ip);
    node.bandwidth = Some(if layer == 1 { 40_000 } else { 10_000 });
    node
}

fn host(id: &str, label: &str, vlan: u16, ip: &str) -> NetworkNode {
    let mut node = NetworkNode::new(id, label, NodeType::Host)
        .with_layer(4)
        .with_vlan(vlan)
        .with_ip(ip);
    node.bandwidth = Some(1_000);
    node
}

fn link(source: &str, target: &str, bandwidth: u64) -> NetworkLink {
    NetworkLink::new(format!("{source}--{target}"), source, target, bandwidth)
}

pub fn demo_topology() -> TopologyData {
    let mut controller = NetworkNode::new("ctrl-1", "SDN Controller", NodeType::Controller)
        .with_layer(1)
        .with_ip("10.0.0.2");
    controller.cpu = Some(23.5);
    controller.memory = Some(61.0);

    let firewall = NetworkNode::new("fw-1", "Edge Firewall", NodeType::Firewall)
        .with_role(NodeRole::Edge)
        .with_layer(1)
        .with_ip("10.0.0.1");

    let mut router = NetworkNode::new("rtr-1", "Border Router", NodeType::Router)
        .with_role(NodeRole::Core)
        .with_layer(2)
        .with_ip("10.0.0.3");
    router.mac = Some("00:1b:54:c2:10:01".into());

    let mut vtep = NetworkNode::new("vtep-1", "VTEP DC2", NodeType::Vtep)
        .with_layer(3)
        .with_ip("10.0.5.1");
    vtep.vxlan_vni = Some(10_100);
    vtep.vtep_ip = Some("192.168.50.1".into());

    let nodes = vec![
        switch("spine-1", "Spine 1", NodeRole::Spine, 1, "10.0.1.1"),
        switch("spine-2", "Spine 2", NodeRole::Spine, 1, "10.0.1.2"),
        controller,
        firewall,
        switch("leaf-1", "Leaf 1", NodeRole::Leaf, 2, "10.0.2.1"),
        switch("leaf-2", "Leaf 2", NodeRole::Leaf, 2, "10.0.2.2"),
        switch("leaf-3", "Leaf 3", NodeRole::Leaf, 2, "10.0.2.3").with_status(NodeStatus::Warning),
        router,
        vtep,
        switch("access-1", "Access 1", NodeRole::Access, 3, "10.0.3.1"),
        switch("access-2", "Access 2", NodeRole::Access, 3, "10.0.3.2"),
        host("web-01", "web-01", 100, "172.16.100.10"),
        host("web-02", "web-02", 100, "172.16.100.11"),
        host("api-01", "api-01", 101, "172.16.101.10"),
        host("db-01", "db-01", 200, "172.16.200.10").with_status(NodeStatus::Error),
        host("mon-01", "mon-01", 300, "172.16.30.10").with_status(NodeStatus::Inactive),
    ];

    let links = vec![
        link("spine-1", "leaf-1", 40_000),
        link("spine-1", "leaf-2", 40_000),
        link("spine-1", "leaf-3", 40_000),
        link("spine-2", "leaf-1", 40_000),
        link("spine-2", "leaf-2", 40_000),
        link("spine-2", "leaf-3", 40_000).with_status(LinkStatus::Down),
        link("fw-1", "rtr-1", 10_000),
        link("ctrl-1", "leaf-1", 1_000).with_type(LinkType::Optical),
        link("leaf-1", "access-1", 10_000).with_utilization(42.0),
        link("leaf-2", "access-2", 10_000)
            .with_utilization(91.0)
            .with_status(LinkStatus::Congested),
        link("leaf-3", "vtep-1", 10_000).with_type(LinkType::Vxlan),
        link("access-1", "web-01", 1_000).with_utilization(12.5),
        link("access-1", "web-02", 1_000),
        link("access-1", "api-01", 1_000),
        link("access-2", "db-01", 1_000).with_utilization(67.0),
        link("access-2", "mon-01", 100).with_type(LinkType::Wireless),
    ];

    TopologyData::new(nodes, links)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tree::{build_logical_tree, build_physical_tree};

    #[test]
    fn demo_is_clean() {
        assert!(demo_topology().integrity_report().is_empty());
    }

    #[test]
    fn demo_covers_overlay_and_vlans() {
        let data = demo_topology();
        assert!(data.nodes.iter().any(|n| n.node_type == NodeType::Vtep));
        assert!(data.links.iter().any(|l| l.link_type == LinkType::Vxlan));
        let logical = build_logical_tree(&data).unwrap();
        let buckets: Vec<&str> = logical.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            buckets,
            vec!["infrastructure", "vlan-100", "vlan-101", "vlan-200", "vlan-300"]
        );
    }

    #[test]
    fn physical_tree_reaches_hosts() {
        let data = demo_topology();
        let tree = build_physical_tree(&data).unwrap();
        for id in ["web-01", "db-01", "mon-01", "vtep-1", "access-2"] {
            assert!(tree.find(id).is_some(), "{id} missing from physical tree");
        }
    }
}
