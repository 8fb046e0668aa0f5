use std::env;
use std::path::PathBuf;
use yangen_codegen::GeneratorConfig;
use yangen_schema::{Identity, IdentityBase, NamingRegistry, SchemaTree, TypeKind, YangType};

/// Builds the `fixture` module: one container exercising every field shape.
fn fixture_tree() -> SchemaTree {
    let mut tree = SchemaTree::new();
    let module = tree.add_module("fixture");
    let system = tree.add_container(module, "system");

    tree.add_leaf(system, "hostname", YangType::new(TypeKind::String));
    tree.add_leaf(
        system,
        "mode",
        YangType::union(vec![
            YangType::new(TypeKind::String),
            YangType::new(TypeKind::Int8),
        ]),
    );
    tree.add_leaf_list(system, "servers", YangType::new(TypeKind::String));
    tree.add_leaf(
        system,
        "speed",
        YangType::enumeration(&["SPEED_2.5G", "SPEED-40G"]),
    );
    tree.add_leaf(
        system,
        "protocol",
        YangType::identityref(IdentityBase {
            name: "protocol-base".into(),
            module: "fixture".into(),
            values: vec![
                Identity::new("VALUE_C", "mod2"),
                Identity::new("VALUE_A", "mod"),
                Identity::new("VALUE_B", "mod3"),
            ],
        }),
    );

    tree.add_leaf(
        system,
        "admin",
        YangType::union(vec![
            YangType::enumeration(&["ENABLED", "DISABLED"]),
            YangType::enumeration(&["AUTO"]),
        ]),
    );

    let interface = tree.add_list(system, "interface", &["name"]);
    let config = tree.add_container(interface, "config");
    let name = tree.add_leaf(config, "name", YangType::new(TypeKind::String));
    tree.add_leaf(config, "mtu", YangType::new(TypeKind::Uint16));
    let state = tree.add_container(interface, "state");
    tree.add_leaf(state, "oper-status", YangType::enumeration(&["UP", "DOWN"]));
    tree.add_leaf(interface, "name", YangType::leafref(name));

    let route = tree.add_list(system, "route", &["prefix", "metric"]);
    tree.add_leaf(route, "prefix", YangType::new(TypeKind::String));
    tree.add_leaf(route, "metric", YangType::new(TypeKind::Uint32));
    tree.add_leaf(route, "next-hop", YangType::new(TypeKind::String));

    let vlan = tree.add_list(system, "vlan", &["id"]);
    tree.add_leaf(
        vlan,
        "id",
        YangType::union(vec![
            YangType::new(TypeKind::Uint16),
            YangType::new(TypeKind::String),
        ]),
    );
    tree.add_leaf(vlan, "description", YangType::new(TypeKind::String));

    let log = tree.add_list(system, "log", &[]);
    tree.add_leaf(log, "message", YangType::new(TypeKind::String));

    tree
}

fn fixture_names() -> NamingRegistry {
    NamingRegistry::builder()
        .directory("/fixture/system", "System")
        .directory("/fixture/system/interface", "System_Interface")
        .directory("/fixture/system/route", "System_Route")
        .directory("/fixture/system/vlan", "System_Vlan")
        .directory("/fixture/system/log", "System_Log")
        .enumeration("/fixture/system/speed", "System_Speed")
        .enumeration("/fixture/system/protocol", "ProtocolBase")
        .enumeration("/fixture/system/admin", "System_Admin")
        .enumeration(
            "/fixture/system/interface/state/oper-status",
            "Interface_OperStatus",
        )
        .build()
}

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    let tree = fixture_tree();
    let names = fixture_names();
    let config = GeneratorConfig::new().compress_paths(true);

    yangen_codegen::generate_to_file(&tree, &names, config, &out_dir.join("generated.rs"))
        .expect("Failed to generate fixture code");

    println!("cargo:rerun-if-changed=build.rs");
}
