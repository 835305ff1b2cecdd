/// Integration test: loads a realistic blueprint from disk, builds every
/// argument of every validator, and checks the tree and serializer
/// properties over the result.
use plutus_argtree::{
    deep_copy, ArgError, ArgNode, Blueprint, BuildOptions, NodeId, NodeKind, PlutusData,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::io::Write;

fn blueprint_json() -> Value {
    json!({
        "preamble": {
            "title": "acme/market",
            "description": "Listing and buying",
            "version": "0.1.0",
            "plutusVersion": "v2",
            "compiler": {"name": "Aiken", "version": "v1.0.26"}
        },
        "validators": [
            {
                "title": "market.spend",
                "datum": {"title": "listing", "schema": {"$ref": "#/definitions/market~1Listing"}},
                "redeemer": {"title": "action", "schema": {"$ref": "#/definitions/market~1Action"}},
                "compiledCode": "5901ab0100",
                "hash": "a1b2c3"
            },
            {
                "title": "token.mint",
                "redeemer": {"title": "mode", "schema": {"$ref": "#/definitions/token~1Mode"}},
                "parameters": [
                    {"title": "utxo", "schema": {"$ref": "#/definitions/aiken~1transaction~1OutputReference"}},
                    {"title": "metadata", "schema": {"$ref": "#/definitions/Data"}}
                ],
                "compiledCode": "59020c0100",
                "hash": "d4e5f6"
            }
        ],
        "definitions": {
            "ByteArray": {"dataType": "bytes"},
            "Int": {"dataType": "integer"},
            "Data": {"title": "Data", "description": "Any Plutus data."},
            "List$ByteArray": {"dataType": "list", "items": {"$ref": "#/definitions/ByteArray"}},
            "aiken/transaction/TransactionId": {
                "title": "TransactionId",
                "anyOf": [{
                    "title": "TransactionId", "dataType": "constructor", "index": 0,
                    "fields": [{"title": "hash", "$ref": "#/definitions/ByteArray"}]
                }]
            },
            "aiken/transaction/OutputReference": {
                "title": "OutputReference",
                "anyOf": [{
                    "title": "OutputReference", "dataType": "constructor", "index": 0,
                    "fields": [
                        {"title": "transaction_id", "$ref": "#/definitions/aiken~1transaction~1TransactionId"},
                        {"title": "output_index", "$ref": "#/definitions/Int"}
                    ]
                }]
            },
            "market/Listing": {
                "title": "Listing",
                "anyOf": [{
                    "title": "Listing", "dataType": "constructor", "index": 0,
                    "fields": [
                        {"title": "seller", "$ref": "#/definitions/ByteArray"},
                        {"title": "price", "$ref": "#/definitions/Int"},
                        {"title": "tags", "$ref": "#/definitions/List$ByteArray"}
                    ]
                }]
            },
            "market/Action": {
                "title": "Action",
                "anyOf": [
                    {"title": "Buy", "dataType": "constructor", "index": 0, "fields": []},
                    {"title": "Withdraw", "dataType": "constructor", "index": 1, "fields": []},
                    {"title": "Update", "dataType": "constructor", "index": 2, "fields": [
                        {"title": "new_price", "$ref": "#/definitions/Int"},
                        {"title": "note", "$ref": "#/definitions/Data"}
                    ]}
                ]
            },
            "token/Mode": {
                "title": "Mode",
                "anyOf": [
                    {"title": "Mint", "dataType": "constructor", "index": 0, "fields": []},
                    {"title": "Burn", "dataType": "constructor", "index": 1, "fields": [
                        {"title": "amount", "$ref": "#/definitions/Int"}
                    ]}
                ]
            }
        }
    })
}

fn load() -> Blueprint {
    let mut file = tempfile::NamedTempFile::new().expect("create temp blueprint");
    let text = serde_json::to_string_pretty(&blueprint_json()).unwrap();
    file.write_all(text.as_bytes()).expect("write temp blueprint");
    Blueprint::from_path(file.path()).expect("load blueprint")
}

fn all_trees(bp: &Blueprint) -> Vec<ArgNode> {
    let mut trees = Vec::new();
    for v in &bp.validators {
        let args = bp.validator_args(&v.title, BuildOptions::default()).unwrap();
        trees.extend(args.datum);
        trees.push(args.redeemer);
        trees.extend(args.parameters);
    }
    trees
}

fn find_by_label<'a>(root: &'a ArgNode, label: &str) -> &'a ArgNode {
    root.descendants()
        .into_iter()
        .find(|n| n.label() == label)
        .unwrap_or_else(|| panic!("no node labelled {label}"))
}

/// Each option's serialized ordinal and arity match its constructor.
fn check_options(node: &ArgNode, data: &PlutusData) {
    match node {
        ArgNode::Dropdown(d) => check_options(d.selected().unwrap(), data),
        ArgNode::Option(o) => match data {
            PlutusData::Constr {
                constructor,
                fields,
            } => {
                assert_eq!(*constructor, o.constructor());
                assert_eq!(fields.len(), o.fields().len());
                for (child, value) in o.fields().iter().zip(fields) {
                    check_options(child, value);
                }
            }
            other => panic!("option {} serialized as {other:?}", node.label()),
        },
        _ => {}
    }
}

#[test]
fn test_defaults_serialize() {
    let bp = load();
    for tree in all_trees(&bp) {
        let data = tree.to_plutus_val().unwrap();
        check_options(&tree, &data);
    }
}

#[test]
fn test_every_option_serializes_when_selected() {
    let bp = load();
    for mut tree in all_trees(&bp) {
        let dropdowns: Vec<(NodeId, Vec<NodeId>)> = tree
            .descendants()
            .into_iter()
            .filter(|n| n.kind() == NodeKind::Dropdown)
            .map(|n| (n.id(), n.children().iter().map(ArgNode::id).collect()))
            .collect();
        for (dropdown, options) in dropdowns {
            for option in options {
                tree.get_child_by_id_mut(&dropdown.to_string())
                    .unwrap()
                    .set_field_val(&option.to_string())
                    .unwrap();
                let data = tree.to_plutus_val().unwrap();
                check_options(&tree, &data);
            }
        }
    }
}

#[test]
fn test_identities_unique_across_trees() {
    let bp = load();
    let trees = all_trees(&bp);
    let mut seen = HashSet::new();
    for tree in &trees {
        for node in tree.descendants() {
            assert!(seen.insert(node.id()), "duplicate id {}", node.id());
        }
    }
}

#[test]
fn test_selection_invariant_holds() {
    let bp = load();
    for tree in all_trees(&bp) {
        for node in tree.descendants() {
            if let ArgNode::Dropdown(d) = node {
                assert!(d.options().iter().any(|o| o.id() == d.selection()));
            }
        }
    }
}

#[test]
fn test_output_reference_parameter() {
    let bp = load();
    let args = bp.validator_args("token.mint", BuildOptions::default()).unwrap();
    let mut utxo = args.parameters[0].clone();
    let hash = find_by_label(&utxo, "hash").id();
    let index = find_by_label(&utxo, "output_index").id();
    utxo.get_child_by_id_mut(&hash.to_string())
        .unwrap()
        .set_field_val("cafe01")
        .unwrap();
    utxo.get_child_by_id_mut(&index.to_string())
        .unwrap()
        .set_field_val("2")
        .unwrap();
    assert_eq!(
        utxo.to_plutus_val().unwrap().to_json().unwrap(),
        json!({
            "constructor": 0,
            "fields": [
                {"constructor": 0, "fields": [{"bytes": "cafe01"}]},
                {"int": 2}
            ]
        })
    );
    assert_eq!(args.parameters[1].kind(), NodeKind::Data);
    assert_eq!(args.parameters[1].label(), "metadata");
}

#[test]
fn test_unrecognised_list_becomes_int() {
    let bp = load();
    let args = bp.validator_args("market.spend", BuildOptions::default()).unwrap();
    let datum = args.datum.unwrap();
    assert_eq!(find_by_label(&datum, "tags").kind(), NodeKind::Int);
}

#[test]
fn test_invalid_note_blocks_then_recovers() {
    let bp = load();
    let mut action = bp
        .validator_args("market.spend", BuildOptions::default())
        .unwrap()
        .redeemer;
    let update = find_by_label(&action, "Update").id();
    action.set_field_val(&update.to_string()).unwrap();
    let note = find_by_label(&action, "note").id();

    let field = action.get_child_by_id_mut(&note.to_string()).unwrap();
    field.set_field_val("{\"int\": 1").unwrap();
    assert_eq!(field.show_field_val().as_deref(), Some("{\"int\": 1"));
    match action.to_plutus_val() {
        Err(ArgError::InvalidData { id, .. }) => assert_eq!(id, note),
        other => panic!("expected invalid data, got {other:?}"),
    }

    action
        .get_child_by_id_mut(&note.to_string())
        .unwrap()
        .set_field_val("{}")
        .unwrap();
    assert_eq!(
        action.to_plutus_val().unwrap().to_json().unwrap(),
        json!({"constructor": 2, "fields": [{"int": 0}, {}]})
    );
}

#[test]
fn test_deep_copy_preserves_defaults() {
    let bp = load();
    let original = all_trees(&bp);
    let mut edited = deep_copy(&original);
    for tree in edited.iter_mut() {
        let leaves: Vec<NodeId> = tree
            .descendants()
            .into_iter()
            .filter(|n| n.kind() == NodeKind::Int)
            .map(ArgNode::id)
            .collect();
        for id in leaves {
            tree.get_child_by_id_mut(&id.to_string())
                .unwrap()
                .set_field_val("99")
                .unwrap();
        }
    }
    for (a, b) in original.iter().zip(&edited) {
        assert_eq!(a.id(), b.id());
    }
    assert_ne!(original, edited);
    for tree in &original {
        for node in tree.descendants() {
            if node.kind() == NodeKind::Int {
                assert_eq!(node.show_field_val().as_deref(), Some("0"));
            }
        }
    }
}

#[test]
fn test_serialization_is_repeatable() {
    let bp = load();
    for tree in all_trees(&bp) {
        assert_eq!(tree.to_plutus_val().unwrap(), tree.to_plutus_val().unwrap());
    }
}
