//! Tests for SVG and token metadata rendering.

use ledger_tictactoe::{GameRegistry, Identity, MemoryStore};
use ledger_tictactoe_metadata::{
    AttributeValue, DESCRIPTION, RenderError, TokenMetadata, decode_data_uri, metadata, render,
    render_svg,
};

fn alice() -> Identity {
    Identity::new("0xA11CE00000000000000000000000000000000001").expect("valid identity")
}

fn bob() -> Identity {
    Identity::new("0xB0B0000000000000000000000000000000000002").expect("valid identity")
}

fn text(value: &str) -> AttributeValue {
    AttributeValue::Text(value.to_string())
}

/// Game 0: alice (X) vs bob (O) with `moves` played alternately.
fn registry_with(moves: &[(u8, u8)]) -> GameRegistry<MemoryStore> {
    let registry = GameRegistry::new(MemoryStore::new());
    registry.create_game(&alice(), 1).expect("create");
    registry.accept_game(0, &bob(), 2).expect("accept");
    for (ply, &(row, col)) in moves.iter().enumerate() {
        let caller = if ply % 2 == 0 { alice() } else { bob() };
        registry
            .make_move(0, &caller, row, col, 10 + ply as u64)
            .expect("valid move");
    }
    registry
}

#[test]
fn test_token_uri_framing() {
    let registry = registry_with(&[]);
    let uri = render(&registry.game(0).expect("game")).expect("render");

    assert!(uri.starts_with("data:application/json;base64,"));
    let decoded = decode_data_uri(&uri).expect("decode");
    assert_eq!(decoded.mime, "application/json");

    let json: serde_json::Value = serde_json::from_slice(&decoded.payload).expect("json");
    let keys: Vec<&str> = json
        .as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys.len(), 4);
    assert!(decoded.text().expect("utf8").starts_with(r#"{"name":"Game #0","description":"#));
}

#[test]
fn test_name_and_description() {
    let registry = GameRegistry::new(MemoryStore::new());
    for _ in 0..3 {
        registry.create_game(&alice(), 1).expect("create");
    }

    let meta = metadata(&registry.game(2).expect("game"));
    assert_eq!(meta.name(), "Game #2");
    assert_eq!(meta.description(), DESCRIPTION);
    assert_eq!(meta.description(), "On-chain Tic Tac Toe game");
}

#[test]
fn test_open_game_attributes() {
    let registry = GameRegistry::new(MemoryStore::new());
    registry.create_game(&alice(), 1).expect("create");
    let meta = metadata(&registry.game(0).expect("game"));

    let names: Vec<&str> = meta
        .attributes()
        .iter()
        .map(|a| a.trait_type().as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Game ID", "Player", "Opponent", "Status", "Winner", "Moves Left"]
    );

    assert_eq!(meta.attribute("Game ID"), Some(&text("0")));
    assert_eq!(meta.attribute("Player"), Some(&text(alice().as_str())));
    assert_eq!(meta.attribute("Opponent"), Some(&text("None")));
    assert_eq!(meta.attribute("Status"), Some(&text("In Progress")));
    assert_eq!(meta.attribute("Winner"), Some(&text("None")));
    assert_eq!(meta.attribute("Moves Left"), Some(&AttributeValue::Number(9)));
}

#[test]
fn test_moves_left_is_json_number() {
    let registry = registry_with(&[(1, 1)]);
    let uri = render(&registry.game(0).expect("game")).expect("render");
    let decoded = decode_data_uri(&uri).expect("decode");
    let json: serde_json::Value = serde_json::from_slice(&decoded.payload).expect("json");

    let attributes = json["attributes"].as_array().expect("attributes");
    assert_eq!(attributes[5]["trait_type"], "Moves Left");
    assert_eq!(attributes[5]["value"], serde_json::json!(8));
    assert_eq!(attributes[0]["value"], serde_json::json!("0"));
}

#[test]
fn test_won_game_attributes() {
    let registry = registry_with(&[(0, 0), (0, 1), (1, 1), (0, 2), (2, 2)]);
    let meta = metadata(&registry.game(0).expect("game"));

    assert_eq!(meta.attribute("Opponent"), Some(&text(bob().as_str())));
    assert_eq!(meta.attribute("Status"), Some(&text("Finished")));
    assert_eq!(meta.attribute("Winner"), Some(&text(alice().as_str())));
    assert_eq!(meta.attribute("Moves Left"), Some(&AttributeValue::Number(4)));
}

#[test]
fn test_drawn_game_attributes() {
    let registry = registry_with(&[
        (0, 0),
        (0, 1),
        (0, 2),
        (1, 1),
        (1, 0),
        (1, 2),
        (2, 1),
        (2, 0),
        (2, 2),
    ]);
    let meta = metadata(&registry.game(0).expect("game"));

    assert_eq!(meta.attribute("Status"), Some(&text("Finished")));
    assert_eq!(meta.attribute("Winner"), Some(&text("None")));
    assert_eq!(meta.attribute("Moves Left"), Some(&AttributeValue::Number(0)));
}

#[test]
fn test_empty_board_svg() {
    let registry = GameRegistry::new(MemoryStore::new());
    registry.create_game(&alice(), 1).expect("create");
    let svg = render_svg(&registry.game(0).expect("game"));

    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains("<rect"));
    assert!(!svg.contains(r#"class="x""#));
    assert!(!svg.contains(r#"class="cell o""#));
}

#[test]
fn test_svg_glyph_counts() {
    let registry = registry_with(&[(0, 0), (0, 1), (1, 1), (1, 0), (2, 2)]);
    let svg = render_svg(&registry.game(0).expect("game"));

    assert_eq!(svg.matches(r#"<line class="x""#).count(), 6);
    assert_eq!(svg.matches(r#"<circle class="cell o""#).count(), 2);
    // Center cell X.
    assert!(svg.contains(r#"<line class="x" x1="122" y1="122" x2="178" y2="178"/>"#));
    // Top-middle O.
    assert!(svg.contains(r#"<circle class="cell o" cx="150" cy="50" r="28"/>"#));
}

#[test]
fn test_image_embeds_svg() {
    let registry = registry_with(&[(0, 0)]);
    let game = registry.game(0).expect("game");
    let meta = metadata(&game);

    assert!(meta.image().starts_with("data:image/svg+xml;base64,"));
    let image = decode_data_uri(meta.image()).expect("decode image");
    assert_eq!(image.mime, "image/svg+xml");
    assert_eq!(image.text().expect("utf8"), render_svg(&game));
}

#[test]
fn test_render_is_deterministic() {
    let registry = registry_with(&[(0, 0), (1, 1)]);
    let first = render(&registry.game(0).expect("game")).expect("render");
    let second = render(&registry.game(0).expect("game")).expect("render");
    assert_eq!(first, second);

    let parsed = TokenMetadata::from_token_uri(&first).expect("parse");
    assert_eq!(parsed, metadata(&registry.game(0).expect("game")));
}

#[test]
fn test_decode_rejects_malformed_uris() {
    assert!(matches!(
        decode_data_uri("https://example.com"),
        Err(RenderError::NotADataUri)
    ));
    assert!(matches!(
        decode_data_uri("data:text/plain,hello"),
        Err(RenderError::UnsupportedEncoding(_))
    ));
    assert!(matches!(
        decode_data_uri("data:application/json;base64,!!!"),
        Err(RenderError::Base64(_))
    ));
}
