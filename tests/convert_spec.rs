use lifeo_convert::lifeo::models::Diary;
use lifeo_convert::{convert, Db110Format, Format, FormatError, JsonFormat, Payload};

const PLAIN_HEADER: &str = "LIFEOGRAPHDB\nV 1100\nE n\n\n";
const ENCRYPTED_HEADER: &str = "LIFEOGRAPHDB\nV 1100\nE yes\n\n";

const META: &str = concat!(
    "ID12\n",
    "TeWork\n",
    "T Personal\n",
    "t rust\n",
    "t family\n",
    "C 2014\n",
    "oe1400000000\tOpen Topic\n",
    "o Ideas\n",
    "ce1415000000\tNovember\n",
    "d 1415100000\n",
    "MdDark\n",
    "mfMonospace 10\n",
    "mb#101010\n",
    "mt#d0d0d0\n",
    "mh#ff0000\n",
    "ms#00ff00\n",
    "ml#0000ff\n",
    "M Light\n",
    "Os12\n",
    "l tr\n",
    "S 1\n",
    "L 3\n",
    "u2 4\n",
    "f1&0",
);

const ENTRIES: &str = concat!(
    "ID12\n",
    "Ef1430000000\n",
    "Dr1430000001\n",
    "Dh1430000002\n",
    "Ds1430000003\n",
    "M Dark\n",
    "T rust\n",
    "l de\n",
    "P First day of spring.\n",
    "P \n",
    "P It snowed.\n",
    "e hn1450000000\n",
    "T family\n",
    "P Trashed note.",
);

const PASSWORD: &str = "dragonfly";

/// `[salt][iv][ciphertext]` for the same meta/entries content as the plain
/// fixture, with salt `0123456789abcdef`, IV `fedcba9876543210` and key
/// SHA-256(salt || "dragonfly"). Generated with the reference cipher stack
/// (AES-256-CFB, full-block feedback).
const ENCRYPTED_BODY_HEX: &str = concat!(
    "3031323334353637383961626364656666656463626139383736353433323130",
    "3a9933848b0d1f788e46baef746ccd0fb035e193ca2c7d689ac2c14ce2554f0c",
    "217fb492915f55327ea0ea18bcb81f19ca4888dc4840ef01bf16b845e7824120",
    "dad4778c081aa684626a2e34d180d581aaf2e6e4dddfcbef2694d85f853f8615",
    "b795e11f914b27370f1c9ec5ecceafd6c4c164eed45f0508c9a6d6a319de13a7",
    "1f852ef1b45072b2822628a8ca5bbfc735a97b0999347a030e6b4b6c4baabc5c",
    "34ac02182632f08da18867a01096c840d3f4782906bf48547d968ee69c27ac25",
    "0ee9e24d96a631e9819b2b0c43247e2b073bfadcc6af471294da9b0e302bd062",
    "f018226da5f5f084d4c986dc92c162c6067e4408aab659dff23e3db2dd1b4d1c",
    "7bbb595122da1787bbe4dd7fde37e548221fa875878e3e75f631695f92f9b825",
    "2150a26728b40a11e08f2754694346cbf51b00670c8eea3c25708ca68648cbbd",
    "e139b2905c6fd01f039d2640dea602f41fb6f3a6b4e0b1237d7dba5c1799ebb8",
    "9c99c4e545da6e5ab2c37fffe8b7cf26259baafcff5cd8934a9b",
);

fn plain_db() -> Vec<u8> {
    format!("{}{}\n\n{}", PLAIN_HEADER, META, ENTRIES).into_bytes()
}

fn encrypted_db() -> Vec<u8> {
    let mut data = ENCRYPTED_HEADER.as_bytes().to_vec();
    data.extend(hex::decode(ENCRYPTED_BODY_HEX).expect("valid fixture hex"));
    data
}

fn db_with_content(meta: &str, entries: &str) -> Vec<u8> {
    format!("{}{}\n\n{}", PLAIN_HEADER, meta, entries).into_bytes()
}

fn decode_native(data: Vec<u8>, password: Option<&str>) -> Result<Diary, FormatError> {
    let format = Db110Format::new(password.map(str::to_string));
    format.decode(format.parse(data)?)
}

#[test]
fn plain_database_decodes_full_structure() {
    let diary = decode_native(plain_db(), None).expect("plain decode");

    assert_eq!(diary.last_id, Some(12));
    assert_eq!(diary.language.as_deref(), Some("tr"));
    assert_eq!(diary.startup_action, Some(1));
    assert_eq!(diary.last_element, Some(3));

    let categories: Vec<(bool, &str)> = diary
        .tag_categories
        .iter()
        .map(|c| (c.expanded, c.name.as_str()))
        .collect();
    assert_eq!(categories, vec![(true, "Work"), (false, "Personal")]);
    let tags: Vec<&str> = diary.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tags, vec!["rust", "family"]);

    assert_eq!(diary.chapter_categories.len(), 1);
    assert_eq!(diary.chapter_categories[0].name, "2014");
    let chapters: Vec<(&str, u64, Option<usize>, bool)> = diary
        .chapters
        .iter()
        .map(|c| (c.name.as_str(), c.timestamp, c.category, c.expanded))
        .collect();
    assert_eq!(
        chapters,
        vec![
            ("Open Topic", 1400000000, None, true),
            ("Ideas", 0, None, false),
            // The continuation line overwrites the owned chapter's timestamp.
            ("November", 1415100000, Some(0), true),
        ]
    );

    assert_eq!(diary.themes.len(), 2);
    let dark = &diary.themes[0];
    assert_eq!(dark.name, "Dark");
    assert_eq!(dark.font.as_deref(), Some("Monospace 10"));
    assert_eq!(dark.color_base.as_deref(), Some("#101010"));
    assert_eq!(dark.color_text.as_deref(), Some("#d0d0d0"));
    assert_eq!(dark.color_heading.as_deref(), Some("#ff0000"));
    assert_eq!(dark.color_subheading.as_deref(), Some("#00ff00"));
    assert_eq!(dark.color_highlight.as_deref(), Some("#0000ff"));
    let light = &diary.themes[1];
    assert_eq!(light.name, "Light");
    assert_eq!(light.font, None);
    assert_eq!(diary.default_theme, Some(0));

    assert_eq!(diary.entries.len(), 2);
    let first = &diary.entries[0];
    assert!(!first.trashed);
    assert!(first.favorite);
    assert_eq!(first.timestamp, 1430000000);
    assert_eq!(first.date_created, Some(1430000001));
    assert_eq!(first.date_changed, Some(1430000002));
    assert_eq!(first.date_status, Some(1430000003));
    assert_eq!(first.filter_default, None);
    assert_eq!(first.todo_status, None);
    assert_eq!(first.themes, vec![0]);
    assert_eq!(first.tags, vec![0]);
    assert_eq!(
        first.paragraphs,
        vec!["First day of spring.", "", "It snowed."]
    );
    assert_eq!(first.language.as_deref(), Some("de"));

    let second = &diary.entries[1];
    assert!(second.trashed);
    assert!(!second.favorite);
    assert_eq!(second.timestamp, 1450000000);
    assert_eq!(second.date_created, None);
    assert_eq!(second.filter_default, Some('h'));
    assert_eq!(second.todo_status, Some('n'));
    assert_eq!(second.themes, Vec::<usize>::new());
    assert_eq!(second.tags, vec![1]);
    assert_eq!(second.paragraphs, vec!["Trashed note."]);
    assert_eq!(second.language, None);
}

#[test]
fn decoding_is_deterministic() {
    let first = decode_native(plain_db(), None).expect("first decode");
    let second = decode_native(plain_db(), None).expect("second decode");
    assert_eq!(first, second);
}

#[test]
fn encrypted_database_matches_plain_twin() {
    let plain = decode_native(plain_db(), None).expect("plain decode");
    let decrypted = decode_native(encrypted_db(), Some(PASSWORD)).expect("encrypted decode");
    assert_eq!(plain, decrypted);
}

#[test]
fn wrong_password_is_detected() {
    for wrong in ["notebook", "password", "x"] {
        let err = decode_native(encrypted_db(), Some(wrong)).expect_err("wrong password");
        assert!(
            matches!(err, FormatError::DecryptionError(_)),
            "expected DecryptionError for password {:?}, got {:?}",
            wrong,
            err
        );
    }
}

#[test]
fn encrypted_database_requires_password() {
    let err = decode_native(encrypted_db(), None).expect_err("missing password");
    assert!(matches!(err, FormatError::PasswordRequired), "got {:?}", err);
}

#[test]
fn truncated_encrypted_body_is_rejected() {
    let mut data = ENCRYPTED_HEADER.as_bytes().to_vec();
    data.extend_from_slice(&[0u8; 20]);
    let err = decode_native(data, Some(PASSWORD)).expect_err("truncated body");
    assert!(
        matches!(err, FormatError::SizeMismatch { .. }),
        "got {:?}",
        err
    );
}

#[test]
fn owned_chapter_requires_prior_category() {
    let err =
        decode_native(db_with_content("ce1415000000\tNovember", ""), None).expect_err("orphan");
    match err {
        FormatError::OrphanChapter { name } => assert_eq!(name, "November"),
        other => panic!("expected OrphanChapter, got {:?}", other),
    }
}

#[test]
fn owned_chapter_attaches_to_most_recent_category() {
    let meta = "C 2013\nC 2014\nce1415000000\tNovember";
    let diary = decode_native(db_with_content(meta, ""), None).expect("decode");
    assert_eq!(diary.chapters[0].category, Some(1));
}

#[test]
fn entry_references_resolve_to_prior_declarations() {
    let meta = "t rust\nt rust\nM Dark";
    let entries = "Ef1430000000\nT rust\nM Dark";
    let diary = decode_native(db_with_content(meta, entries), None).expect("decode");
    // Duplicate names resolve to the first declaration.
    assert_eq!(diary.entries[0].tags, vec![0]);
    assert_eq!(diary.entries[0].themes, vec![0]);
}

#[test]
fn undeclared_references_are_rejected() {
    let err = decode_native(db_with_content("t rust", "Ef1430000000\nT work"), None)
        .expect_err("unknown tag");
    match err {
        FormatError::UnresolvedReference { kind, name } => {
            assert_eq!(kind, "tag");
            assert_eq!(name, "work");
        }
        other => panic!("expected UnresolvedReference, got {:?}", other),
    }

    let err = decode_native(db_with_content("", "Ef1430000000\nM Dark"), None)
        .expect_err("unknown theme");
    assert!(
        matches!(err, FormatError::UnresolvedReference { kind: "theme", .. }),
        "got {:?}",
        err
    );
}

#[test]
fn unmatched_lines_fail_loudly() {
    let err = decode_native(db_with_content("Z99", ""), None).expect_err("unmatched meta line");
    match err {
        FormatError::UnrecognizedLine { block, line } => {
            assert_eq!(block, "meta");
            assert_eq!(line, "Z99");
        }
        other => panic!("expected UnrecognizedLine, got {:?}", other),
    }

    // Near-empty lines are tolerated in the meta block (up to two chars)...
    decode_native(db_with_content("Z9", ""), None).expect("two-char line is near-empty");
    // ...but the entries block only tolerates a single char.
    let err = decode_native(db_with_content("", "Z9"), None).expect_err("entries line");
    assert!(
        matches!(err, FormatError::UnrecognizedLine { block: "entries", .. }),
        "got {:?}",
        err
    );
}

#[test]
fn bad_magic_is_rejected() {
    let data = b"NOTADIARYFILE\nE n\n\ncontent\n\nmore".to_vec();
    let err = decode_native(data, None).expect_err("bad magic");
    assert!(matches!(err, FormatError::MalformedHeader(_)), "got {:?}", err);

    let err = decode_native(b"LIFEOGRAPHDB".to_vec(), None).expect_err("no delimiter");
    assert!(matches!(err, FormatError::MalformedHeader(_)), "got {:?}", err);
}

#[test]
fn id_counter_scenario() {
    let data = db_with_content("ID5", "ID5\nEf1685577600\nDr1685577600\nP hello");
    let diary = decode_native(data, None).expect("decode");
    assert_eq!(diary.last_id, Some(5));
    assert_eq!(diary.entries.len(), 1);
    assert_eq!(diary.entries[0].date_created, Some(1685577600));
    assert_eq!(diary.entries[0].paragraphs, vec!["hello"]);
}

#[test]
fn sort_option_sets_default_language() {
    let diary = decode_native(db_with_content("Os12", ""), None).expect("decode");
    assert_eq!(diary.language.as_deref(), Some("en"));
    // A short payload is a no-op.
    let diary = decode_native(db_with_content("Osx", ""), None).expect("decode");
    assert_eq!(diary.language, None);
}

#[test]
fn json_round_trip_preserves_everything() {
    let diary = decode_native(plain_db(), None).expect("native decode");

    let json = JsonFormat;
    let document = json.dump(json.encode(&diary).expect("encode")).expect("dump");
    let reparsed = json
        .decode(json.parse(document.clone()).expect("parse"))
        .expect("decode");
    assert_eq!(diary, reparsed);

    // Document-level round trip: re-encoding the reparsed diary yields the
    // same document value.
    let second = json.dump(json.encode(&reparsed).expect("encode")).expect("dump");
    assert_eq!(document, second);
}

#[test]
fn convert_native_to_json_pipeline() {
    let json_bytes = convert(&Db110Format::new(None), &JsonFormat, plain_db()).expect("convert");
    let value: serde_json::Value = serde_json::from_slice(&json_bytes).expect("valid JSON");
    assert_eq!(value["last_id"], serde_json::json!(12));
    assert_eq!(value["entries"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["entries"][0]["tags"], serde_json::json!([0]));
}

#[test]
fn native_format_is_decode_only() {
    let diary = decode_native(plain_db(), None).expect("decode");
    let err = Db110Format::new(None).encode(&diary).expect_err("encode");
    assert!(
        matches!(err, FormatError::UnsupportedOperation(_)),
        "got {:?}",
        err
    );
}

#[test]
fn payload_mismatch_is_rejected() {
    let err = Db110Format::new(None)
        .decode(Payload::Value(serde_json::json!({})))
        .expect_err("native decode of a JSON document");
    assert!(matches!(err, FormatError::InvalidFormat(_)), "got {:?}", err);
}
