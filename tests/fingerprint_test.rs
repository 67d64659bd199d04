use api_changelog::{ChangelogError, Spec, generate_fingerprint};
use std::fs;

fn read_document(file_name: &str) -> String {
    fs::read_to_string(format!("tests/data/{file_name}")).expect("Could not read test document")
}

#[test]
fn test_fingerprint_consistency_for_identical_files() {
    let content_a1 = read_document("petstore_v1.yaml");
    let content_a2 = read_document("petstore_v1.yaml");

    let hash1 = generate_fingerprint(&content_a1).unwrap();
    let hash2 = generate_fingerprint(&content_a2).unwrap();

    assert_eq!(hash1, hash2);
    assert_eq!(hash1.len(), 64);
}

#[test]
fn test_fingerprint_ignores_syntax_and_key_order() {
    let yaml = read_document("petstore_v1.yaml");
    let json = read_document("petstore_v1_reordered.json");

    assert_eq!(
        generate_fingerprint(&yaml).unwrap(),
        generate_fingerprint(&json).unwrap()
    );
}

#[test]
fn test_fingerprint_ignores_comments() {
    let content = read_document("petstore_v1.yaml");
    let commented = format!("# Petstore API\n{}\n# end of document\n", content);

    assert_eq!(
        generate_fingerprint(&content).unwrap(),
        generate_fingerprint(&commented).unwrap()
    );
}

#[test]
fn test_fingerprint_detects_semantic_change() {
    let v1 = read_document("petstore_v1.yaml");
    let v2 = read_document("petstore_v2.yaml");

    assert_ne!(
        generate_fingerprint(&v1).unwrap(),
        generate_fingerprint(&v2).unwrap()
    );
}

#[test]
fn test_fingerprint_detects_format_change() {
    let v1 = read_document("petstore_v1.yaml");
    let int64 = v1.replacen("format: int32", "format: int64", 1);

    assert_ne!(
        generate_fingerprint(&v1).unwrap(),
        generate_fingerprint(&int64).unwrap()
    );
}

#[test]
fn test_fingerprint_rejects_non_api_documents() {
    let err = generate_fingerprint(&read_document("not_an_api.yaml")).unwrap_err();
    assert!(matches!(err, ChangelogError::Parse { .. }));
}

#[test]
fn test_same_fingerprint_means_no_changes() {
    let a = Spec::try_from(&read_document("petstore_v1.yaml"), "a").unwrap();
    let b = Spec::try_from(&read_document("petstore_v1_reordered.json"), "b").unwrap();

    assert_eq!(a.fingerprint, b.fingerprint);
    assert!(a.compare_with(&b).unwrap().is_empty());
}
