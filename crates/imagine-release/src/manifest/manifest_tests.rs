#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

const RELEASE_MF: &str = r#"
name: redis
version: "12"
commit_hash: 1a2b3c4d
uncommitted_changes: false
packages:
- name: redis-server
  version: 4a8c3a1f
  fingerprint: 4a8c3a1f
  sha1: 0e7b2c9d
  dependencies:
  - libssl
- name: libssl
  version: 9f0e1d2c
  fingerprint: 9f0e1d2c
  sha1: 77aa66bb
  dependencies: []
jobs:
- name: redis
  version: 5d6e7f80
  fingerprint: 5d6e7f80
  sha1: c0ffee11
license:
  version: 0ab1
"#;

// Release manifest decoding

#[test]
fn decode_release_manifest___parses_full_document() {
    let manifest = decode_release_manifest(RELEASE_MF.as_bytes()).unwrap();

    assert_eq!(manifest.name, "redis");
    assert_eq!(manifest.version, "12");
    assert_eq!(manifest.commit_hash, "1a2b3c4d");
    assert_eq!(manifest.packages.len(), 2);
    assert_eq!(manifest.packages[0].name, "redis-server");
    assert_eq!(manifest.packages[0].sha1, "0e7b2c9d");
    assert_eq!(manifest.packages[0].dependencies, vec!["libssl"]);
    assert!(manifest.packages[1].dependencies.is_empty());
    assert_eq!(manifest.jobs, vec![JobDeclaration {
        name: "redis".to_string(),
        sha1: "c0ffee11".to_string(),
        fingerprint: "5d6e7f80".to_string(),
        version: "5d6e7f80".to_string(),
    }]);
}

#[test]
fn decode_release_manifest___minimal_document___decodes() {
    let yaml = r#"
name: r1
packages:
- name: p1
  dependencies: []
jobs: []
"#;

    let manifest = decode_release_manifest(yaml.as_bytes()).unwrap();

    assert_eq!(manifest.name, "r1");
    assert_eq!(manifest.packages.len(), 1);
    assert_eq!(manifest.packages[0].name, "p1");
    assert!(manifest.packages[0].dependencies.is_empty());
    assert!(manifest.jobs.is_empty());
}

#[test]
fn decode_release_manifest___dangling_dependency___decodes() {
    let yaml = r#"
name: r1
packages:
- name: p1
  dependencies: [p2]
"#;

    let manifest = decode_release_manifest(yaml.as_bytes()).unwrap();

    assert_eq!(manifest.packages[0].dependencies, vec!["p2"]);
    assert!(manifest.package("p2").is_none());
}

#[test]
fn decode_release_manifest___preserves_declaration_order() {
    let yaml = "packages:\n- name: c\n- name: a\n- name: b\n";

    let manifest = decode_release_manifest(yaml.as_bytes()).unwrap();
    let names: Vec<&str> = manifest.packages.iter().map(|p| p.name.as_str()).collect();

    assert_eq!(names, vec!["c", "a", "b"]);
}

#[test_case("" ; "empty document")]
#[test_case("   \n\t\n" ; "whitespace only")]
#[test_case("name: ~\npackages: ~\njobs: ~\n" ; "explicit nulls")]
#[test_case("unrelated: key\n" ; "only unknown keys")]
fn decode_release_manifest___absent_fields___decode_to_zero_value(yaml: &str) {
    let manifest = decode_release_manifest(yaml.as_bytes()).unwrap();

    assert_eq!(manifest, ReleaseManifest::default());
}

#[test]
fn decode_release_manifest___null_dependencies___decode_to_empty() {
    let yaml = "packages:\n- name: p1\n  dependencies:\n";

    let manifest = decode_release_manifest(yaml.as_bytes()).unwrap();

    assert!(manifest.packages[0].dependencies.is_empty());
}

#[test_case("packages: not-a-list\n" ; "scalar where sequence expected")]
#[test_case("packages:\n- name: [nested]\n" ; "sequence where string expected")]
#[test_case("name: [unterminated\n" ; "malformed flow sequence")]
#[test_case("name: a\nname: b\n" ; "duplicate key")]
fn decode_release_manifest___malformed___returns_release_decode_error(yaml: &str) {
    let err = decode_release_manifest(yaml.as_bytes()).unwrap_err();

    match err {
        ReleaseError::ManifestDecode { kind, entry, .. } => {
            assert_eq!(kind, ManifestKind::Release);
            assert_eq!(entry, "./release.MF");
        }
        other => panic!("unexpected error: {other}"),
    }
}

// Job manifest decoding

#[test]
fn decode_job_manifest___parses_name_and_packages() {
    let yaml = r#"
name: redis
templates:
  ctl.erb: bin/ctl
packages:
- redis-server
- libssl
properties:
  port:
    default: 6379
"#;

    let manifest = decode_job_manifest(yaml.as_bytes()).unwrap();

    assert_eq!(manifest, JobManifest::new("redis", &["redis-server", "libssl"]));
}

#[test]
fn decode_job_manifest___missing_packages___decodes_empty() {
    let manifest = decode_job_manifest(b"name: lonely\n").unwrap();

    assert_eq!(manifest.name, "lonely");
    assert!(manifest.packages.is_empty());
}

#[test]
fn decode_job_manifest___malformed___returns_job_decode_error() {
    let err = decode_job_manifest(b"packages: {a: b}\n").unwrap_err();

    assert!(matches!(
        err,
        ReleaseError::ManifestDecode {
            kind: ManifestKind::Job,
            ..
        }
    ));
}

#[test]
fn decode_job_manifest___is_stateless_across_calls() {
    let first = decode_job_manifest(b"name: a\npackages: [x]\n").unwrap();
    let second = decode_job_manifest(b"name: b\n").unwrap();

    assert_eq!(first, JobManifest::new("a", &["x"]));
    assert_eq!(second, JobManifest::new("b", &[]));
}

// Encoding

#[test]
fn ReleaseManifest___to_yaml___decodes_back() {
    let mut manifest = ReleaseManifest::new("demo");
    manifest.packages.push(PackageDeclaration::new("libA", &["libB"]));
    manifest.jobs.push(JobDeclaration::new("worker"));

    let yaml = manifest.to_yaml().unwrap();
    let decoded = decode_release_manifest(yaml.as_bytes()).unwrap();

    assert_eq!(decoded, manifest);
}

#[test]
fn JobManifest___to_yaml___writes_package_list() {
    let yaml = JobManifest::new("worker", &["libA"]).to_yaml().unwrap();

    assert!(yaml.contains("name: worker"));
    assert!(yaml.contains("- libA"));
}

// Lookups

#[test]
fn ReleaseManifest___package___finds_by_exact_name() {
    let mut manifest = ReleaseManifest::new("demo");
    manifest.packages.push(PackageDeclaration::new("libA", &[]));

    assert!(manifest.package("libA").is_some());
    assert!(manifest.package("liba").is_none());
}
