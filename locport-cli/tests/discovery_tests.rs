use locport::Platform;
use locport_cli::discovery::{build_excludes, discover, split_inputs};
use std::fs;
use std::path::{Path, PathBuf};

fn touch(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn no_excludes() -> globset::GlobSet {
    build_excludes(&[]).unwrap()
}

#[test]
fn walks_only_source_language_locations() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    let ios = touch(root, "App/en.lproj/Localizable.strings", "\"a\" = \"A\";");
    touch(root, "App/fr.lproj/Localizable.strings", "\"a\" = \"A\";");
    let android = touch(root, "res/values/strings.xml", "<resources/>");
    touch(root, "res/values-fr/strings.xml", "<resources/>");
    touch(root, "res/layout/main.xml", "<LinearLayout/>");
    let portal = touch(root, "web/Localization/common.json", r#"{"title": "Title"}"#);
    touch(root, "web/config/settings.json", r#"{"title": "Title"}"#);
    touch(root, "README.md", "# readme");

    let mut expected = vec![ios, android, portal];
    expected.sort();

    let found = discover(&[root.to_path_buf()], None, &no_excludes()).unwrap();
    assert_eq!(found, expected);
}

#[test]
fn portal_files_must_be_flat_non_empty_objects() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    let flat = touch(root, "Localisation/flat.json", r#"{"a": "A", "nested": {"b": "B"}}"#);
    touch(root, "Localisation/empty.json", "{}");
    touch(root, "Localisation/array.json", r#"["a", "b"]"#);
    touch(root, "Localisation/grouped.json", r#"{"home": {"a": "A"}, "menu": {"b": "B"}}"#);
    touch(root, "Localisation/broken.json", "{ nope");

    let found = discover(&[root.to_path_buf()], None, &no_excludes()).unwrap();
    assert_eq!(found, vec![flat]);
}

#[test]
fn non_english_files_are_dropped() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    let english = touch(
        root,
        "a/en.lproj/Good.strings",
        "\"quote\" = \"It’s “fine” — really… 🎉\";",
    );
    touch(root, "b/en.lproj/Bad.strings", "\"hello\" = \"Привет\";");

    let found = discover(&[root.to_path_buf()], None, &no_excludes()).unwrap();
    assert_eq!(found, vec![english]);
}

#[test]
fn explicit_files_skip_location_rule_but_not_portal() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    let strings = touch(root, "anywhere/Custom.strings", "\"a\" = \"A\";");
    let xml = touch(root, "other/strings.xml", "<resources/>");
    let json = touch(root, "Localization/common.json", r#"{"a": "A"}"#);

    let raw = format!("{},{},{}", strings.display(), xml.display(), json.display());
    let found = discover(&split_inputs(&raw), None, &no_excludes()).unwrap();

    let mut expected = vec![strings, xml];
    expected.sort();
    assert_eq!(found, expected);
}

#[test]
fn platform_filter_and_excludes() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    let app = touch(root, "App/en.lproj/Localizable.strings", "\"a\" = \"A\";");
    touch(root, "Pods/Lib/en.lproj/Lib.strings", "\"b\" = \"B\";");
    touch(root, "res/values/strings.xml", "<resources/>");

    let excludes = build_excludes(&["**/Pods/**".to_string()]).unwrap();
    let found = discover(&[root.to_path_buf()], Some(Platform::Ios), &excludes).unwrap();
    assert_eq!(found, vec![app]);
}

#[test]
fn missing_source_path_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("does-not-exist");
    assert!(discover(&[missing], None, &no_excludes()).is_err());
}
