//! The browser binding only builds with `--features web` on wasm32, so a
//! web-sys type it names without the matching Cargo feature (or a feature
//! name web-sys doesn't have) would go unnoticed on a native `cargo test`.
//! These checks read the manifest and the `src/web` sources directly.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

fn manifest_dir() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

/// `features = [...]` of the `web-sys` dependency.
fn web_sys_features() -> Vec<String> {
    let manifest = fs::read_to_string(manifest_dir().join("Cargo.toml")).unwrap();
    let manifest: toml::Value = toml::from_str(&manifest).unwrap();
    manifest["dependencies"]["web-sys"]["features"]
        .as_array()
        .expect("web-sys declares a feature list")
        .iter()
        .map(|f| f.as_str().unwrap().to_string())
        .collect()
}

/// Every web-sys type named in `src/web`: the `use web_sys::{...}` lists and
/// fully qualified `web_sys::Type` paths.
fn web_sys_types_used() -> BTreeSet<String> {
    let mut types = BTreeSet::new();
    for entry in fs::read_dir(manifest_dir().join("src/web")).unwrap() {
        let source = fs::read_to_string(entry.unwrap().path()).unwrap();

        let mut rest = source.as_str();
        while let Some(start) = rest.find("use web_sys::{") {
            let list = &rest[start + "use web_sys::{".len()..];
            let end = list.find('}').unwrap();
            types.extend(
                list[..end]
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(String::from),
            );
            rest = &list[end..];
        }

        for (i, _) in source.match_indices("web_sys::") {
            let name: String = source[i + "web_sys::".len()..]
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect();
            if name.starts_with(|c: char| c.is_ascii_uppercase()) {
                types.insert(name);
            }
        }
    }
    types
}

#[test]
fn every_used_web_sys_type_has_its_feature() {
    let features = web_sys_features();
    let missing: Vec<_> = web_sys_types_used()
        .into_iter()
        .filter(|ty| !features.contains(ty))
        .collect();
    assert!(missing.is_empty(), "web-sys features missing for {missing:?}");
}

#[test]
fn feature_list_is_sorted_and_unique() {
    let features = web_sys_features();
    let mut sorted = features.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(features, sorted);
}

#[test]
fn ready_state_is_compared_as_a_string() {
    // `Document::ready_state` returns a `String`; there is no
    // `DocumentReadyState` enum or feature in web-sys.
    let features = web_sys_features();
    assert!(!features.iter().any(|f| f == "DocumentReadyState"));
    let source = fs::read_to_string(manifest_dir().join("src/web/mod.rs")).unwrap();
    assert!(source.contains(r#"ready_state() == "loading""#));
}

#[test]
fn scanner_sees_the_binding_imports() {
    let used = web_sys_types_used();
    for ty in ["Element", "IntersectionObserver", "ScrollToOptions", "NodeList"] {
        assert!(used.contains(ty), "{ty} not found in src/web");
    }
}
