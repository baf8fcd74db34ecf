//! Integration tests for the lightningcss-backed bundler.
//!
//! Each test lays out a small project in a temporary directory and runs a
//! full build against it.

use cssbundle::{BuildOptions, Bundler, LightningBundler, Phase};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn app_options(root: &Path) -> BuildOptions {
    BuildOptions::new("src/app.css", "build/bundle.css")
        .with_main_fields(["browser", "module", "main"])
        .with_bundle(true)
        .with_minify(true)
        .relative_to(root)
}

#[tokio::test]
async fn test_build_single_rule() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/app.css", ".card {\n  padding: 4px;\n}\n");

    let output = LightningBundler::new()
        .build(&app_options(temp.path()))
        .await
        .unwrap();

    let outfile = temp.path().join("build/bundle.css");
    assert_eq!(output.outfile, outfile);
    let css = fs::read_to_string(&outfile).unwrap();
    assert!(css.contains(".card{padding:4px}"));
    assert_eq!(output.size_bytes, css.len() as u64);
}

#[tokio::test]
async fn test_build_inlines_relative_and_package_imports() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "src/app.css",
        "@import \"./base.css\";\n@import \"theme\";\n.app { margin: 0; }\n",
    );
    write(temp.path(), "src/base.css", "html { color: black; }\n");
    write(
        temp.path(),
        "node_modules/theme/package.json",
        r#"{ "main": "theme.main.css", "browser": "theme.browser.css" }"#,
    );
    write(temp.path(), "node_modules/theme/theme.main.css", ".from-main { top: 0 }");
    write(
        temp.path(),
        "node_modules/theme/theme.browser.css",
        ".from-browser { left: 0 }",
    );

    LightningBundler::new()
        .build(&app_options(temp.path()))
        .await
        .unwrap();

    let css = fs::read_to_string(temp.path().join("build/bundle.css")).unwrap();
    assert!(css.contains("html{color:#000}") || css.contains("html{color:black}"));
    assert!(css.contains(".from-browser"));
    assert!(!css.contains(".from-main"));
    assert!(css.contains(".app{margin:0}"));
    assert!(!css.contains("@import"));
}

#[tokio::test]
async fn test_build_missing_entry_fails() {
    let temp = TempDir::new().unwrap();

    let err = LightningBundler::new()
        .build(&app_options(temp.path()))
        .await
        .unwrap_err();

    assert_eq!(err.phase(), Phase::Resolve);
    assert!(!temp.path().join("build/bundle.css").exists());
}

#[tokio::test]
async fn test_build_unresolved_import_fails() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/app.css", "@import \"not-installed\";\na { top: 0 }");

    let err = LightningBundler::new()
        .build(&app_options(temp.path()))
        .await
        .unwrap_err();

    assert_eq!(err.phase(), Phase::Resolve);
    assert!(err.to_string().contains("not-installed"));
}

#[tokio::test]
async fn test_failed_build_leaves_previous_output() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "build/bundle.css", "previous{}");
    write(temp.path(), "src/app.css", "a { color: red; }\n??? { color: blue; }\n");

    let err = LightningBundler::new()
        .build(&app_options(temp.path()))
        .await
        .unwrap_err();

    assert_eq!(err.phase(), Phase::Parse);
    assert!(err.location().is_some());
    let css = fs::read_to_string(temp.path().join("build/bundle.css")).unwrap();
    assert_eq!(css, "previous{}");
}

#[tokio::test]
async fn test_build_keeps_url_imports_external() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "src/app.css",
        "@import url(\"https://fonts.googleapis.com/css2?family=Inter\");\n\
         @import \"//cdn.example.com/reset.css\";\n\
         @import \"./base.css\";\n\
         body { color: red; }\n",
    );
    write(temp.path(), "src/base.css", ".base { margin: 0 }\n");

    LightningBundler::new()
        .build(&app_options(temp.path()))
        .await
        .unwrap();

    let css = fs::read_to_string(temp.path().join("build/bundle.css")).unwrap();
    assert!(css.contains("@import"));
    assert!(css.contains("fonts.googleapis.com"));
    assert!(css.contains("cdn.example.com/reset.css"));
    assert!(css.contains(".base{margin:0}"));
    assert!(css.contains("body{color:red}"));
}
