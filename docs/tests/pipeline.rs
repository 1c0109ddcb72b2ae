//! End-to-end pipeline behaviour with a fixture renderer.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use schema_docs::{run, BuildOptions, DocsError, RenderError, SchemaRenderer, UnitError};

const FIXTURE_HTML: &str = "<html><body><h1>Fixture</h1><p>body</p></body></html>";

fn fixture_renderer(_schema: &Path, html: &Path) -> Result<(), RenderError> {
    fs::write(html, FIXTURE_HTML).map_err(|source| RenderError::Write {
        path: html.to_path_buf(),
        source,
    })
}

fn write_schema(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("{{\"title\": \"{name}\", \"type\": \"object\"}}\n")).unwrap();
    path
}

#[test]
fn one_unit_per_schema_with_identical_copy() {
    let tmp = tempfile::tempdir().unwrap();
    let user = write_schema(tmp.path(), "user.schema.json");
    let order = write_schema(tmp.path(), "order.schema.json");
    let out = tmp.path().join("out");

    let report = run(
        &BuildOptions {
            schemas: vec![user.clone(), order.clone()],
            output_dir: out.clone(),
        },
        &fixture_renderer,
    )
    .unwrap();

    assert_eq!(report.units.len(), 2);
    for (src, folder, name) in [
        (&user, "user.schema", "user.schema.json"),
        (&order, "order.schema", "order.schema.json"),
    ] {
        let unit = out.join(folder);
        assert!(unit.join("index.html").is_file());
        assert_eq!(fs::read(src).unwrap(), fs::read(unit.join(name)).unwrap());
    }
    assert_eq!(fs::read_dir(&out).unwrap().count(), 2);
}

#[test]
fn link_is_inserted_after_first_heading() {
    let tmp = tempfile::tempdir().unwrap();
    let schema = write_schema(tmp.path(), "user.schema.json");
    let out = tmp.path().join("out");

    run(
        &BuildOptions {
            schemas: vec![schema],
            output_dir: out.clone(),
        },
        &fixture_renderer,
    )
    .unwrap();

    let html = fs::read_to_string(out.join("user.schema").join("index.html")).unwrap();
    assert_eq!(
        html,
        "<html><body><h1>Fixture</h1>\n<p><a href=\"user.schema.json\" target=\"_blank\">View schema</a></p><p>body</p></body></html>"
    );
}

#[test]
fn page_without_heading_is_left_unchanged() {
    let tmp = tempfile::tempdir().unwrap();
    let schema = write_schema(tmp.path(), "flat.json");
    let out = tmp.path().join("out");
    let headless = |_: &Path, html: &Path| -> Result<(), RenderError> {
        fs::write(html, "<p>no heading</p>").unwrap();
        Ok(())
    };

    let report = run(
        &BuildOptions {
            schemas: vec![schema],
            output_dir: out.clone(),
        },
        &headless,
    )
    .unwrap();

    assert!(!report.units[0].linked);
    let html = fs::read_to_string(out.join("flat").join("index.html")).unwrap();
    assert_eq!(html, "<p>no heading</p>");
}

#[test]
fn stale_output_is_removed() {
    let tmp = tempfile::tempdir().unwrap();
    let schema = write_schema(tmp.path(), "user.schema.json");
    let out = tmp.path().join("docs");
    fs::create_dir_all(out.join("gone")).unwrap();
    fs::write(out.join("old.txt"), "stale").unwrap();

    run(
        &BuildOptions {
            schemas: vec![schema],
            output_dir: out.clone(),
        },
        &fixture_renderer,
    )
    .unwrap();

    assert!(!out.join("old.txt").exists());
    assert!(!out.join("gone").exists());
    assert!(out.join("user.schema").is_dir());
}

#[test]
fn missing_schema_stops_the_run() {
    let tmp = tempfile::tempdir().unwrap();
    let first = write_schema(tmp.path(), "first.json");
    let missing = tmp.path().join("missing.json");
    let later = write_schema(tmp.path(), "later.json");
    let out = tmp.path().join("out");
    let rendered = RefCell::new(Vec::new());
    let recording = |schema: &Path, html: &Path| -> Result<(), RenderError> {
        rendered.borrow_mut().push(schema.to_path_buf());
        fixture_renderer(schema, html)
    };

    let err = run(
        &BuildOptions {
            schemas: vec![first.clone(), missing.clone(), later],
            output_dir: out.clone(),
        },
        &recording,
    )
    .unwrap_err();

    match err {
        DocsError::SchemaNotFound(path) => assert_eq!(path, missing),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(*rendered.borrow(), vec![first]);
    assert!(out.join("first").join("index.html").exists());
    assert!(!out.join("later").exists());
}

#[test]
fn renderer_failure_names_the_schema() {
    let tmp = tempfile::tempdir().unwrap();
    let schema = write_schema(tmp.path(), "broken.json");
    let failing = |_: &Path, _: &Path| -> Result<(), RenderError> {
        Err(RenderError::Other("renderer exploded".to_string()))
    };

    let err = run(
        &BuildOptions {
            schemas: vec![schema.clone()],
            output_dir: tmp.path().join("out"),
        },
        &failing,
    )
    .unwrap_err();

    assert!(matches!(
        &err,
        DocsError::Generate {
            source: UnitError::Render(_),
            ..
        }
    ));
    let message = err.to_string();
    assert!(message.contains(&schema.display().to_string()));
    assert!(message.contains("renderer exploded"));
}

#[test]
fn colliding_folder_names_share_a_directory() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("a")).unwrap();
    fs::create_dir_all(tmp.path().join("b")).unwrap();
    let one = write_schema(&tmp.path().join("a"), "item.json");
    let two = write_schema(&tmp.path().join("b"), "item.yaml");
    let out = tmp.path().join("out");

    run(
        &BuildOptions {
            schemas: vec![one, two],
            output_dir: out.clone(),
        },
        &fixture_renderer,
    )
    .unwrap();

    let unit = out.join("item");
    assert!(unit.join("item.json").is_file());
    assert!(unit.join("item.yaml").is_file());
}

#[test]
fn rerun_is_byte_identical() {
    let tmp = tempfile::tempdir().unwrap();
    let schema = tmp.path().join("user.schema.json");
    fs::write(
        &schema,
        r#"{"title": "User", "required": ["id"], "properties": {"id": {"type": "integer"}, "name": {"type": "string"}}}"#,
    )
    .unwrap();
    let options = BuildOptions {
        schemas: vec![schema],
        output_dir: tmp.path().join("out"),
    };
    let page = options.output_dir.join("user.schema").join("index.html");

    run(&options, &SchemaRenderer).unwrap();
    let first = fs::read(&page).unwrap();
    run(&options, &SchemaRenderer).unwrap();
    let second = fs::read(&page).unwrap();

    assert_eq!(first, second);
    let html = String::from_utf8(first).unwrap();
    assert!(html.contains(
        "<h1>User</h1>\n<p><a href=\"user.schema.json\" target=\"_blank\">View schema</a></p>"
    ));
}

#[test]
fn invalid_schema_fails_with_parse_error() {
    let tmp = tempfile::tempdir().unwrap();
    let schema = tmp.path().join("bad.json");
    fs::write(&schema, "not json").unwrap();

    let err = run(
        &BuildOptions {
            schemas: vec![schema],
            output_dir: tmp.path().join("out"),
        },
        &SchemaRenderer,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        DocsError::Generate {
            source: UnitError::Render(RenderError::Parse { .. }),
            ..
        }
    ));
}

#[test]
fn unusable_output_dir_aborts_before_writing() {
    let tmp = tempfile::tempdir().unwrap();
    let schema = write_schema(tmp.path(), "user.schema.json");
    let out = tmp.path().join("docs");
    fs::write(&out, "not a directory").unwrap();
    let rendered = RefCell::new(0);
    let counting = |schema: &Path, html: &Path| -> Result<(), RenderError> {
        *rendered.borrow_mut() += 1;
        fixture_renderer(schema, html)
    };

    let err = run(
        &BuildOptions {
            schemas: vec![schema],
            output_dir: out.clone(),
        },
        &counting,
    )
    .unwrap_err();

    assert!(matches!(err, DocsError::OutputDir { ref path, .. } if *path == out));
    assert_eq!(*rendered.borrow(), 0);
    assert_eq!(fs::read_to_string(&out).unwrap(), "not a directory");
}

// macOS filesystems reject names that are not valid UTF-8.
#[cfg(target_os = "linux")]
#[test]
fn non_utf8_file_names_are_kept_verbatim() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tmp = tempfile::tempdir().unwrap();
    let name = OsStr::from_bytes(b"caf\xe9.json");
    let schema = tmp.path().join(name);
    fs::write(&schema, "{}").unwrap();
    let out = tmp.path().join("out");

    run(
        &BuildOptions {
            schemas: vec![schema.clone()],
            output_dir: out.clone(),
        },
        &fixture_renderer,
    )
    .unwrap();

    let unit = out.join(OsStr::from_bytes(b"caf\xe9"));
    assert!(unit.join("index.html").is_file());
    assert!(unit.join(name).is_file());
    assert_eq!(fs::read(&schema).unwrap(), fs::read(unit.join(name)).unwrap());
    let html = fs::read_to_string(unit.join("index.html")).unwrap();
    assert!(html.contains("<a href=\"caf\u{fffd}.json\" target=\"_blank\">View schema</a>"));
}
