use std::fs;
use std::path::PathBuf;

use objlit_core::{load_bmp, load_flat_mesh, load_obj, LoadError, Pool, Vec2, Vec3};

fn scratch_file(name: &str, contents: &[u8]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("objlit-load-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

const TEXTURED_QUAD: &str = "\
mtllib quad.mtl
o quad
v -1 -1 0
v 1 -1 0
v 1 1 0
v -1 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
usemtl brick
f 1/1/1 2/2/1 3/3/1 4/4/1
";

#[test]
fn test_load_textured_quad() {
    let path = scratch_file("quad.obj", TEXTURED_QUAD.as_bytes());
    let flat = load_flat_mesh(&path).unwrap();

    assert_eq!(flat.vertex_count(), 6);
    assert_eq!(flat.normals, vec![Vec3::z(); 6]);
    let uvs = flat.tex_coords.as_ref().unwrap();
    assert_eq!(uvs[..3], [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)]);
    assert_eq!(flat.positions[5], Vec3::new(-1.0, 1.0, 0.0));
}

#[test]
fn test_missing_file() {
    let path = std::env::temp_dir().join("objlit-definitely-missing.obj");
    match load_obj(&path) {
        Err(LoadError::File { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("expected a file error, got {other:?}"),
    }
    assert!(matches!(load_bmp(&path), Err(LoadError::File { .. })));
}

#[test]
fn test_parse_error_reports_line() {
    let path = scratch_file("broken.obj", b"v 0 0 0\nv 1 0\n");
    match load_obj(&path) {
        Err(LoadError::Parse(err)) => assert_eq!(err.line, 2),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_index_error_surfaces() {
    let path = scratch_file("dangling.obj", b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1//1 2//1 3//1\n");
    match load_flat_mesh(&path) {
        Err(LoadError::Index(err)) => {
            assert_eq!(err.pool, Pool::Normal);
            assert_eq!(err.len, 0);
        }
        other => panic!("expected an index error, got {other:?}"),
    }
}

#[test]
fn test_bmp_not_a_bitmap() {
    let path = scratch_file("fake.bmp", b"GIF89a");
    let err = load_bmp(&path).unwrap_err();
    assert_eq!(err.to_string(), "not a BMP file");
}
