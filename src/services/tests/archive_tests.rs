use super::*;
use std::io::Write;
use tempfile::TempDir;

fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let file = fs::File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (name, bytes) in entries {
        if name.ends_with('/') {
            zip.add_directory(name.to_string(), options).unwrap();
        } else {
            zip.start_file(name.to_string(), options).unwrap();
            zip.write_all(bytes.as_bytes()).unwrap();
        }
    }
    zip.finish().unwrap();
}

#[test]
fn test_extract_keeps_layout() {
    let tmp = TempDir::new().unwrap();
    let archive = tmp.path().join("module.vmod");
    write_zip(
        &archive,
        &[
            ("buildFile", "<xml/>"),
            ("images/", ""),
            ("images/Luke.jpg", "old"),
        ],
    );

    let dest = tmp.path().join("out");
    let count = extract_zip(&archive, &dest, false).unwrap();

    assert_eq!(count, 2);
    assert_eq!(fs::read(dest.join("buildFile")).unwrap(), b"<xml/>");
    assert_eq!(fs::read(dest.join("images/Luke.jpg")).unwrap(), b"old");
}

#[test]
fn test_extract_strips_wrapper_folder() {
    let tmp = TempDir::new().unwrap();
    let archive = tmp.path().join("master.zip");
    write_zip(
        &archive,
        &[
            ("xwing-card-images-master/", ""),
            ("xwing-card-images-master/README.md", "readme"),
            ("xwing-card-images-master/images/pilots/rebels/x-wing/luke.png", "png"),
        ],
    );

    let dest = tmp.path().join("db");
    let count = extract_zip(&archive, &dest, true).unwrap();

    assert_eq!(count, 2);
    assert!(dest.join("README.md").is_file());
    assert!(dest.join("images/pilots/rebels/x-wing/luke.png").is_file());
    assert!(!dest.join("xwing-card-images-master").exists());
}

#[test]
fn test_extract_rejects_corrupt_archive() {
    let tmp = TempDir::new().unwrap();
    let archive = tmp.path().join("broken.vmod");
    fs::write(&archive, b"definitely not a zip").unwrap();

    let err = extract_zip(&archive, &tmp.path().join("out"), false).unwrap_err();
    assert!(matches!(err, ArchiveError::Zip(_)));
}

#[test]
fn test_pack_then_extract_preserves_files() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir_all(src.join("images/nested")).unwrap();
    fs::write(src.join("buildFile"), b"build").unwrap();
    fs::write(src.join("images/nested/a.png"), b"aaa").unwrap();

    let packed = tmp.path().join("packed.vmod");
    assert_eq!(pack_dir(&src, &packed).unwrap(), 2);

    let names: Vec<String> = {
        let mut archive = ZipArchive::new(fs::File::open(&packed).unwrap()).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    };
    assert_eq!(
        names,
        ["buildFile", "images/", "images/nested/", "images/nested/a.png"]
    );

    let out = tmp.path().join("out");
    extract_zip(&packed, &out, false).unwrap();
    assert_eq!(fs::read(out.join("images/nested/a.png")).unwrap(), b"aaa");
}
