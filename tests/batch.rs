use std::fs;
use std::path::PathBuf;

use lz78::batch::{
    compress_file, compress_tree, decompress_tree, decompressed_path,
    BatchOptions,
};
use lz78::{compress, LZ78Error};

/// Returns a fresh directory for the test 'name'.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(format!("lz78-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_decompressed_path() {
    let path = PathBuf::from("output/texts/book.txt");
    assert_eq!(
        decompressed_path(&path, "Decompressed"),
        PathBuf::from("output/texts/bookDecompressed.txt")
    );
    let path = PathBuf::from("output/raw");
    assert_eq!(
        decompressed_path(&path, "Decompressed"),
        PathBuf::from("output/rawDecompressed")
    );
}

#[test]
fn test_batch_round_trip() {
    let root = scratch_dir("round-trip");
    let dataset = root.join("dataset");
    let output = root.join("output");

    let files: [(&str, Vec<u8>); 4] = [
        ("texts/a.txt", b"to be or not to be, that is the question".to_vec()),
        ("texts/empty.txt", Vec::new()),
        ("bin/zeros.bin", vec![0; 5000]),
        ("bin/nested/seq.bin", (0..=255u8).cycle().take(3000).collect()),
    ];
    for (name, data) in &files {
        let path = dataset.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, data).unwrap();
    }
    fs::create_dir_all(dataset.join("empty_dir")).unwrap();

    let report = compress_tree(&dataset, &output).unwrap();
    assert!(report.is_success());
    assert_eq!(report.files, files.len());
    assert_eq!(
        report.read,
        files.iter().map(|(_, d)| d.len()).sum::<usize>()
    );
    assert!(output.join("empty_dir").is_dir());
    for (name, data) in &files {
        assert_eq!(fs::read(output.join(name)).unwrap(), compress(data));
    }

    // The output directory must be fresh.
    assert!(compress_tree(&dataset, &output).is_err());

    let options = BatchOptions::default();
    let report = decompress_tree(&output, &options).unwrap();
    assert!(report.is_success());
    assert_eq!(report.files, files.len());
    for (name, data) in &files {
        let path = decompressed_path(&output.join(name), "Decompressed");
        assert_eq!(&fs::read(path).unwrap(), data);
    }

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_batch_keeps_going_after_failure() {
    let root = scratch_dir("failure");
    fs::write(root.join("good.lz"), compress(b"hello hello hello")).unwrap();
    fs::write(root.join("corrupt.lz"), [0x80, 0x61, 0x85, 0x61]).unwrap();
    fs::write(root.join("truncated.lz"), [0x80, 0x61, 0x01]).unwrap();

    let options = BatchOptions::default();
    let report = decompress_tree(&root, &options).unwrap();
    assert!(!report.is_success());
    assert_eq!(report.files, 1);
    assert_eq!(report.failures.len(), 2);
    assert!(report.failures.iter().all(|f| f.error.is_format_error()));
    assert!(report.failures.iter().any(|f| matches!(
        f.error,
        LZ78Error::CorruptStream { index: 5, .. }
    )));

    assert_eq!(
        fs::read(root.join("goodDecompressed.lz")).unwrap(),
        b"hello hello hello"
    );
    assert!(!root.join("corruptDecompressed.lz").exists());
    assert!(!root.join("truncatedDecompressed.lz").exists());

    let _ = fs::remove_dir_all(&root);
}

#[cfg(unix)]
#[test]
fn test_batch_unreadable_subdirectory() {
    use std::os::unix::fs::PermissionsExt;

    let root = scratch_dir("unreadable");
    let dataset = root.join("dataset");
    let output = root.join("output");
    fs::create_dir_all(dataset.join("good")).unwrap();
    fs::write(dataset.join("good/a.txt"), b"abcabcabcabc").unwrap();
    let locked = dataset.join("locked");
    fs::create_dir_all(&locked).unwrap();
    fs::write(locked.join("b.txt"), b"hidden").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    // Privileged users can still list the directory.
    let is_locked = fs::read_dir(&locked).is_err();

    let res = compress_tree(&dataset, &output);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    let report = res.unwrap();

    assert_eq!(
        fs::read(output.join("good/a.txt")).unwrap(),
        compress(b"abcabcabcabc")
    );
    if is_locked {
        assert_eq!(report.files, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, locked);
        assert!(!report.failures[0].error.is_format_error());
    } else {
        assert!(report.is_success());
        assert_eq!(report.files, 2);
    }

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_batch_missing_root() {
    let root = scratch_dir("missing-root");
    let res = compress_tree(&root.join("nothing"), &root.join("output"));
    assert!(matches!(res, Err(LZ78Error::Io(_))));
    assert!(!root.join("output").exists());

    let res = decompress_tree(&root.join("nothing"), &BatchOptions::default());
    assert!(matches!(res, Err(LZ78Error::Io(_))));

    let _ = fs::remove_dir_all(&root);
}

#[cfg(unix)]
#[test]
fn test_batch_skips_directory_links() {
    let root = scratch_dir("links");
    let dataset = root.join("dataset");
    let output = root.join("output");
    fs::create_dir_all(dataset.join("texts")).unwrap();
    fs::write(dataset.join("texts/a.txt"), b"banana bandana").unwrap();
    std::os::unix::fs::symlink(".", dataset.join("texts/loop")).unwrap();
    std::os::unix::fs::symlink("a.txt", dataset.join("texts/link.txt"))
        .unwrap();

    let report = compress_tree(&dataset, &output).unwrap();
    assert!(report.is_success());
    // The file and the link to it, but nothing through the loop.
    assert_eq!(report.files, 2);
    assert!(!output.join("texts/loop").exists());
    assert_eq!(
        fs::read(output.join("texts/link.txt")).unwrap(),
        compress(b"banana bandana")
    );

    let _ = fs::remove_dir_all(&root);
}

#[cfg(unix)]
#[test]
fn test_compress_file_removes_partial_output() {
    let root = scratch_dir("partial");
    let dest = root.join("out.lz");

    // Opening a directory works, but reading from it fails.
    let res = compress_file(&root, &dest);
    assert!(matches!(res, Err(LZ78Error::Io(_))));
    assert!(!dest.exists());

    let _ = fs::remove_dir_all(&root);
}
