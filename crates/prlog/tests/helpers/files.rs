use std::path::Path;

use pretty_assertions::assert_eq;

pub fn copy_dir_contents(source: &Path, target: &Path) {
    for entry in source.read_dir().expect("read_dir call failed") {
        let entry = entry.expect("DirEntry");
        let path = entry.path();
        let target = target.join(path.file_name().unwrap());
        if path.is_dir() {
            std::fs::create_dir_all(&target).expect("create_dir_all call failed");
            copy_dir_contents(&path, &target);
        } else {
            std::fs::copy(&path, &target).expect("copy call failed");
        }
    }
}

/// Every file in `expected` must exist in `actual` with the same contents.
pub fn assert_subset(expected: &Path, actual: &Path) {
    for entry in expected.read_dir().expect("read_dir call failed") {
        let path = entry.expect("DirEntry").path();
        let actual = actual.join(path.file_name().unwrap());
        if path.is_dir() {
            assert_subset(&path, &actual);
        } else {
            let expected_contents = std::fs::read_to_string(&path).unwrap();
            let actual_contents = std::fs::read_to_string(&actual)
                .unwrap_or_else(|err| panic!("could not read {}: {err}", actual.display()));
            assert_eq!(expected_contents, actual_contents, "{}", actual.display());
        }
    }
}
