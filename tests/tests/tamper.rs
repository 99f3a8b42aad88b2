use std::{
    fs::{self, OpenOptions},
    io::Write,
};
use webroot_pack_packer::{error::Error, name_index::IndexFormat};
use webroot_pack_tests::Fixture;

// replaces file with a different one (new inode) under the same path
fn replace(
    fixture: &Fixture,
    relative_path: &str,
    content: &[u8],
) {
    let path = fixture.web_root().join(relative_path);
    let replacement = fixture.web_root().join(format!("{}.new", relative_path));
    fs::write(&replacement, content).unwrap();
    fs::rename(&replacement, &path).unwrap();
}

#[test]
fn file_replaced_after_registration_aborts_build() {
    let fixture = Fixture::new().unwrap();
    fixture.write("index.html", b"original").unwrap();
    fixture.write("large.bin", &[0u8; 4096]).unwrap();

    let mut driver = fixture.driver();
    driver.register_all(["/", "/large.bin"]).unwrap();

    replace(&fixture, "index.html", b"tampered");

    let error = driver
        .finish(&fixture.outputs(), &IndexFormat::default())
        .unwrap_err();
    assert!(matches!(error, Error::IdentityMismatch { .. }));
    assert_eq!(error.exit_code(), 65);

    // nothing was published, no temporary files left
    assert_eq!(
        fs::read_dir(fixture.output_directory()).unwrap().count(),
        0
    );
}

#[test]
fn file_modified_after_registration_aborts_build() {
    let fixture = Fixture::new().unwrap();
    let path = fixture.write("index.html", b"original").unwrap();

    let mut driver = fixture.driver();
    driver.register("/").unwrap();

    OpenOptions::new()
        .append(true)
        .open(&path)
        .unwrap()
        .write_all(b" and then some")
        .unwrap();

    let error = driver
        .finish(&fixture.outputs(), &IndexFormat::default())
        .unwrap_err();
    assert!(matches!(error, Error::SizeChanged { .. }));
    assert_eq!(
        fs::read_dir(fixture.output_directory()).unwrap().count(),
        0
    );
}

#[test]
fn failed_build_keeps_previous_artifacts() {
    let fixture = Fixture::new().unwrap();
    fixture.write("index.html", b"first").unwrap();

    let previous = fixture.build(&["/"]).unwrap();

    let mut driver = fixture.driver();
    driver.register("/").unwrap();
    replace(&fixture, "index.html", b"second");
    driver
        .finish(&fixture.outputs(), &IndexFormat::default())
        .unwrap_err();

    let outputs = fixture.outputs();
    assert_eq!(fs::read(&outputs.object_db).unwrap(), previous.blob);
    assert_eq!(fs::read_dir(fixture.output_directory()).unwrap().count(), 2);
}
