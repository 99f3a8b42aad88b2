use webroot_pack_packer::{
    name_index::IndexFormat,
    scan::{SearchOptions, search},
};
use webroot_pack_tests::{Artifacts, Fixture};

#[test]
fn scanned_web_root_is_fully_packed() {
    let fixture = Fixture::new().unwrap();
    fixture.write("index.html", b"<html>index</html>").unwrap();
    fixture.write("assets/css/style.css", b"body {}").unwrap();
    fixture.write("assets/js/script.js", b"alert(1);").unwrap();
    fixture.write(".hidden", b"secret").unwrap();

    let uris = search(&fixture.web_root(), &SearchOptions::default()).unwrap();
    assert_eq!(
        uris,
        vec![
            "/",
            "/assets/css/style.css",
            "/assets/js/script.js",
            "/index.html"
        ]
    );

    let mut driver = fixture.driver();
    driver
        .register_all(uris.iter().map(String::as_str))
        .unwrap();
    let summary = driver
        .finish(&fixture.outputs(), &IndexFormat::default())
        .unwrap();

    // `/` and `/index.html` are the same file, not-found was never needed
    assert_eq!(summary.uri_count, 4);
    assert_eq!(summary.object_count, 3);

    let artifacts = Artifacts::read(&fixture.outputs(), summary).unwrap();
    assert_eq!(artifacts.lookup("/"), Some(&b"<html>index</html>"[..]));
    assert_eq!(artifacts.lookup("/assets/css/style.css"), Some(&b"body {}"[..]));
    assert_eq!(artifacts.lookup("/.hidden"), None);
}
