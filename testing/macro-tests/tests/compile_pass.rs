#[test]
fn derive_surface_compiles() {
    let t = trybuild::TestCases::new();
    t.pass("tests/pass/*.rs");
}
