const SOURCES_PROBE: &[&str] = &["layout_helper.c"];

const HEADERS_COMMON: &[&str] = &["clib/include/capstone/systemz.h"];

fn main() {
    let mut build = cc::Build::new();

    build.flag_if_supported("-Wno-unused-parameter");
    build.flag_if_supported("-std=c11");

    build.include("clib/include"); // common headers
    build.files(SOURCES_PROBE);

    if cfg!(feature = "systemz") {
        build.define("CAPSTONE_HAS_SYSZ", None);
    }

    track(SOURCES_PROBE);
    track(HEADERS_COMMON);

    build.compile("capstone_layout");
}

fn track(paths: &[&str]) {
    for p in paths {
        println!("cargo:rerun-if-changed={}", p);
    }
}
