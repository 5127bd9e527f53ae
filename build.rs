use chrono::Utc;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// `[package.metadata] host_api_version` from the manifest
fn host_api_version(manifest: &str) -> Option<String> {
    let table = manifest.parse::<toml::Table>().ok()?;
    table
        .get("package")?
        .get("metadata")?
        .get("host_api_version")?
        .as_integer()
        .map(|v| v.to_string())
}

fn git_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())?;
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

fn main() {
    let out_dir = env::var_os("OUT_DIR").expect("cargo sets OUT_DIR");
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("cargo sets CARGO_MANIFEST_DIR");
    let manifest = fs::read_to_string(Path::new(&manifest_dir).join("Cargo.toml"))
        .expect("Cargo.toml is readable");

    let generated = format!(
        "pub const HOST_API_VERSION: &str = {:?};\n\
         pub const BUILD_TIME: &str = {:?};\n\
         pub const GIT_HASH: &str = {:?};\n",
        host_api_version(&manifest).unwrap_or_else(|| "unknown".to_string()),
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        git_hash().unwrap_or_else(|| "unknown".to_string()),
    );
    fs::write(Path::new(&out_dir).join("version.rs"), generated).expect("OUT_DIR is writable");

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
