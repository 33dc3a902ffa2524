use std::env;
use std::process::Command;

fn git(args: &[&str]) -> String {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .unwrap_or_else(|| "unknown".to_string())
        .trim()
        .to_string()
}

fn main() {
    if env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }

    // Build information
    let ts =
        time_format::strftime_local("%Y-%m-%d %H:%M:%S %Z", time_format::now().unwrap()).unwrap();
    let branch = git(&["rev-parse", "--abbrev-ref", "HEAD"]);
    let short_hash = git(&["rev-parse", "--short", "HEAD"]);

    println!("cargo:rustc-env=BUILD_TS={ts}");
    println!("cargo:rustc-env=BUILD_BRANCH={branch}");
    println!("cargo:rustc-env=BUILD_HASH={short_hash}");
    println!(
        "cargo:rustc-env=BUILD_PROFILE={}",
        env::var("PROFILE").unwrap()
    );

    // Optional JSON strip configuration baked into the firmware
    println!("cargo:rerun-if-env-changed=PIXELS_CONFIG");
}
