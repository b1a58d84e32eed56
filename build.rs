use std::{env, fs, path::PathBuf};

fn main() {
    // Only RP2040 firmware builds need the linker script; host builds and
    // tests never touch it.
    let target = env::var("TARGET").unwrap_or_default();
    if target.starts_with("thumbv6m") {
        let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
        let memory_x = fs::read_to_string("memory.x").expect("Failed to read memory.x");
        fs::write(out_dir.join("memory.x"), memory_x).expect("Failed to write memory.x");
        println!("cargo:rustc-link-search={}", out_dir.display());
        println!("cargo:rerun-if-changed=memory.x");
    }
}
