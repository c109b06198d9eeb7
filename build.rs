use std::{env, path::PathBuf};

// ffmpeg-sys-next does the actual library discovery. On Windows it needs
// FFMPEG_DIR, so point at a vcpkg install when one is found.
fn main() {
    for variable in ["FFMPEG_DIR", "VCPKG_ROOT", "VCPKGRS_TRIPLET"] {
        println!("cargo:rerun-if-env-changed={variable}");
    }

    if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("windows")
        || env::var_os("FFMPEG_DIR").is_some()
    {
        return;
    }

    let Some(vcpkg_root) = env::var_os("VCPKG_ROOT") else {
        println!(
            "cargo:warning=framedump needs FFmpeg: set FFMPEG_DIR to an FFmpeg install (or VCPKG_ROOT for vcpkg)."
        );
        return;
    };

    let triplet = env::var("VCPKGRS_TRIPLET").unwrap_or_else(|_| "x64-windows".to_string());
    let candidate = PathBuf::from(vcpkg_root).join("installed").join(triplet);
    if candidate.exists() {
        println!(
            "cargo:warning=FFMPEG_DIR is unset; vcpkg FFmpeg found at {}. Set FFMPEG_DIR to it.",
            candidate.display()
        );
    } else {
        println!(
            "cargo:warning=No FFmpeg under {}. Run `vcpkg install ffmpeg` or set FFMPEG_DIR.",
            candidate.display()
        );
    }
}
