use std::{
    env,
    path::{Path, PathBuf},
};

const SOURCE_DIR_VAR: &str = "GLFW_SOURCE_DIR";
const LIB_DIR_VAR: &str = "GLFW_LIB_DIR";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed={SOURCE_DIR_VAR}");
    println!("cargo:rerun-if-env-changed={LIB_DIR_VAR}");

    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();

    if env::var_os("CARGO_FEATURE_VENDORED").is_some() {
        build_vendored(&target_os);
    } else {
        link_system(&target_os);
    }
}

fn build_vendored(target_os: &str) {
    let source_dir = env::var_os(SOURCE_DIR_VAR).map(PathBuf::from).unwrap_or_else(|| {
        panic!("the `vendored` feature requires {SOURCE_DIR_VAR} to point at a GLFW 3.0 source tree")
    });

    let dst = cmake::Config::new(&source_dir)
        .define("GLFW_BUILD_EXAMPLES", "OFF")
        .define("GLFW_BUILD_TESTS", "OFF")
        .define("GLFW_BUILD_DOCS", "OFF")
        .define("GLFW_INSTALL", "ON")
        .define("BUILD_SHARED_LIBS", "OFF")
        .build();

    println!("cargo:rustc-link-search=native={}", dst.join("lib").display());
    println!("cargo:rustc-link-search=native={}", dst.join("lib64").display());
    println!("cargo:rustc-link-lib=static=glfw3");

    for lib in platform_libs(target_os) {
        println!("cargo:rustc-link-lib={lib}");
    }
}

fn platform_libs(target_os: &str) -> &'static [&'static str] {
    match target_os {
        "windows" => &["gdi32", "user32", "shell32", "opengl32"],
        "macos" => &[
            "framework=Cocoa",
            "framework=IOKit",
            "framework=CoreFoundation",
            "framework=CoreVideo",
            "framework=OpenGL",
        ],
        _ => &["X11", "Xrandr", "Xi", "Xxf86vm", "GL", "pthread", "dl", "m"],
    }
}

/// Links the system library, or emits a warning when it cannot be located so that
/// crates which never call into GLFW (unit tests of pure code) still link.
fn link_system(target_os: &str) {
    let lib_name = if target_os == "windows" { "glfw3" } else { "glfw" };

    let mut search_dirs: Vec<PathBuf> = Vec::new();
    if let Some(dir) = env::var_os(LIB_DIR_VAR) {
        search_dirs.push(PathBuf::from(dir));
    }
    search_dirs.extend(
        [
            "/usr/local/lib",
            "/usr/lib",
            "/usr/lib64",
            "/usr/lib/x86_64-linux-gnu",
            "/usr/lib/aarch64-linux-gnu",
            "/opt/homebrew/lib",
        ]
        .iter()
        .map(PathBuf::from),
    );

    match search_dirs.iter().find(|dir| has_library(dir, lib_name, target_os)) {
        Some(dir) => {
            println!("cargo:rustc-link-search=native={}", dir.display());
            println!("cargo:rustc-link-lib={lib_name}");
        }
        None => {
            println!(
                "cargo:warning=lib{lib_name} was not found; set {LIB_DIR_VAR} or enable the `vendored` feature"
            );
        }
    }
}

fn has_library(dir: &Path, lib_name: &str, target_os: &str) -> bool {
    let candidates: Vec<String> = match target_os {
        "windows" => vec![format!("{lib_name}.lib"), format!("{lib_name}dll.lib")],
        "macos" => vec![format!("lib{lib_name}.dylib"), format!("lib{lib_name}.a")],
        _ => vec![format!("lib{lib_name}.so"), format!("lib{lib_name}.a")],
    };
    candidates.iter().any(|file| dir.join(file).exists())
}
