use std::env;

/// Bakes the backend defaults into the binary.
fn main() {
    // Both values are optional. When unset the binary falls back to its compiled-in defaults.
    for key in ["DASHBOARD_BACKEND_URL", "DASHBOARD_POLL_INTERVAL_MS"] {
        println!("cargo:rerun-if-env-changed={}", key);
        if let Ok(value) = env::var(key) {
            if !value.trim().is_empty() {
                println!("cargo:rustc-env={}={}", key, value.trim());
            }
        }
    }
    println!("cargo:rerun-if-changed=build.rs");
}
