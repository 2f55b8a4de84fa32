//! Build script for combolock-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates lock.toml at compile time and generates the config constant

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use combolock_core::{ConfigError, LockConfig};

fn main() {
    setup_linker();
    generate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}

/// Validate lock.toml and write `lock_config.rs` to OUT_DIR
fn generate_config() {
    println!("cargo:rerun-if-changed=lock.toml");

    let config_path = Path::new("lock.toml");

    if !config_path.exists() {
        fail(
            "lock.toml not found",
            &["The firmware requires a lock.toml configuration file".into()],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read lock.toml", &[e.to_string()]),
    };

    let config: LockConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => fail(
            "Invalid lock.toml",
            &e.to_string().lines().map(String::from).collect::<Vec<_>>(),
        ),
    };

    if let Err(e) = config.validate() {
        fail("Invalid lock configuration", &[describe(e).into()]);
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("lock_config.rs"), render(&config)).unwrap();
}

fn describe(error: ConfigError) -> &'static str {
    match error {
        ConfigError::InvalidDefaultCombination => "default_combination digits must be 0-15",
        ConfigError::ZeroPassCount => "digit pass counts must be at least 1",
        ConfigError::ZeroAttempts => "max_failed_attempts must be at least 1",
        ConfigError::ZeroFlashPeriod => "flash_half_period_ms must be at least 1",
    }
}

/// Rust source for the validated config constant
fn render(config: &LockConfig) -> String {
    let [d0, d1, d2] = config.default_combination;
    format!(
        "/// Lock configuration generated from lock.toml\n\
         pub const LOCK_CONFIG: LockConfig = LockConfig {{\n    \
             default_combination: [{}, {}, {}],\n    \
             first_digit_passes: {},\n    \
             second_digit_passes: {},\n    \
             third_digit_passes: {},\n    \
             max_failed_attempts: {},\n    \
             flash_half_period_ms: {},\n    \
             failure_flash_cycles: {},\n    \
             reset_combination_on_boot: {},\n\
         }};\n",
        d0,
        d1,
        d2,
        config.first_digit_passes,
        config.second_digit_passes,
        config.third_digit_passes,
        config.max_failed_attempts,
        config.flash_half_period_ms,
        config.failure_flash_cycles,
        config.reset_combination_on_boot,
    )
}

/// Abort the build with a boxed error message
fn fail(title: &str, details: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        details
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}
