//! Build script for the VK photo backup CLI.
//!
//! Copies the `tokens.ini.example` template from the crate root into the
//! platform local data directory (`vkbackup/tokens.ini.example`) so users
//! find a ready-to-edit token file after installation. A missing template
//! only produces a cargo warning.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Re-run if the template changes
    println!("cargo:rerun-if-changed=tokens.ini.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template_path = manifest_dir.join("tokens.ini.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("vkbackup");
    fs::create_dir_all(&out_dir)?;

    if template_path.is_file() {
        let contents = fs::read_to_string(&template_path)?;
        fs::write(out_dir.join("tokens.ini.example"), contents)?;
    } else {
        println!(
            "cargo:warning=tokens.ini.example not found at {}",
            template_path.display()
        );
    }

    Ok(())
}
