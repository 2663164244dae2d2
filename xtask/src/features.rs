use std::process::Command;

use anyhow::{Context, Result};

/// `None` builds without default features; `Some(&[])` is the default set.
const FEATURE_COMBINATIONS: &[Option<&[&str]>] = &[Some(&[]), None, Some(&["keychain"])];

/// Check that every supported bidkiosk-infra feature combination compiles.
pub fn test_feature_matrix() -> Result<()> {
    println!("Testing {} bidkiosk-infra feature combinations...", FEATURE_COMBINATIONS.len());

    for (index, features) in FEATURE_COMBINATIONS.iter().enumerate() {
        let mut args = vec!["check".to_string(), "-p".to_string(), "bidkiosk-infra".to_string()];
        let label = match features {
            Some([]) => "default".to_string(),
            Some(list) => {
                let joined = list.join(",");
                args.extend(["--no-default-features".to_string(), "--features".to_string()]);
                args.push(joined.clone());
                joined
            }
            None => {
                args.push("--no-default-features".to_string());
                "no-default-features".to_string()
            }
        };

        println!("\n[{}/{}] cargo {}", index + 1, FEATURE_COMBINATIONS.len(), args.join(" "));

        let status = Command::new("cargo")
            .args(&args)
            .status()
            .with_context(|| format!("Failed to run cargo check for '{label}'"))?;

        if !status.success() {
            anyhow::bail!("Feature combination '{label}' failed to compile");
        }

        println!("Features '{label}' compiled successfully");
    }

    println!("\nAll {} feature combinations compile successfully!", FEATURE_COMBINATIONS.len());

    Ok(())
}
