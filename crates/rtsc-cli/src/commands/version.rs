use std::error::Error;
use std::process::Command;

use clap::Args;
use rtsc_core::provenance::source_revision;
use rtsc_core::to_canonical_json_string;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Emit git and toolchain information as JSON.
    #[arg(long)]
    pub long: bool,
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: String,
    git_commit: String,
    rustc: String,
}

pub fn run(args: &VersionArgs) -> Result<(), Box<dyn Error>> {
    if !args.long {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let rustc = Command::new("rustc")
        .arg("--version")
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
        .unwrap_or_else(|| "rustc unavailable".into());
    let info = VersionInfo {
        version: env!("CARGO_PKG_VERSION").into(),
        git_commit: source_revision().unwrap_or_else(|| "unknown".into()),
        rustc,
    };
    println!("{}", to_canonical_json_string(&info)?);
    Ok(())
}
