//! Generates the validators for the annotated modules into `OUT_DIR`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use vgen_core::{EmitOptions, Generator, RustSource};

const SOURCES: &[&str] = &["src/user.rs", "src/roster.rs", "src/tally.rs"];

fn main() -> Result<()> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").context("OUT_DIR is not set")?);
    let generator = Generator::new(EmitOptions::default());

    for source in SOURCES {
        println!("cargo:rerun-if-changed={source}");
        generate(&generator, Path::new(source), &out_dir)?;
    }

    Ok(())
}

fn generate(generator: &Generator, input: &Path, out_dir: &Path) -> Result<()> {
    let source = RustSource::from_path(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let generated = generator
        .generate(&source)
        .with_context(|| format!("generating validators for {}", input.display()))?;

    let stem = input
        .file_stem()
        .context("source file has no name")?
        .to_string_lossy();
    let target = out_dir.join(format!("{stem}_vgen.rs"));

    fs::write(&target, generated.content)
        .with_context(|| format!("writing {}", target.display()))?;

    Ok(())
}
