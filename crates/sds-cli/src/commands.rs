//! Command implementations.
//!
//! The register lives in an XLSX workbook on disk. Every command loads it
//! into a [`Session`], works through the session operations, and writes the
//! workbook back; a failed import never touches the file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Local;
use tracing::info;

use sds_core::{Session, SubstanceRegistry};
use sds_model::SubstanceDraft;
use sds_xlsx::{EXPORT_FILE_NAME, read_register, write_register};

use crate::cli::{AddArgs, ExportArgs, ImportArgs, InitArgs, ListArgs};
use crate::render::register_table;

pub fn run_init(args: &InitArgs) -> Result<()> {
    if args.register.exists() && !args.force {
        bail!(
            "register {} already exists (use --force to overwrite)",
            args.register.display()
        );
    }
    let registry = if args.seed {
        SubstanceRegistry::seed()
    } else {
        SubstanceRegistry::new()
    };
    write_register(&args.register, registry.records())
        .with_context(|| format!("write register {}", args.register.display()))?;
    info!(records = registry.len(), "register created");
    println!(
        "Created {} with {} record(s)",
        args.register.display(),
        registry.len()
    );
    Ok(())
}

pub fn run_add(args: &AddArgs) -> Result<()> {
    let mut session = load_session(&args.register)?;
    let record = SubstanceDraft::new()
        .name(&args.name)
        .producer(&args.producer)
        .sds_date(&args.date)
        .link(&args.link)
        .notes(&args.notes)
        .ghs_codes(&args.ghs)
        .build();
    session.add_substance(record);
    store_session(&args.register, &session)?;
    println!(
        "Added substance to {} ({} record(s) total)",
        args.register.display(),
        session.registry().len()
    );
    Ok(())
}

pub fn run_list(args: &ListArgs) -> Result<()> {
    let session = load_session(&args.register)?;
    let records = match &args.filter {
        Some(term) => session.search_substances(term),
        None => session.registry().list(),
    };
    let today = Local::now().date_naive();
    println!("{}", register_table(&records, today));
    println!(
        "{} of {} record(s)",
        records.len(),
        session.registry().len()
    );
    Ok(())
}

pub fn run_export(args: &ExportArgs) -> Result<()> {
    let session = load_session(&args.register)?;
    let bytes = session
        .export_registry()
        .context("encode register workbook")?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| EXPORT_FILE_NAME.into());
    fs::write(&output, bytes).with_context(|| format!("write {}", output.display()))?;
    info!(records = session.registry().len(), output = %output.display(), "register exported");
    println!(
        "Exported {} record(s) to {}",
        session.registry().len(),
        output.display()
    );
    Ok(())
}

pub fn run_import(args: &ImportArgs) -> Result<()> {
    let mut session = load_session(&args.register)?;
    let bytes =
        fs::read(&args.file).with_context(|| format!("read {}", args.file.display()))?;
    let count = session
        .import_registry(&bytes)
        .with_context(|| format!("import {}", args.file.display()))?;
    store_session(&args.register, &session)?;
    println!(
        "Imported {} record(s) into {}",
        count,
        args.register.display()
    );
    Ok(())
}

fn load_session(register: &Path) -> Result<Session> {
    let records = read_register(register)
        .with_context(|| format!("read register {}", register.display()))?;
    Ok(Session::with_registry(SubstanceRegistry::from_records(
        records,
    )))
}

fn store_session(register: &Path, session: &Session) -> Result<()> {
    write_register(register, session.registry().records())
        .with_context(|| format!("write register {}", register.display()))
}
