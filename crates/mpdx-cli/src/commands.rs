use std::fs;

use anyhow::{Context, Result, anyhow};
use mpdx_cli::settings::Settings;
use mpdx_client::{HttpImportStore, ImportService, ImportSession};
use mpdx_model::{ConstantId, FieldId, HeaderTarget, ImportConfig, ImportStep};

use crate::cli::{ImportArgs, MapHeaderArgs, MapValueArgs, UploadArgs};
use crate::summary::{print_import, print_next_step, print_supported_headers};

pub fn run_headers(settings: &Settings) {
    print_supported_headers(&settings.import);
}

pub async fn run_upload(settings: &Settings, args: &UploadArgs) -> Result<()> {
    let contents = fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let file_name = args
        .file
        .file_name()
        .and_then(std::ffi::OsStr::to_str)
        .ok_or_else(|| anyhow!("{} is not a file name", args.file.display()))?;

    let mut session = session(settings, &args.account.account_list_id)?;
    let import = session.upload_file(file_name, contents).await?;
    print_import(import, &settings.import);
    print_next_step(Some(session.step()));
    Ok(())
}

pub async fn run_show(settings: &Settings, args: &ImportArgs) -> Result<()> {
    let service = service(settings)?;
    let import = service
        .get(&args.account.account_list_id, &args.import_id, None)
        .await?;
    print_import(&import, &settings.import);
    Ok(())
}

pub async fn run_map_header(settings: &Settings, args: &MapHeaderArgs) -> Result<()> {
    let mut session = session(settings, &args.import.account.account_list_id)?;
    session
        .resume(&args.import.import_id, ImportStep::Headers)
        .await?;
    for pair in &args.mappings {
        let (header, field) = split_pair(pair)?;
        session.set_header(header, parse_target(field)?)?;
    }
    let next = session.advance().await?;
    print_next_step(next);
    Ok(())
}

pub async fn run_map_value(settings: &Settings, args: &MapValueArgs) -> Result<()> {
    let field = FieldId::new(args.field.as_str())?;
    let mut session = session(settings, &args.import.account.account_list_id)?;
    session
        .resume(&args.import.import_id, ImportStep::Values)
        .await?;
    for pair in &args.mappings {
        let (raw, constant) = split_pair(pair)?;
        let constant = resolve_constant(&settings.import, &field, constant);
        session.set_value(&field, raw, constant)?;
    }
    let next = session.advance().await?;
    print_next_step(next);
    Ok(())
}

pub async fn run_finish(settings: &Settings, args: &ImportArgs) -> Result<()> {
    let mut session = session(settings, &args.account.account_list_id)?;
    session
        .resume(&args.import_id, ImportStep::Preview)
        .await?;
    let next = session.advance().await?;
    print_next_step(next);
    Ok(())
}

fn service(settings: &Settings) -> Result<ImportService<HttpImportStore>> {
    let store = HttpImportStore::new(settings.api.clone())?;
    Ok(ImportService::new(store, settings.import.clone()))
}

fn session(settings: &Settings, account_list_id: &str) -> Result<ImportSession<HttpImportStore>> {
    Ok(ImportSession::new(service(settings)?, account_list_id))
}

/// `LEFT=RIGHT`, split at the first `=`.
pub fn split_pair(pair: &str) -> Result<(&str, &str)> {
    pair.split_once('=')
        .map(|(left, right)| (left.trim(), right.trim()))
        .filter(|(left, _)| !left.is_empty())
        .ok_or_else(|| anyhow!("expected LEFT=RIGHT, got `{pair}`"))
}

/// `-` leaves the header out of the import.
pub fn parse_target(field: &str) -> Result<HeaderTarget> {
    if field == "-" {
        return Ok(HeaderTarget::Unmapped);
    }
    Ok(HeaderTarget::Field(FieldId::new(field)?))
}

/// Accept a constant id or its label (`Yes` for `true` on send appeals).
pub fn resolve_constant(config: &ImportConfig, field: &FieldId, input: &str) -> ConstantId {
    config
        .constants_for(field)
        .and_then(|descriptors| {
            descriptors
                .iter()
                .find(|descriptor| descriptor.value.eq_ignore_ascii_case(input))
        })
        .map_or_else(|| ConstantId::from_raw(Some(input)), |descriptor| descriptor.id.clone())
}
