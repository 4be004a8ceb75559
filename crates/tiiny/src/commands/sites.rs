//! Site command handlers: create, update, delete.

use serde_json::Value;
use tiiny_core::{BinaryData, DEFAULT_BINARY_PROPERTY, Item, Operation, Publisher, SiteParams};

use crate::cli::{
    CreateArgs, CreateHtmlArgs, DeleteArgs, GlobalOpts, PlacementArgs, ProtectionArgs,
    UpdateArgs, UpdateHtmlArgs,
};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Item building ───────────────────────────────────────────────────

fn base_params(protection: ProtectionArgs) -> SiteParams {
    SiteParams {
        password_protected: protection.password.is_some(),
        password: protection.password.unwrap_or_default(),
        ..SiteParams::default()
    }
}

fn placed(mut params: SiteParams, placement: PlacementArgs, default_suffix: &str) -> SiteParams {
    params.subdomain = placement.subdomain.unwrap_or_default();
    params.domain_suffix = placement
        .suffix
        .unwrap_or_else(|| default_suffix.to_owned());
    params
}

fn file_item(
    params: SiteParams,
    path: &std::path::Path,
    file_name: Option<String>,
) -> Result<Item, CliError> {
    let data = util::read_bytes(path)?;
    let binary = BinaryData {
        file_name: file_name.or_else(|| util::file_name_of(path)),
        data,
    };
    Ok(Item::new(params).with_binary(DEFAULT_BINARY_PROPERTY, binary))
}

fn html_item(mut params: SiteParams, path: &std::path::Path) -> Result<Item, CliError> {
    params.html_content = Some(util::read_text(path)?);
    Ok(Item::new(params))
}

// ── Rendering ───────────────────────────────────────────────────────

fn print_site(global: &GlobalOpts, value: &Value, fallback: &str) {
    let out = output::render_single(&global.output, value, output::value_detail, |v| {
        v.get("link")
            .map_or_else(|| fallback.to_owned(), output::scalar)
    });
    output::print_output(&out, global.quiet);
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn create(
    publisher: &Publisher,
    args: CreateArgs,
    default_suffix: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let params = placed(base_params(args.protection), args.placement, default_suffix);
    let item = file_item(params, &args.file, args.file_name)?;

    let result = publisher.dispatch_operation(Operation::Create, &item).await?;
    print_site(global, &result, "");
    Ok(())
}

pub async fn create_html(
    publisher: &Publisher,
    args: CreateHtmlArgs,
    default_suffix: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let params = placed(base_params(args.protection), args.placement, default_suffix);
    let item = html_item(params, &args.html)?;

    let result = publisher
        .dispatch_operation(Operation::CreateHtml, &item)
        .await?;
    print_site(global, &result, "");
    Ok(())
}

pub async fn update(
    publisher: &Publisher,
    args: UpdateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut params = base_params(args.protection);
    params.link = Some(args.link.clone());
    let item = file_item(params, &args.file, args.file_name)?;

    let result = publisher.dispatch_operation(Operation::Update, &item).await?;
    print_site(global, &result, &args.link);
    Ok(())
}

pub async fn update_html(
    publisher: &Publisher,
    args: UpdateHtmlArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut params = base_params(args.protection);
    params.link = Some(args.link.clone());
    let item = html_item(params, &args.html)?;

    let result = publisher
        .dispatch_operation(Operation::UpdateHtml, &item)
        .await?;
    print_site(global, &result, &args.link);
    Ok(())
}

pub async fn delete(
    publisher: &Publisher,
    args: DeleteArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if !util::confirm(
        &format!("Delete site '{}'? This is destructive.", args.link),
        "delete",
        global.yes,
    )? {
        return Ok(());
    }

    let params = SiteParams {
        link: Some(args.link.clone()),
        ..SiteParams::default()
    };
    let result = publisher
        .dispatch_operation(Operation::Delete, &Item::new(params))
        .await?;

    print_site(global, &result, &args.link);
    if !global.quiet {
        eprintln!("Site deleted");
    }
    Ok(())
}
