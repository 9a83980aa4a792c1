use chrono::Local;
use clap::Parser;
use colored::*;
use snapz::api::{CmdMessage, IndexRow, MessageLevel, SnapzApi};
use snapz::commands;
use snapz::config::SnapzConfig;
use snapz::editor;
use snapz::error::{Result, SnapzError};
use snapz::model::Document;
use snapz::pictures;
use snapz::store::fs::FileStore;
use snapz::timestamp::Timestamp;

mod args;
use args::{Cli, Commands};

const DESCRIBE_FILENAME: &str = "DESCRIBE.md";
const DOCUMENT_FILENAME: &str = "DOCUMENT.txt";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: SnapzApi<FileStore>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context()?;

    match cli.command {
        Commands::List { n } => handle_list(&ctx, n),
        Commands::Get { id, latest } => handle_get(&ctx, id, latest),
        Commands::Latest => handle_deprecated_latest(&ctx, "latest"),
        Commands::Last => handle_deprecated_latest(&ctx, "last"),
        Commands::Search { query } => handle_search(&ctx, query),
        Commands::Tag {
            id,
            modification,
            dry_run,
        } => handle_tag(&mut ctx, id, modification, dry_run),
        Commands::Untag { id, tag_names } => handle_untag(&mut ctx, id, tag_names),
        Commands::Describe { id, latest } => handle_describe(&mut ctx, id, latest),
        Commands::Document { tag_name } => handle_document(&mut ctx, tag_name),
        Commands::Index { tag_names } => handle_index(&ctx, tag_names),
        Commands::RebuildIndex => handle_rebuild_index(&mut ctx),
        Commands::Backup => handle_backup(&ctx),
    }
}

fn init_context() -> Result<AppContext> {
    let pictures = pictures::discover()?;
    let config = SnapzConfig::load(".")?;
    let store = FileStore::new(".");
    let api = SnapzApi::initialize(store, ".", &pictures, config)?;
    Ok(AppContext { api })
}

fn handle_list(ctx: &AppContext, n: Option<u32>) -> Result<()> {
    let count = n.map(|n| n as usize).unwrap_or(commands::list::DEFAULT_COUNT);
    let result = ctx.api.list(count)?;
    print_docs(&result.docs);
    print_messages(&result.messages);
    Ok(())
}

fn handle_get(ctx: &AppContext, id: Option<String>, latest: bool) -> Result<()> {
    let result = match (id, latest) {
        (Some(id), false) => ctx.api.get(&id)?,
        (None, true) => ctx.api.latest()?,
        _ => return Err(SnapzError::Api("Invalid input".into())),
    };
    print_docs(&result.docs);
    print_messages(&result.messages);
    Ok(())
}

fn handle_deprecated_latest(ctx: &AppContext, name: &str) -> Result<()> {
    print_messages(&[CmdMessage::warning(format!(
        "Command \"{name}\" is deprecated. Use \"get --latest\" instead.\n"
    ))]);
    let result = ctx.api.latest()?;
    print_docs(&result.docs);
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &AppContext, query: Vec<String>) -> Result<()> {
    let result = ctx.api.search(&query.join(" "))?;
    print_docs(&result.docs);
    print_messages(&result.messages);
    Ok(())
}

fn handle_tag(
    ctx: &mut AppContext,
    id: String,
    modification: Vec<String>,
    dry_run: bool,
) -> Result<()> {
    let line = modification.join(" ");
    let result = ctx
        .api
        .tag(std::slice::from_ref(&id), &line, dry_run)?;
    print_docs(&result.docs);
    print_messages(&result.messages);
    Ok(())
}

fn handle_untag(ctx: &mut AppContext, id: String, tag_names: Vec<String>) -> Result<()> {
    print_messages(&[CmdMessage::warning(
        "Command \"untag\" is deprecated. Use \"tag\" instead.\n".to_string(),
    )]);
    let result = ctx.api.untag(std::slice::from_ref(&id), &tag_names)?;
    print_docs(&result.docs);
    print_messages(&result.messages);
    Ok(())
}

fn handle_describe(ctx: &mut AppContext, id: Option<String>, latest: bool) -> Result<()> {
    let doc = match (id, latest) {
        (Some(id), false) => ctx.api.get(&id)?.docs.into_iter().next(),
        (None, true) => ctx.api.latest()?.docs.into_iter().next(),
        _ => {
            return Err(SnapzError::Api(
                "Must provide exactly one of \"--latest\" or <id>".into(),
            ))
        }
    };
    let Some(doc) = doc else {
        print_docs(&[]);
        return Ok(());
    };

    let initial = doc.description.clone().unwrap_or_default();
    let buffer = editor::edit_buffer(DESCRIBE_FILENAME, &initial)?;

    let result = ctx.api.set_description(&doc.id, buffer)?;
    print_docs(&result.docs);
    print_messages(&result.messages);
    Ok(())
}

fn handle_document(ctx: &mut AppContext, tag_name: Option<String>) -> Result<()> {
    let entries = ctx.api.document_entries(tag_name.as_deref())?;
    let formatted = commands::document::format_entries(&entries);
    let buffer = editor::edit_buffer(DOCUMENT_FILENAME, &formatted)?;

    let result = ctx.api.update_documentation(tag_name.as_deref(), &buffer)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_index(ctx: &AppContext, tag_names: Vec<String>) -> Result<()> {
    let result = ctx.api.index(&tag_names)?;
    print_index_rows(&result.index_rows);
    print_messages(&result.messages);
    Ok(())
}

fn handle_rebuild_index(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.rebuild_index()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_backup(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.backup()?;
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn print_docs(docs: &[Document]) {
    if docs.is_empty() {
        println!("No documents found.");
        return;
    }

    let divider = "-".repeat(40);
    for (i, doc) in docs.iter().enumerate() {
        if i > 0 {
            println!("{}", divider);
        }
        print_doc(doc);
    }

    let noun = if docs.len() == 1 {
        "document"
    } else {
        "documents"
    };
    println!("{}", format!("{} {}", docs.len(), noun).dimmed());
}

fn print_doc(doc: &Document) {
    match format_age(doc) {
        Some(age) => println!("Id   | {}  {}", doc.id, age.dimmed()),
        None => println!("Id   | {}", doc.id),
    }
    println!("File | {}", doc.file_path);
    println!("Tags | {}", doc.tag_summary());

    // Descriptions are stored verbatim; trim only for display.
    if let Some(description) = doc.description.as_deref() {
        let description = description.trim_end();
        if !description.is_empty() {
            println!("Desc | {}", description);
        }
    }
}

fn format_age(doc: &Document) -> Option<String> {
    let timestamp = Timestamp::parse_id(&doc.id).ok()?;
    let age = Local::now()
        .naive_local()
        .signed_duration_since(timestamp.datetime());

    let formatter = timeago::Formatter::new();
    Some(formatter.convert(age.to_std().unwrap_or_default()))
}

fn print_index_rows(rows: &[IndexRow]) {
    for row in rows {
        println!("  {}", row.name);
        for value in &row.values {
            println!("    {}", value);
        }
    }
}
