use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use shiplog_persist::{ShipLog, ShipLogConfig};
use shiplog_script::{CreateLogArgs, ShiplogModule, STATUS_OK};
use shiplog_store::{LogGroup, LogStore, TimelineEntry};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let log = Arc::new(
        ShipLog::open(config.clone())
            .with_context(|| format!("opening ship log in {}", config.data_dir.display()))?,
    );
    let json = matches!(cli.format, OutputFormat::Json);

    match cli.command {
        Command::Create(args) => cmd_create(&log, args),
        Command::Append(args) => cmd_append(&log, args),
        Command::Show(args) => cmd_show(&log, args, json),
        Command::Types => cmd_types(&log, json),
        Command::Timeline(args) => cmd_timeline(&log, args, json),
        Command::Delete(args) => {
            if log.delete_group(args.handle)? {
                println!("Deleted {}", args.handle.to_string().yellow());
                Ok(())
            } else {
                anyhow::bail!("no log group {}", args.handle)
            }
        }
        Command::DeleteType(args) => {
            let removed = log.delete_type(&args.log_type)?;
            println!("Deleted {} log(s) of type {}", removed.to_string().bold(), args.log_type.cyan());
            Ok(())
        }
        Command::Save => {
            log.save()?;
            println!("{} Snapshot written to {}", "✓".green().bold(), config.snapshot_path().display());
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<ShipLogConfig> {
    let mut config = match &cli.config {
        Some(path) => ShipLogConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => ShipLogConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    Ok(config)
}

fn cmd_create(log: &ShipLog, args: CreateArgs) -> anyhow::Result<()> {
    let mut request = CreateLogArgs::new(args.id, args.name, args.log_type).with_overwrite(args.overwrite);
    if let Some(max_len) = args.max_len {
        request = request.with_max_len(max_len);
    }

    let key = request.key();
    let handle = log
        .create_log(key.clone(), request.options())
        .with_context(|| format!("creating log {key}"))?;
    println!("{} Created {} {}", "✓".green().bold(), handle.to_string().yellow(), key);
    Ok(())
}

fn cmd_append(log: &Arc<ShipLog>, args: AppendArgs) -> anyhow::Result<()> {
    let module = ShiplogModule::new(log.clone());
    if module.append_log(&args.id, &args.message) != STATUS_OK {
        anyhow::bail!("no log with id {:?}", args.id);
    }
    println!("{} Appended to {}", "✓".green(), display_id(&args.id).bold());
    Ok(())
}

fn cmd_show(log: &ShipLog, args: ShowArgs, json: bool) -> anyhow::Result<()> {
    let groups: Vec<LogGroup> = match (&args.id, &args.log_type) {
        (Some(id), _) => {
            let handle = log
                .resolve(id)?
                .with_context(|| format!("no log with id {id:?}"))?;
            log.group(handle)?.into_iter().collect()
        }
        (None, Some(log_type)) => log.groups_of_type(log_type)?,
        (None, None) => log.groups()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }
    if groups.is_empty() {
        println!("No logs.");
    }
    for group in &groups {
        print_group(group);
    }
    Ok(())
}

fn cmd_types(log: &ShipLog, json: bool) -> anyhow::Result<()> {
    let types = log.types()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&types)?);
    } else if types.is_empty() {
        println!("No logs.");
    } else {
        for t in types {
            println!("{}", t.cyan());
        }
    }
    Ok(())
}

fn cmd_timeline(log: &ShipLog, args: TimelineArgs, json: bool) -> anyhow::Result<()> {
    let entries: Vec<TimelineEntry> = log.timeline(args.limit)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    for e in entries {
        println!("{:>6}  {}  {}", format!("#{}", e.seq).dimmed(), e.handle.to_string().yellow(), e.message);
    }
    Ok(())
}

fn print_group(group: &LogGroup) {
    let bound = if group.is_bounded() {
        format!("{}/{}", group.len(), group.max_len)
    } else {
        format!("{}", group.len())
    };
    println!(
        "{}  {}  {}  [{}]  {}",
        group.handle.to_string().yellow().bold(),
        display_id(group.id.as_deref().unwrap_or("")).bold(),
        group.name,
        group.log_type.cyan(),
        bound.dimmed(),
    );
    for entry in &group.entries {
        println!("  {:>6}  {}", format!("#{}", entry.seq).dimmed(), entry.message);
    }
}

fn display_id(id: &str) -> String {
    if id.is_empty() {
        "<unnamed>".to_string()
    } else {
        id.to_string()
    }
}
