use std::path::Path;

use anyhow::{Context, Result};

use crate::commands::print_json;
use crate::payload::read_json_object;
use crate::templates::TemplateStore;

pub fn list(store: &TemplateStore) -> Result<()> {
    let names = store.list()?;
    if names.is_empty() {
        eprintln!("No templates in {}.", store.path().display());
    }
    for name in names {
        println!("- {}", name);
    }
    Ok(())
}

pub fn show(store: &TemplateStore, name: &str) -> Result<()> {
    print_json(&store.get(name)?)
}

pub fn add(store: &TemplateStore, name: &str, file: &Path) -> Result<()> {
    let payload = read_json_object(file).context("Invalid template payload")?;
    let replaced = store.add(name, payload)?;

    if replaced {
        println!("Replaced template '{}'.", name);
    } else {
        println!("Added template '{}'.", name);
    }
    Ok(())
}

pub fn remove(store: &TemplateStore, name: &str) -> Result<()> {
    store.remove(name)?;
    println!("Removed template '{}'.", name);
    Ok(())
}
