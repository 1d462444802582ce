use anyhow::{anyhow, Result};
use std::sync::Arc;
use xsolla_utils::{resolve, Brush, Color, Config, FontInfo, Theme, XsollaContext};

pub fn run(action: &crate::ThemeAction) -> Result<()> {
    use crate::ThemeAction;

    match action {
        ThemeAction::Show { theme, json } => show(theme.as_deref(), *json),
        ThemeAction::Color { name, theme } => color(name, theme.as_deref()),
        ThemeAction::Font { name, theme } => font(name, theme.as_deref()),
        ThemeAction::Brush { name, theme } => brush(name, theme.as_deref()),
        ThemeAction::List => list(),
        ThemeAction::Use { id } => use_theme(id),
    }
}

fn context() -> Result<XsollaContext> {
    Ok(XsollaContext::new(Config::load()?)?)
}

/// The requested theme, or the current one. `None` when no theme applies.
fn pick(ctx: &XsollaContext, id: Option<&str>) -> Option<Arc<Theme>> {
    match id {
        Some(id) => ctx.theme(Some(id)),
        None => ctx.current_theme(),
    }
}

fn show(id: Option<&str>, json: bool) -> Result<()> {
    let ctx = context()?;
    let theme = pick(&ctx, id).ok_or_else(|| match id {
        Some(id) => anyhow!("Unknown theme '{}'", id),
        None => anyhow!("No theme selected"),
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&*theme)?);
        return Ok(());
    }

    println!("Theme: {}", theme.id);
    println!();

    println!("Colors:");
    for (name, color) in &theme.colors {
        println!("  {:<24} {}", name, color);
    }
    println!();

    println!("Fonts:");
    for (name, font) in &theme.fonts {
        println!("  {:<24} {} {} {}", name, font.family, font.typeface, font.size);
    }
    println!();

    println!("Brushes:");
    for (name, brush) in &theme.brushes {
        println!(
            "  {:<24} {:?} tint {} radius {}",
            name, brush.draw, brush.tint, brush.corner_radius
        );
    }

    Ok(())
}

fn color(name: &str, id: Option<&str>) -> Result<()> {
    let ctx = context()?;
    let color: Color = resolve(pick(&ctx, id).as_deref(), name);
    println!("{}", color);
    Ok(())
}

fn font(name: &str, id: Option<&str>) -> Result<()> {
    let ctx = context()?;
    let font: FontInfo = resolve(pick(&ctx, id).as_deref(), name);

    if font.is_empty() {
        println!("(none)");
    } else {
        println!("{} {} {}", font.family, font.typeface, font.size);
    }
    Ok(())
}

fn brush(name: &str, id: Option<&str>) -> Result<()> {
    let ctx = context()?;
    let brush: Brush = resolve(pick(&ctx, id).as_deref(), name);
    println!("{}", serde_json::to_string_pretty(&brush)?);
    Ok(())
}

fn list() -> Result<()> {
    let ctx = context()?;
    let current = ctx.selection().theme_id();

    if ctx.theme_ids().is_empty() {
        println!("No themes configured");
        return Ok(());
    }

    for id in ctx.theme_ids() {
        let marker = if current.as_deref() == Some(id.as_str()) {
            "*"
        } else {
            " "
        };
        println!("{} {}", marker, id);
    }
    Ok(())
}

fn use_theme(id: &str) -> Result<()> {
    // Read the file directly so an environment override is not persisted
    let path = Config::default_path()?;
    let mut config = Config::load_from(&path)?;

    config.set("ui_builder.interface_theme", id)?;
    config.save_to(&path)?;

    println!("✓ Current theme: {}", id);
    Ok(())
}
