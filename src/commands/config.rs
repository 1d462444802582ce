use anyhow::Result;
use xsolla_utils::Config;

pub fn run(action: &crate::ConfigAction) -> Result<()> {
    use crate::ConfigAction;

    match action {
        ConfigAction::Show => show_config(),
        ConfigAction::Path => show_path(),
        ConfigAction::Set { key, value } => set_config(key, value),
    }
}

fn format_selection(id: Option<&str>) -> &str {
    id.unwrap_or("(none)")
}

fn show_config() -> Result<()> {
    let config = Config::load()?;
    let config_path = Config::default_path()?;

    println!();
    println!("  📁 Config file: {}", config_path.display());
    println!();

    println!("┌─ Image Loader ───────────────────────────────────────────────────────────────┐");
    println!("│  Timeout:     {}s", config.image_loader.timeout_seconds);
    println!("│  User agent:  {}", config.image_loader.user_agent);
    println!("└──────────────────────────────────────────────────────────────────────────────┘");
    println!();

    println!("┌─ UI Builder ─────────────────────────────────────────────────────────────────┐");
    println!(
        "│  Interface theme:  {}",
        format_selection(config.ui_builder.interface_theme())
    );
    println!(
        "│  Widgets library:  {}",
        format_selection(config.ui_builder.widgets_library())
    );
    println!(
        "│  Type slots:       {} widget, {} color, {} font, {} brush",
        config.ui_builder.widget_types.len(),
        config.ui_builder.color_types.len(),
        config.ui_builder.font_types.len(),
        config.ui_builder.brush_types.len()
    );
    println!("└──────────────────────────────────────────────────────────────────────────────┘");
    println!();

    println!("┌─ Registries ─────────────────────────────────────────────────────────────────┐");
    for (id, theme) in &config.themes {
        println!(
            "│  theme {:<16} {} colors, {} fonts, {} brushes",
            id,
            theme.colors.len(),
            theme.fonts.len(),
            theme.brushes.len()
        );
    }
    for (id, library) in &config.widget_libraries {
        println!("│  library {:<14} {} widgets", id, library.widgets.len());
    }
    println!("└──────────────────────────────────────────────────────────────────────────────┘");
    println!();

    println!("  💡 Change settings with: xsolla-utils config set <key> <value>");
    println!();

    Ok(())
}

fn show_path() -> Result<()> {
    println!("{}", Config::default_path()?.display());
    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    // Environment overrides apply to reads only; edit the file as stored
    let path = Config::default_path()?;
    let mut config = Config::load_from(&path)?;

    config.set(key, value)?;
    config.save_to(&path)?;

    println!("✓ Set {} = {}", key, value);
    Ok(())
}
