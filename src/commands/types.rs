use anyhow::Result;
use xsolla_utils::{Config, EntityKind};

pub fn run(kind: Option<crate::TypeKind>) -> Result<()> {
    use crate::TypeKind;

    let config = Config::load()?;

    let kinds: Vec<EntityKind> = match kind {
        Some(TypeKind::Widget) => vec![EntityKind::Widget],
        Some(TypeKind::Color) => vec![EntityKind::Color],
        Some(TypeKind::Font) => vec![EntityKind::Font],
        Some(TypeKind::Brush) => vec![EntityKind::Brush],
        None => EntityKind::ALL.to_vec(),
    };

    for (i, kind) in kinds.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{} types:", kind);

        let types = config.ui_builder.entity_types(*kind);
        for (slot, name) in types.iter() {
            println!("  {:>2}  {}", slot, name);
        }
    }

    Ok(())
}
