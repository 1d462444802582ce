use anyhow::{anyhow, Result};
use xsolla_utils::{Config, XsollaContext};

pub fn run(widget_type: &str, library: Option<&str>) -> Result<()> {
    let ctx = XsollaContext::new(Config::load()?)?;

    let class = match library {
        Some(id) => {
            let library = ctx
                .widgets_library(Some(id))
                .ok_or_else(|| anyhow!("Unknown widgets library '{}'", id))?;
            library.widget(widget_type)
        }
        None => ctx.widget_class(widget_type),
    };

    match class {
        Some(class) => println!("{}", class),
        None => println!("(none)"),
    }

    Ok(())
}
