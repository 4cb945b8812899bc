//! Rules command implementation

use fmtlint_core::plugin;
use miette::Result;

pub fn run_rules() -> Result<()> {
    let meta = plugin::meta();
    println!("{} {}", meta.name, meta.version);

    println!("\nRules:");
    for (id, rule) in plugin::rules() {
        let fixable = if rule.fixable.is_some() { " (fixable)" } else { "" };
        println!("  {}{}: {}", id, fixable, rule.docs.description);
        if let Some(url) = &rule.docs.url {
            println!("    {}", url);
        }
    }

    println!("\nConfigs:");
    for (name, preset) in plugin::configs() {
        println!("  {} ({}):", name, preset.name);
        for (id, level) in &preset.rules {
            println!("    {}: {}", id, level.as_str());
        }
    }

    Ok(())
}
