//! `links` command: prints the catalog.

use linkboot_core::{Config, Section};

pub fn run(config: &Config) {
    let catalog = config.catalog();
    for &section in Section::all() {
        let mut entries = catalog.section(section).peekable();
        if entries.peek().is_none() {
            continue;
        }
        println!("{}", section.tag());
        for (index, destination) in entries {
            println!("  {:>2}. {:<26} {}", index + 1, destination.label, destination.url);
        }
    }
}
