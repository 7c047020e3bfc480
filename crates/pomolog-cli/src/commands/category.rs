use clap::Subcommand;
use pomolog_core::CategoryRegistry;

use crate::state;

#[derive(Subcommand)]
pub enum CategoryAction {
    /// Add a name to the category list
    Add { name: String },
    /// Print the category list
    List,
}

pub fn run(action: CategoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let registry = CategoryRegistry::new(state::categories_path()?);

    let names = match action {
        CategoryAction::Add { name } => registry.add(&name)?,
        CategoryAction::List => registry.load()?,
    };
    for name in names {
        println!("{name}");
    }
    Ok(())
}
