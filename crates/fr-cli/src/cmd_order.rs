use std::path::Path;

use anyhow::Result;

use fr_lang::{Model, topological_type_order};

/// Qualified type names of a snapshot, every dependency before its users.
pub fn type_order(path: &Path) -> Result<Vec<String>> {
    let model = Model::load(path)?;
    match topological_type_order(&model) {
        Ok(order) => Ok(order.into_iter().map(|id| model.qualified_type_name(id)).collect()),
        Err(cycle) => {
            let names: Vec<_> = cycle
                .types
                .iter()
                .map(|id| model.qualified_type_name(*id))
                .collect();
            anyhow::bail!("{cycle}: {}", names.join(", "))
        }
    }
}

pub fn run(file: &Path) -> Result<()> {
    for name in type_order(file)? {
        println!("{name}");
    }
    Ok(())
}
