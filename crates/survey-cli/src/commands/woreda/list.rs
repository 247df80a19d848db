use serde::Serialize;
use survey_core::entities::LocationNode;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Flattened tree node for table output.
#[derive(Debug, Serialize)]
struct TreeRow {
    id: String,
    woreda: String,
    kebeles: String,
}

pub async fn run(tree: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !tree {
        let woredas = ctx.service.list_woredas().await?;
        return output(&woredas, flags.format);
    }

    let nodes = ctx.service.location_tree().await?;
    if matches!(flags.format, crate::cli::OutputFormat::Table) {
        output(&flatten(&nodes), flags.format)
    } else {
        output(&nodes, flags.format)
    }
}

fn flatten(nodes: &[LocationNode]) -> Vec<TreeRow> {
    nodes
        .iter()
        .map(|node| TreeRow {
            id: node.woreda.id.clone(),
            woreda: node.woreda.name.clone(),
            kebeles: node
                .kebeles
                .iter()
                .map(|k| k.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use survey_core::entities::{Kebele, LocationNode, Woreda};

    use super::flatten;

    fn node(name: &str, kebeles: &[&str]) -> LocationNode {
        let woreda = Woreda {
            id: format!("wrd-{name}"),
            name: name.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let kebeles = kebeles
            .iter()
            .enumerate()
            .map(|(i, k)| Kebele {
                id: format!("keb-{i}"),
                woreda_id: woreda.id.clone(),
                name: (*k).to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .collect();
        LocationNode { woreda, kebeles }
    }

    #[test]
    fn flattens_kebeles_in_order() {
        let rows = flatten(&[node("Mecha", &["Kebele 01", "Kebele 02"]), node("Bahir Dar", &[])]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].kebeles, "Kebele 01, Kebele 02");
        assert_eq!(rows[1].kebeles, "");
    }
}
