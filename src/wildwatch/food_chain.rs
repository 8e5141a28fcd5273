use crate::wildwatch::normalize::{FieldValue, normalize_opt};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoodChainStage {
    pub name: String,
    pub role: &'static str,
}

fn role_for(index: usize, total: usize) -> &'static str {
    if index == 0 {
        return "Producer";
    }
    if index + 1 == total {
        return "Decomposer";
    }
    match index {
        1 => "Primary Consumer",
        2 => "Secondary Consumer",
        3 => "Tertiary Consumer",
        4 => "Apex Predator",
        _ => "Consumer",
    }
}

/// Split `producer -> herbivore -> predator` text into labelled stages.
pub fn parse_stages(chain: &str) -> Vec<FoodChainStage> {
    let names: Vec<&str> = chain
        .split("->")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    let total = names.len();
    names
        .into_iter()
        .enumerate()
        .map(|(index, name)| FoodChainStage {
            name: name.to_string(),
            role: role_for(index, total),
        })
        .collect()
}

pub fn stages_for(field: Option<&FieldValue>) -> Vec<FoodChainStage> {
    parse_stages(&normalize_opt(field))
}
