//! Colored plain-text rendering for the one-shot commands.

use colored::*;
use std::fmt::Write;

use crate::dashboard::ToolOutput;
use crate::maps::MapLinks;
use crate::model::{CompanyLocation, Recipe, SupplyChainData};

/// Render any tool output for the terminal.
pub fn format_output(output: &ToolOutput, links: &MapLinks) -> String {
    match output {
        ToolOutput::Recipe(recipe) => format_recipe(recipe),
        ToolOutput::Location(location) => format_location(location, links),
        ToolOutput::SupplyChain(data) => format_supply_chain(data, links),
    }
}

pub fn format_recipe(recipe: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", recipe.title.cyan().bold());
    let _ = writeln!(
        out,
        "{} {} | {} {} min | {} {}",
        "Calories:".bold(),
        recipe.calories,
        "Time:".bold(),
        recipe.prep_time_minutes,
        "Difficulty:".bold(),
        recipe.difficulty
    );
    let _ = writeln!(out, "\n{}", "Ingredients".bold());
    for ingredient in &recipe.ingredients {
        let _ = writeln!(out, "  • {} {}", ingredient.amount, ingredient.name);
    }
    let _ = writeln!(out, "\n{}", "Instructions".bold());
    for (i, step) in recipe.instructions.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, step);
    }
    out
}

pub fn format_location(location: &CompanyLocation, links: &MapLinks) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", location.name.green().bold());
    let _ = writeln!(out, "{}", location.address);
    let _ = writeln!(
        out,
        "{} {}   {} {}",
        "Latitude:".bold(),
        location.coordinates.lat,
        "Longitude:".bold(),
        location.coordinates.lng
    );
    let _ = writeln!(out, "{} {}", "Open in Google Maps →".green(), links.for_location(location));
    out
}

pub fn format_supply_chain(data: &SupplyChainData, links: &MapLinks) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} ({}/{} located)",
        "Supply Chain for:".cyan().bold(),
        data.product,
        data.found_count(),
        data.supply_chain.len()
    );
    for node in &data.supply_chain {
        let bar = if node.is_found() { "┃".green() } else { "┃".red() };
        let _ = writeln!(out);
        let _ = writeln!(out, "{} {}  [{}]", bar, node.company_name.bold(), node.role.dimmed());
        let Some(address) = node.address() else {
            let _ = writeln!(out, "{} ❌ Location not found", bar);
            continue;
        };
        let _ = writeln!(out, "{} 📍 {}", bar, address);
        if let Some(coordinates) = node.coordinates() {
            let _ = writeln!(
                out,
                "{} {} {}",
                bar,
                "View on Map ↗".green(),
                links.for_coordinates(coordinates)
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinates, Ingredient, Resolution, SupplyChainNode};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_format_recipe() {
        plain();
        let recipe = Recipe {
            title: "Broccoli Rice".to_string(),
            difficulty: "Easy".to_string(),
            prep_time_minutes: 20,
            calories: 380,
            ingredients: vec![Ingredient {
                name: "broccoli".to_string(),
                amount: "1 head".to_string(),
            }],
            instructions: vec!["Chop".to_string(), "Steam".to_string()],
        };
        let out = format_recipe(&recipe);
        assert!(out.starts_with("Broccoli Rice\n"));
        assert!(out.contains("Calories: 380 | Time: 20 min | Difficulty: Easy"));
        assert!(out.contains("  • 1 head broccoli"));
        assert!(out.find("1. Chop").unwrap() < out.find("2. Steam").unwrap());
    }

    #[test]
    fn test_format_location() {
        plain();
        let location = CompanyLocation {
            name: "Acme".to_string(),
            address: "1 Main St".to_string(),
            coordinates: Coordinates { lat: 1.25, lng: -3.5 },
        };
        let out = format_location(&location, &MapLinks::default());
        assert!(out.contains("Latitude: 1.25   Longitude: -3.5"));
        assert!(out.contains("query=Acme%201%20Main%20St"));
    }

    #[test]
    fn test_format_supply_chain() {
        plain();
        let data = SupplyChainData {
            product: "Widget".to_string(),
            supply_chain: vec![
                SupplyChainNode {
                    company_name: "Foxconn".to_string(),
                    role: "Assembler".to_string(),
                    location_query: "Foxconn Zhengzhou".to_string(),
                    resolution: Resolution::Found {
                        address: "Zhengzhou, China".to_string(),
                        coordinates: Some(Coordinates { lat: 34.75, lng: 113.62 }),
                    },
                },
                SupplyChainNode {
                    company_name: "Obscure Sub Ltd".to_string(),
                    role: "Component Supplier".to_string(),
                    location_query: "Obscure Sub Ltd".to_string(),
                    resolution: Resolution::NotFound,
                },
            ],
        };
        let out = format_supply_chain(&data, &MapLinks::default());
        assert!(out.contains("Supply Chain for: Widget (1/2 located)"));
        assert!(out.find("Foxconn").unwrap() < out.find("Obscure Sub Ltd").unwrap());
        assert_eq!(out.matches("View on Map").count(), 1);
        assert!(out.contains("❌ Location not found"));
    }
}
