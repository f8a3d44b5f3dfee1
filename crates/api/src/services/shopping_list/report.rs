//! Ingredient aggregation and plain-text rendering.

use std::collections::BTreeMap;
use std::fmt::Write;

use super::ShoppingListError;
use crate::models::IngredientLine;

/// Header label preceding the number of recipes in the list.
pub const HEADER_LABEL: &str = "Отобрано рецептов";

/// MIME type of the rendered list.
pub const CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// One aggregated ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListItem {
    /// Ingredient name.
    pub name: String,
    /// Measurement unit shared by every merged line.
    pub measurement_unit: String,
    /// Sum of the amounts of every merged line.
    pub total: u64,
}

/// Aggregated ingredients of every recipe in a cart, sorted by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingList {
    recipe_count: usize,
    items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    /// Number of recipes that contributed at least one ingredient.
    #[must_use]
    pub const fn recipe_count(&self) -> usize {
        self.recipe_count
    }

    /// Aggregated items in ascending name order.
    #[must_use]
    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    /// Render the list as plain text.
    ///
    /// ```text
    /// Отобрано рецептов: 2
    /// Egg (pcs) — 2
    /// Flour (g) — 300
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{HEADER_LABEL}: {}", self.recipe_count);
        for item in &self.items {
            let _ = writeln!(
                out,
                "{} ({}) — {}",
                item.name, item.measurement_unit, item.total
            );
        }
        out
    }

    /// Render the list as a downloadable file named `<stem>.txt`.
    #[must_use]
    pub fn export(&self, stem: &str) -> ShoppingListExport {
        ShoppingListExport {
            filename: format!("{stem}.txt"),
            body: self.render(),
        }
    }
}

/// A rendered shopping list ready to be sent as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListExport {
    /// Suggested download filename.
    pub filename: String,
    /// Plain-text body.
    pub body: String,
}

impl ShoppingListExport {
    /// `Content-Disposition` header value for this export.
    #[must_use]
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

#[derive(Debug)]
struct Accumulator {
    measurement_unit: String,
    total: u64,
}

/// Merges ingredient lines by exact ingredient name.
///
/// Names are compared byte for byte: no case folding, no trimming.
#[derive(Debug, Default)]
pub struct Aggregator {
    totals: BTreeMap<String, Accumulator>,
    recipe_count: usize,
}

impl Aggregator {
    /// Create an empty aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every line of one recipe.
    ///
    /// Units are checked before anything is merged, so a rejected recipe
    /// leaves the aggregator unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ShoppingListError::UnitConflict` if a line's unit differs
    /// from the unit already recorded for the same name, or from another
    /// line of the same recipe.
    pub fn add_recipe(&mut self, lines: &[IngredientLine]) -> Result<(), ShoppingListError> {
        if lines.is_empty() {
            return Ok(());
        }

        self.check_units(lines)?;

        for line in lines {
            self.totals
                .entry(line.name.clone())
                .and_modify(|acc| acc.total += line.amount.get())
                .or_insert_with(|| Accumulator {
                    measurement_unit: line.measurement_unit.clone(),
                    total: line.amount.get(),
                });
        }

        self.recipe_count += 1;
        Ok(())
    }

    fn check_units(&self, lines: &[IngredientLine]) -> Result<(), ShoppingListError> {
        let mut seen: BTreeMap<&str, &str> = BTreeMap::new();

        for line in lines {
            let known = self
                .totals
                .get(&line.name)
                .map(|acc| acc.measurement_unit.as_str())
                .or_else(|| seen.get(line.name.as_str()).copied());

            match known {
                Some(unit) if unit != line.measurement_unit => {
                    return Err(ShoppingListError::UnitConflict {
                        name: line.name.clone(),
                        first_unit: unit.to_string(),
                        second_unit: line.measurement_unit.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    seen.insert(&line.name, &line.measurement_unit);
                }
            }
        }

        Ok(())
    }

    /// Finish aggregation, yielding items in ascending name order.
    #[must_use]
    pub fn finish(self) -> ShoppingList {
        let items = self
            .totals
            .into_iter()
            .map(|(name, acc)| ShoppingListItem {
                name,
                measurement_unit: acc.measurement_unit,
                total: acc.total,
            })
            .collect();

        ShoppingList {
            recipe_count: self.recipe_count,
            items,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use foodgram_core::Amount;

    use super::*;

    fn line(name: &str, unit: &str, amount: i64) -> IngredientLine {
        IngredientLine::new(name, unit, Amount::new(amount).unwrap())
    }

    #[test]
    fn test_empty_aggregator_renders_zero_header() {
        let list = Aggregator::new().finish();
        assert_eq!(list.recipe_count(), 0);
        assert!(list.items().is_empty());
        assert_eq!(list.render(), "Отобрано рецептов: 0\n");
    }

    #[test]
    fn test_same_name_amounts_are_summed() {
        let mut agg = Aggregator::new();
        agg.add_recipe(&[line("Sugar", "g", 10)]).unwrap();
        agg.add_recipe(&[line("Sugar", "g", 15)]).unwrap();

        let list = agg.finish();
        assert_eq!(
            list.items(),
            &[ShoppingListItem {
                name: "Sugar".to_string(),
                measurement_unit: "g".to_string(),
                total: 25,
            }]
        );
        assert!(list.render().contains("Sugar (g) — 25\n"));
    }

    #[test]
    fn test_items_sorted_by_name() {
        let mut agg = Aggregator::new();
        agg.add_recipe(&[line("Salt", "g", 5)]).unwrap();
        agg.add_recipe(&[line("Flour", "g", 100), line("Milk", "ml", 200)])
            .unwrap();

        let names: Vec<_> = agg
            .finish()
            .items()
            .iter()
            .map(|i| i.name.clone())
            .collect();
        assert_eq!(names, vec!["Flour", "Milk", "Salt"]);
    }

    #[test]
    fn test_names_compared_exactly() {
        let mut agg = Aggregator::new();
        agg.add_recipe(&[line("salt", "g", 1), line("Salt", "g", 2), line("Salt ", "g", 3)])
            .unwrap();

        let list = agg.finish();
        assert_eq!(list.items().len(), 3);
        // Byte order puts uppercase before lowercase.
        assert_eq!(list.items()[0].name, "Salt");
        assert_eq!(list.items()[1].name, "Salt ");
        assert_eq!(list.items()[2].name, "salt");
    }

    #[test]
    fn test_unit_conflict_is_rejected() {
        let mut agg = Aggregator::new();
        agg.add_recipe(&[line("Salt", "g", 5)]).unwrap();
        let err = agg.add_recipe(&[line("Salt", "tsp", 1)]).unwrap_err();

        match err {
            ShoppingListError::UnitConflict {
                name,
                first_unit,
                second_unit,
            } => {
                assert_eq!(name, "Salt");
                assert_eq!(first_unit, "g");
                assert_eq!(second_unit, "tsp");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejected_recipe_leaves_totals_untouched() {
        let mut agg = Aggregator::new();
        agg.add_recipe(&[line("Flour", "g", 200), line("Salt", "g", 5)])
            .unwrap();

        // Flour would merge fine, but Salt conflicts.
        let err = agg
            .add_recipe(&[line("Flour", "g", 100), line("Salt", "tsp", 1)])
            .unwrap_err();
        assert!(matches!(err, ShoppingListError::UnitConflict { .. }));

        let list = agg.finish();
        assert_eq!(list.recipe_count(), 1);
        assert_eq!(
            list.render(),
            "Отобрано рецептов: 1\nFlour (g) — 200\nSalt (g) — 5\n"
        );
    }

    #[test]
    fn test_unit_conflict_within_one_recipe() {
        let mut agg = Aggregator::new();
        let err = agg
            .add_recipe(&[line("Salt", "g", 5), line("Salt", "pinch", 1)])
            .unwrap_err();

        assert!(matches!(
            err,
            ShoppingListError::UnitConflict { ref first_unit, ref second_unit, .. }
                if first_unit == "g" && second_unit == "pinch"
        ));
        assert!(agg.finish().items().is_empty());
    }

    #[test]
    fn test_recipe_without_lines_not_counted() {
        let mut agg = Aggregator::new();
        agg.add_recipe(&[]).unwrap();
        agg.add_recipe(&[line("Egg", "pcs", 2)]).unwrap();

        assert_eq!(agg.finish().recipe_count(), 1);
    }

    #[test]
    fn test_render_full_list() {
        let mut agg = Aggregator::new();
        agg.add_recipe(&[line("Egg", "pcs", 2), line("Flour", "g", 200)])
            .unwrap();
        agg.add_recipe(&[line("Flour", "g", 100), line("Milk", "ml", 50)])
            .unwrap();

        assert_eq!(
            agg.finish().render(),
            "Отобрано рецептов: 2\nEgg (pcs) — 2\nFlour (g) — 300\nMilk (ml) — 50\n"
        );
    }

    #[test]
    fn test_export_filename_and_disposition() {
        let export = Aggregator::new().finish().export("shopping_list");
        assert_eq!(export.filename, "shopping_list.txt");
        assert_eq!(
            export.content_disposition(),
            "attachment; filename=\"shopping_list.txt\""
        );
        assert_eq!(export.body, "Отобрано рецептов: 0\n");
    }
}
