//! # Statistics Aggregator
//!
//! Superlatives and averages over a recipe's examples, and the same
//! superlatives across a whole menu.
//!
//! Ties always keep the first example seen: a candidate only replaces the
//! current best on a strict improvement, so output is stable across runs.

use crate::expansion::Example;
use crate::recipe::Recipe;

/// Statistics over one recipe's examples
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeStats {
    pub min_cost: Example,
    pub max_cost: Example,
    pub min_abv: Example,
    pub max_abv: Example,
    pub min_std_drinks: Example,
    pub max_std_drinks: Example,
    pub avg_cost: f64,
    pub avg_abv: f64,
    pub avg_std_drinks: f64,
    /// Largest finished volume across examples
    pub volume: f64,
    pub example_count: usize,
}

impl RecipeStats {
    /// Cost range across the examples
    pub fn cost_range(&self) -> (f64, f64) {
        (self.min_cost.cost, self.max_cost.cost)
    }
}

fn first_min<'a>(examples: &'a [Example], key: impl Fn(&Example) -> f64) -> &'a Example {
    let mut best = &examples[0];
    for example in &examples[1..] {
        if key(example) < key(best) {
            best = example;
        }
    }
    best
}

fn first_max<'a>(examples: &'a [Example], key: impl Fn(&Example) -> f64) -> &'a Example {
    let mut best = &examples[0];
    for example in &examples[1..] {
        if key(example) > key(best) {
            best = example;
        }
    }
    best
}

/// Stats for a list of examples; `None` when the list is empty
pub fn recipe_stats(examples: &[Example]) -> Option<RecipeStats> {
    if examples.is_empty() {
        return None;
    }
    let count = examples.len() as f64;
    let mean = |key: fn(&Example) -> f64| examples.iter().map(key).sum::<f64>() / count;

    Some(RecipeStats {
        min_cost: first_min(examples, |e| e.cost).clone(),
        max_cost: first_max(examples, |e| e.cost).clone(),
        min_abv: first_min(examples, |e| e.abv).clone(),
        max_abv: first_max(examples, |e| e.abv).clone(),
        min_std_drinks: first_min(examples, |e| e.std_drinks).clone(),
        max_std_drinks: first_max(examples, |e| e.std_drinks).clone(),
        avg_cost: mean(|e| e.cost),
        avg_abv: mean(|e| e.abv),
        avg_std_drinks: mean(|e| e.std_drinks),
        volume: first_max(examples, |e| e.volume).volume,
        example_count: examples.len(),
    })
}

/// Stats for a recipe's current examples
pub fn stats(recipe: &Recipe) -> Option<RecipeStats> {
    recipe_stats(&recipe.examples)
}

/// Which way a tracker compares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Highest,
    Lowest,
}

/// Which example field a tracker compares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Cost,
    StdDrinks,
    Abv,
}

impl Metric {
    pub fn of(&self, example: &Example) -> f64 {
        match self {
            Metric::Cost => example.cost,
            Metric::StdDrinks => example.std_drinks,
            Metric::Abv => example.abv,
        }
    }
}

/// Best example seen so far for one metric, tagged with its recipe
#[derive(Debug, Clone, PartialEq)]
pub struct StatTracker {
    pub title: String,
    pub metric: Metric,
    pub direction: Direction,
    pub best: Option<(String, Example)>,
}

impl StatTracker {
    pub fn new(title: &str, metric: Metric, direction: Direction) -> Self {
        Self {
            title: title.to_string(),
            metric,
            direction,
            best: None,
        }
    }

    /// Offer one example; returns whether it became the new best
    pub fn update(&mut self, recipe_name: &str, example: &Example) -> bool {
        let value = self.metric.of(example);
        let better = match &self.best {
            None => true,
            Some((_, current)) => {
                let current = self.metric.of(current);
                match self.direction {
                    Direction::Highest => value > current,
                    Direction::Lowest => value < current,
                }
            }
        };
        if better {
            self.best = Some((recipe_name.to_string(), example.clone()));
        }
        better
    }

    pub fn recipe_name(&self) -> Option<&str> {
        self.best.as_ref().map(|(name, _)| name.as_str())
    }

    pub fn example(&self) -> Option<&Example> {
        self.best.as_ref().map(|(_, example)| example)
    }
}

/// Menu-wide superlatives
#[derive(Debug, Clone, PartialEq)]
pub struct MenuStats {
    pub trackers: Vec<StatTracker>,
}

impl Default for MenuStats {
    fn default() -> Self {
        Self {
            trackers: vec![
                StatTracker::new("Most Expensive", Metric::Cost, Direction::Highest),
                StatTracker::new("Most Std Drinks", Metric::StdDrinks, Direction::Highest),
                StatTracker::new("Highest Estimated ABV", Metric::Abv, Direction::Highest),
                StatTracker::new("Least Expensive", Metric::Cost, Direction::Lowest),
                StatTracker::new("Fewest Std Drinks", Metric::StdDrinks, Direction::Lowest),
                StatTracker::new("Lowest Estimated ABV", Metric::Abv, Direction::Lowest),
            ],
        }
    }
}

impl MenuStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed every example of one recipe, in expansion order
    pub fn add_recipe(&mut self, recipe: &Recipe) {
        for example in &recipe.examples {
            for tracker in self.trackers.iter_mut() {
                tracker.update(&recipe.name, example);
            }
        }
    }

    pub fn from_recipes<'a>(recipes: impl IntoIterator<Item = &'a Recipe>) -> Self {
        let mut stats = Self::new();
        for recipe in recipes {
            stats.add_recipe(recipe);
        }
        stats
    }

    pub fn tracker(&self, title: &str) -> Option<&StatTracker> {
        self.trackers.iter().find(|t| t.title == title)
    }

    pub fn is_empty(&self) -> bool {
        self.trackers.iter().all(|t| t.best.is_none())
    }
}
