use crate::constants::REMEDIATION_STEPS;
use crate::models::{NutritionField, NutritionPreference, RecommendedItem};
use crate::state::RequestOutcome;

/// One recommended recipe, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationCard {
    /// 1-based position in the service's ranking.
    pub rank: usize,
    pub name: String,
    pub calories_tag: String,
    pub timing: String,
    pub ingredients: String,
}

impl RecommendationCard {
    fn from_item(rank: usize, item: &RecommendedItem) -> Self {
        Self {
            rank,
            name: item.name.clone(),
            calories_tag: format!("{} kcal", item.calories),
            timing: format!(
                "Prep: {} min | Cook: {} min | Total: {} min",
                item.prep_time, item.cook_time, item.total_time
            ),
            ingredients: item.ingredients.clone(),
        }
    }
}

/// A failed submission, with steps to fix it when the service is down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub remediation: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeView {
    Processing,
    Recommendations(Vec<RecommendationCard>),
    Diagnostic(Diagnostic),
}

/// Map an outcome to what should be shown. `Idle` shows nothing.
///
/// Items keep the order the service returned them in.
pub fn present(outcome: &RequestOutcome) -> Option<OutcomeView> {
    match outcome {
        RequestOutcome::Idle => None,
        RequestOutcome::Pending => Some(OutcomeView::Processing),
        RequestOutcome::Success(items) => Some(OutcomeView::Recommendations(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| RecommendationCard::from_item(i + 1, item))
                .collect(),
        )),
        RequestOutcome::Failure(reason) => Some(OutcomeView::Diagnostic(Diagnostic {
            message: reason.to_string(),
            remediation: reason
                .is_connectivity()
                .then(|| REMEDIATION_STEPS.iter().map(|s| s.to_string()).collect()),
        })),
    }
}

/// Print the current outcome to stdout.
pub fn display_outcome(outcome: &RequestOutcome) {
    let Some(view) = present(outcome) else {
        return;
    };

    match view {
        OutcomeView::Processing => println!("Processing..."),
        OutcomeView::Recommendations(cards) => display_cards(&cards),
        OutcomeView::Diagnostic(diagnostic) => display_diagnostic(&diagnostic),
    }
}

fn display_cards(cards: &[RecommendationCard]) {
    println!();
    println!("=== Your Recommended Foods ===");
    println!();

    let max_name_len = cards.iter().map(|c| c.name.len()).max().unwrap_or(10);

    for card in cards {
        println!(
            "{:>3}. {:<width$}  [{}]",
            card.rank,
            card.name,
            card.calories_tag,
            width = max_name_len
        );
        println!("     {}", card.timing);
        println!("     Ingredients: {}", card.ingredients);
    }

    println!();
}

fn display_diagnostic(diagnostic: &Diagnostic) {
    println!();
    println!("Error: {}", diagnostic.message);

    if let Some(steps) = &diagnostic.remediation {
        println!();
        println!("To fix this:");
        for (i, step) in steps.iter().enumerate() {
            println!("  {}. {}", i + 1, step);
        }
    }

    println!();
}

/// Print the nine fields with their current values and ranges.
pub fn display_fields(prefs: &NutritionPreference) {
    println!();
    println!("=== Nutrition Targets ===");
    println!();

    let max_label_len = NutritionField::ALL
        .iter()
        .map(|f| f.label().len())
        .max()
        .unwrap_or(10);

    for (field, value) in prefs.iter() {
        println!(
            "  {:<width$}  {:>5} {:<4} (0-{}, default {})  --{}",
            field.label(),
            value,
            field.unit(),
            field.max(),
            field.default_value(),
            flag_name(field),
            width = max_label_len
        );
    }

    println!();
}

/// Command-line flag for a field, e.g. `saturated-fat`.
fn flag_name(field: NutritionField) -> String {
    let mut flag = String::new();
    for c in field.name().chars() {
        if c.is_ascii_uppercase() {
            flag.push('-');
            flag.push(c.to_ascii_lowercase());
        } else {
            flag.push(c);
        }
    }
    flag
}
