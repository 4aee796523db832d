use dialoguer::{Confirm, Input, Select};

use crate::error::Result;
use crate::models::{NutritionField, PreferenceModel};

/// Prompt for a single field, accepting only values inside its range.
pub fn prompt_field(field: NutritionField, current: u32) -> Result<i64> {
    let max = field.max();
    let value: i64 = Input::new()
        .with_prompt(format!("{} (0-{} {})", field.label(), max, field.unit()))
        .default(i64::from(current))
        .validate_with(move |v: &i64| -> std::result::Result<(), String> {
            if field.contains(*v) {
                Ok(())
            } else {
                Err(format!("Enter a value between 0 and {}", max))
            }
        })
        .interact_text()?;

    Ok(value)
}

/// Let the user adjust fields one at a time until they choose to submit.
pub fn adjust_preferences(model: &mut PreferenceModel) -> Result<()> {
    loop {
        let mut options: Vec<String> = NutritionField::ALL
            .iter()
            .map(|f| format!("{:<16} {:>5} {}", f.label(), model.get(*f), f.unit()))
            .collect();
        options.push("Reset to defaults".to_string());
        options.push("Generate Recommendations".to_string());

        let selection = Select::new()
            .with_prompt("Adjust a nutrition target")
            .items(&options)
            .default(NutritionField::ALL.len() + 1)
            .interact()?;

        if selection == NutritionField::ALL.len() {
            model.reset();
            continue;
        }
        let Some(field) = NutritionField::ALL.get(selection).copied() else {
            return Ok(());
        };

        let value = prompt_field(field, model.get(field))?;
        model.set(field, value)?;
    }
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
