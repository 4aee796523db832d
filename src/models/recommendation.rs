use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{INGREDIENT_FILTER, NB_RECOMMENDATIONS};
use crate::models::NutritionPreference;

/// Body of a recommendation request.
///
/// Field names and order are the service's wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationRequest {
    nutrition_values_list: [u32; 9],
    nb_recommendations: u32,
    ingredient_txt: String,
}

impl RecommendationRequest {
    pub fn from_preferences(prefs: &NutritionPreference) -> Self {
        Self {
            nutrition_values_list: prefs.values(),
            nb_recommendations: NB_RECOMMENDATIONS,
            ingredient_txt: INGREDIENT_FILTER.to_string(),
        }
    }

    pub fn nutrition_values(&self) -> &[u32; 9] {
        &self.nutrition_values_list
    }

    pub fn nb_recommendations(&self) -> u32 {
        self.nb_recommendations
    }

    pub fn ingredient_txt(&self) -> &str {
        &self.ingredient_txt
    }
}

/// A recipe returned by the recommendation service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecommendedItem {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Calories")]
    pub calories: f64,

    /// Minutes.
    #[serde(rename = "PrepTime", deserialize_with = "minutes")]
    pub prep_time: f64,

    /// Minutes.
    #[serde(rename = "CookTime", deserialize_with = "minutes")]
    pub cook_time: f64,

    /// Minutes.
    #[serde(rename = "TotalTime", deserialize_with = "minutes")]
    pub total_time: f64,

    #[serde(rename = "RecipeIngredientParts", deserialize_with = "ingredient_text")]
    pub ingredients: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMinutes {
    Number(f64),
    Text(String),
}

/// Accepts plain numbers, numeric strings, or ISO-8601 durations such as `PT1H30M`.
fn minutes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match RawMinutes::deserialize(deserializer)? {
        RawMinutes::Number(n) if is_valid_minutes(n) => Ok(n),
        RawMinutes::Number(n) => Err(serde::de::Error::custom(format!("invalid duration: {n}"))),
        RawMinutes::Text(s) => parse_minutes(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid duration: {s:?}"))),
    }
}

fn is_valid_minutes(n: f64) -> bool {
    n.is_finite() && n >= 0.0
}

/// Parse a duration in minutes from a number or an ISO-8601 `PT..H..M..S` string.
///
/// Negative and non-finite values are rejected.
pub fn parse_minutes(text: &str) -> Option<f64> {
    let text = text.trim();
    if let Ok(n) = text.parse::<f64>() {
        return is_valid_minutes(n).then_some(n);
    }

    let rest = text.strip_prefix("PT")?;
    if rest.is_empty() {
        return None;
    }

    let mut total = 0.0;
    let mut number = String::new();
    for c in rest.chars() {
        match c {
            '0'..='9' | '.' => number.push(c),
            'H' | 'M' | 'S' => {
                let value: f64 = number.parse().ok()?;
                total += match c {
                    'H' => value * 60.0,
                    'M' => value,
                    _ => value / 60.0,
                };
                number.clear();
            }
            _ => return None,
        }
    }

    number.is_empty().then_some(total)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIngredients {
    Text(String),
    List(Vec<String>),
}

fn ingredient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawIngredients::deserialize(deserializer)? {
        RawIngredients::Text(s) => s,
        RawIngredients::List(parts) => parts.join(", "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NutritionField, PreferenceModel};

    #[test]
    fn test_request_wire_format_for_defaults() {
        let request = RecommendationRequest::from_preferences(&NutritionPreference::default());
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"nutrition_values_list":[500,10,5,50,500,50,10,10,20],"nb_recommendations":6,"ingredient_txt":""}"#
        );
    }

    #[test]
    fn test_request_order_ignores_edit_order() {
        let mut model = PreferenceModel::new();
        model.set(NutritionField::Protein, 33).unwrap();
        model.set(NutritionField::Calories, 1200).unwrap();
        model.set(NutritionField::Sodium, 0).unwrap();
        model.set(NutritionField::Fat, 42).unwrap();

        let request = RecommendationRequest::from_preferences(&model.read());
        assert_eq!(
            request.nutrition_values(),
            &[1200, 42, 5, 50, 0, 50, 10, 10, 33]
        );
    }

    #[test]
    fn test_item_from_numeric_fields() {
        let json = r#"{"Name":"Oatmeal","Calories":150,"PrepTime":5,"CookTime":10,"TotalTime":15,"RecipeIngredientParts":"oats, water"}"#;
        let item: RecommendedItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.name, "Oatmeal");
        assert_float_absolute_eq!(item.calories, 150.0, 1e-9);
        assert_float_absolute_eq!(item.total_time, 15.0, 1e-9);
        assert_eq!(item.ingredients, "oats, water");
    }

    #[test]
    fn test_item_from_iso_durations_and_list() {
        let json = r#"{"Name":"Stew","Calories":412.5,"PrepTime":"PT20M","CookTime":"PT1H30M","TotalTime":"PT1H50M","RecipeIngredientParts":["beef","carrots"],"Extra":true}"#;
        let item: RecommendedItem = serde_json::from_str(json).unwrap();
        assert_float_absolute_eq!(item.prep_time, 20.0, 1e-9);
        assert_float_absolute_eq!(item.cook_time, 90.0, 1e-9);
        assert_float_absolute_eq!(item.total_time, 110.0, 1e-9);
        assert_eq!(item.ingredients, "beef, carrots");
    }

    #[test]
    fn test_item_missing_field_is_rejected() {
        let json = r#"{"Name":"Toast","Calories":90}"#;
        assert!(serde_json::from_str::<RecommendedItem>(json).is_err());
    }

    #[test]
    fn test_parse_minutes() {
        assert_float_absolute_eq!(parse_minutes("PT24H").unwrap(), 1440.0, 1e-9);
        assert_float_absolute_eq!(parse_minutes("PT90S").unwrap(), 1.5, 1e-9);
        assert_float_absolute_eq!(parse_minutes("12").unwrap(), 12.0, 1e-9);
        assert!(parse_minutes("PT").is_none());
        assert!(parse_minutes("PT5").is_none());
        assert!(parse_minutes("soon").is_none());
    }

    #[test]
    fn test_parse_minutes_rejects_negative_and_non_finite() {
        for text in ["NaN", "inf", "-infinity", "-5", "-0.5"] {
            assert!(parse_minutes(text).is_none(), "{text} should be rejected");
        }
        assert_float_absolute_eq!(parse_minutes("0").unwrap(), 0.0, 1e-9);
    }

    #[test]
    fn test_item_with_invalid_duration_is_rejected() {
        let nan_text = r#"{"Name":"Toast","Calories":90,"PrepTime":"NaN","CookTime":2,"TotalTime":7,"RecipeIngredientParts":"bread"}"#;
        assert!(serde_json::from_str::<RecommendedItem>(nan_text).is_err());

        let negative = r#"{"Name":"Toast","Calories":90,"PrepTime":-5,"CookTime":2,"TotalTime":7,"RecipeIngredientParts":"bread"}"#;
        assert!(serde_json::from_str::<RecommendedItem>(negative).is_err());
    }
}
