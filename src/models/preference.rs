use std::fmt;
use std::str::FromStr;

use strsim::jaro_winkler;

use crate::constants::FIELD_SUGGESTION_THRESHOLD;
use crate::error::{NutritionError, Result};

/// One of the nine nutrition targets, in request order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NutritionField {
    Calories,
    Fat,
    SaturatedFat,
    Cholesterol,
    Sodium,
    Carbohydrate,
    Fiber,
    Sugar,
    Protein,
}

impl NutritionField {
    /// All fields in the fixed order used by `nutrition_values_list`.
    pub const ALL: [NutritionField; 9] = [
        NutritionField::Calories,
        NutritionField::Fat,
        NutritionField::SaturatedFat,
        NutritionField::Cholesterol,
        NutritionField::Sodium,
        NutritionField::Carbohydrate,
        NutritionField::Fiber,
        NutritionField::Sugar,
        NutritionField::Protein,
    ];

    /// Position of this field in the request array.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical field name.
    pub fn name(self) -> &'static str {
        match self {
            NutritionField::Calories => "calories",
            NutritionField::Fat => "fat",
            NutritionField::SaturatedFat => "saturatedFat",
            NutritionField::Cholesterol => "cholesterol",
            NutritionField::Sodium => "sodium",
            NutritionField::Carbohydrate => "carbohydrate",
            NutritionField::Fiber => "fiber",
            NutritionField::Sugar => "sugar",
            NutritionField::Protein => "protein",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NutritionField::Calories => "Calories",
            NutritionField::Fat => "Fat Content",
            NutritionField::SaturatedFat => "Saturated Fat",
            NutritionField::Cholesterol => "Cholesterol",
            NutritionField::Sodium => "Sodium",
            NutritionField::Carbohydrate => "Carbohydrate",
            NutritionField::Fiber => "Fiber",
            NutritionField::Sugar => "Sugar",
            NutritionField::Protein => "Protein Content",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            NutritionField::Calories => "kcal",
            NutritionField::Cholesterol | NutritionField::Sodium => "mg",
            _ => "g",
        }
    }

    /// Inclusive upper bound. Every range starts at 0.
    pub fn max(self) -> u32 {
        match self {
            NutritionField::Calories => 2000,
            NutritionField::Fat => 100,
            NutritionField::SaturatedFat => 13,
            NutritionField::Cholesterol => 300,
            NutritionField::Sodium => 2300,
            NutritionField::Carbohydrate => 325,
            NutritionField::Fiber => 50,
            NutritionField::Sugar => 50,
            NutritionField::Protein => 40,
        }
    }

    /// Value a fresh form starts with.
    pub fn default_value(self) -> u32 {
        match self {
            NutritionField::Calories => 500,
            NutritionField::Fat => 10,
            NutritionField::SaturatedFat => 5,
            NutritionField::Cholesterol => 50,
            NutritionField::Sodium => 500,
            NutritionField::Carbohydrate => 50,
            NutritionField::Fiber => 10,
            NutritionField::Sugar => 10,
            NutritionField::Protein => 20,
        }
    }

    #[inline]
    pub fn contains(self, value: i64) -> bool {
        (0..=i64::from(self.max())).contains(&value)
    }

    /// Closest declared name for a misspelled one, if any is close enough.
    pub fn suggest(name: &str) -> Option<&'static str> {
        let wanted = normalize(name);
        Self::ALL
            .iter()
            .map(|f| (f.name(), jaro_winkler(&normalize(f.name()), &wanted)))
            .filter(|(_, score)| *score >= FIELD_SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(name, _)| name)
    }
}

/// Lowercase with separators removed, so `saturatedFat`, `saturated_fat`
/// and `saturated-fat` all compare equal.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Display for NutritionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NutritionField {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        Self::ALL
            .iter()
            .copied()
            .find(|f| normalize(f.name()) == wanted)
            .ok_or_else(|| NutritionError::UnknownField {
                name: s.to_string(),
                suggestion: Self::suggest(s),
            })
    }
}

/// Snapshot of all nine targets. Values are always within their field's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NutritionPreference {
    values: [u32; 9],
}

impl NutritionPreference {
    #[inline]
    pub fn get(&self, field: NutritionField) -> u32 {
        self.values[field.index()]
    }

    /// Values in request order.
    pub fn values(&self) -> [u32; 9] {
        self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (NutritionField, u32)> + '_ {
        NutritionField::ALL.iter().map(|f| (*f, self.get(*f)))
    }
}

impl Default for NutritionPreference {
    fn default() -> Self {
        Self {
            values: NutritionField::ALL.map(NutritionField::default_value),
        }
    }
}

/// Holds the form's current targets and guards their ranges.
#[derive(Debug, Clone, Default)]
pub struct PreferenceModel {
    current: NutritionPreference,
}

impl PreferenceModel {
    /// A fresh model with the documented defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` for `field`.
    ///
    /// Out-of-range values are rejected and the stored value is kept.
    pub fn set(&mut self, field: NutritionField, value: i64) -> Result<()> {
        if !field.contains(value) {
            return Err(NutritionError::OutOfRange { field, value });
        }
        // contains() bounds value to [0, max], so this cannot truncate
        self.current.values[field.index()] = value as u32;
        Ok(())
    }

    /// Same as [`set`](Self::set), addressing the field by name.
    pub fn set_named(&mut self, name: &str, value: i64) -> Result<()> {
        let field: NutritionField = name.parse()?;
        self.set(field, value)
    }

    pub fn get(&self, field: NutritionField) -> u32 {
        self.current.get(field)
    }

    pub fn read(&self) -> NutritionPreference {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = NutritionPreference::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let prefs = PreferenceModel::new().read();
        assert_eq!(prefs.values(), [500, 10, 5, 50, 500, 50, 10, 10, 20]);
    }

    #[test]
    fn test_out_of_range_write_keeps_value() {
        let mut model = PreferenceModel::new();
        for field in NutritionField::ALL {
            let before = model.get(field);

            let too_high = i64::from(field.max()) + 1;
            assert!(matches!(
                model.set(field, too_high),
                Err(NutritionError::OutOfRange { .. })
            ));
            assert!(model.set(field, -1).is_err());

            assert_eq!(model.get(field), before, "{} changed", field);
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let mut model = PreferenceModel::new();
        for field in NutritionField::ALL {
            model.set(field, 0).unwrap();
            assert_eq!(model.get(field), 0);
            model.set(field, i64::from(field.max())).unwrap();
            assert_eq!(model.get(field), field.max());
        }
    }

    #[test]
    fn test_set_named_accepts_common_spellings() {
        let mut model = PreferenceModel::new();
        model.set_named("saturatedFat", 7).unwrap();
        assert_eq!(model.get(NutritionField::SaturatedFat), 7);
        model.set_named("saturated_fat", 8).unwrap();
        assert_eq!(model.get(NutritionField::SaturatedFat), 8);
        model.set_named("Saturated-Fat", 9).unwrap();
        assert_eq!(model.get(NutritionField::SaturatedFat), 9);
    }

    #[test]
    fn test_unknown_field_fails_loudly() {
        let mut model = PreferenceModel::new();
        let err = model.set_named("calorie", 100).unwrap_err();
        match err {
            NutritionError::UnknownField { name, suggestion } => {
                assert_eq!(name, "calorie");
                assert_eq!(suggestion, Some("calories"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(model.read(), NutritionPreference::default());
    }

    #[test]
    fn test_unknown_field_without_close_match() {
        let err = "vitamins".parse::<NutritionField>().unwrap_err();
        assert!(matches!(
            err,
            NutritionError::UnknownField {
                suggestion: None,
                ..
            }
        ));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut model = PreferenceModel::new();
        model.set(NutritionField::Protein, 40).unwrap();
        model.reset();
        assert_eq!(model.get(NutritionField::Protein), 20);
    }
}
