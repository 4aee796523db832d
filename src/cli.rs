use clap::{Args, Parser, Subcommand};

use crate::models::NutritionField;

/// InertiaFit: customized food recommendations from nine nutrition targets.
#[derive(Parser, Debug)]
#[command(name = "inertiafit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Recommendation service base URL (overrides configuration).
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Request recipe recommendations for your nutrition targets.
    Recommend(RecommendArgs),

    /// List the nutrition targets with their ranges and defaults.
    Fields,

    /// Check that the recommendation service is up.
    Health,
}

impl Default for Command {
    fn default() -> Self {
        Command::Recommend(RecommendArgs::default())
    }
}

#[derive(Args, Debug, Default)]
pub struct RecommendArgs {
    /// Adjust targets with prompts before submitting.
    #[arg(short, long)]
    pub interactive: bool,

    /// Calories (0-2000 kcal).
    #[arg(long, allow_negative_numbers = true)]
    pub calories: Option<i64>,

    /// Fat content (0-100 g).
    #[arg(long, allow_negative_numbers = true)]
    pub fat: Option<i64>,

    /// Saturated fat (0-13 g).
    #[arg(long, allow_negative_numbers = true)]
    pub saturated_fat: Option<i64>,

    /// Cholesterol (0-300 mg).
    #[arg(long, allow_negative_numbers = true)]
    pub cholesterol: Option<i64>,

    /// Sodium (0-2300 mg).
    #[arg(long, allow_negative_numbers = true)]
    pub sodium: Option<i64>,

    /// Carbohydrate (0-325 g).
    #[arg(long, allow_negative_numbers = true)]
    pub carbohydrate: Option<i64>,

    /// Fiber (0-50 g).
    #[arg(long, allow_negative_numbers = true)]
    pub fiber: Option<i64>,

    /// Sugar (0-50 g).
    #[arg(long, allow_negative_numbers = true)]
    pub sugar: Option<i64>,

    /// Protein content (0-40 g).
    #[arg(long, allow_negative_numbers = true)]
    pub protein: Option<i64>,

    /// Set a target by name, e.g. `--set saturatedFat=7`. Repeatable.
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub assignments: Vec<(String, i64)>,
}

fn parse_assignment(raw: &str) -> std::result::Result<(String, i64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))?;
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid value for '{}': {}", name.trim(), e))?;
    Ok((name.trim().to_string(), value))
}

impl RecommendArgs {
    /// Targets given on the command line, in field order.
    pub fn overrides(&self) -> Vec<(NutritionField, i64)> {
        [
            (NutritionField::Calories, self.calories),
            (NutritionField::Fat, self.fat),
            (NutritionField::SaturatedFat, self.saturated_fat),
            (NutritionField::Cholesterol, self.cholesterol),
            (NutritionField::Sodium, self.sodium),
            (NutritionField::Carbohydrate, self.carbohydrate),
            (NutritionField::Fiber, self.fiber),
            (NutritionField::Sugar, self.sugar),
            (NutritionField::Protein, self.protein),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_recommend() {
        let cli = Cli::try_parse_from(["inertiafit"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(Command::default(), Command::Recommend(_)));
    }

    #[test]
    fn test_recommend_overrides() {
        let cli = Cli::try_parse_from([
            "inertiafit",
            "recommend",
            "--saturated-fat",
            "7",
            "--calories",
            "-5",
        ])
        .unwrap();

        let Some(Command::Recommend(args)) = cli.command else {
            panic!("expected recommend");
        };
        assert_eq!(
            args.overrides(),
            vec![
                (NutritionField::Calories, -5),
                (NutritionField::SaturatedFat, 7)
            ]
        );
    }

    #[test]
    fn test_named_assignments() {
        let cli = Cli::try_parse_from([
            "inertiafit",
            "recommend",
            "--set",
            "sodium=900",
            "--set",
            "saturatedFat = 7",
        ])
        .unwrap();

        let Some(Command::Recommend(args)) = cli.command else {
            panic!("expected recommend");
        };
        assert_eq!(
            args.assignments,
            vec![("sodium".to_string(), 900), ("saturatedFat".to_string(), 7)]
        );

        assert!(Cli::try_parse_from(["inertiafit", "recommend", "--set", "sodium"]).is_err());
        assert!(Cli::try_parse_from(["inertiafit", "recommend", "--set", "sodium=lots"]).is_err());
    }

    #[test]
    fn test_global_endpoint_flag() {
        let cli =
            Cli::try_parse_from(["inertiafit", "health", "--endpoint", "http://127.0.0.1:9000"])
                .unwrap();
        assert_eq!(cli.endpoint.as_deref(), Some("http://127.0.0.1:9000"));
        assert!(matches!(cli.command, Some(Command::Health)));
    }
}
