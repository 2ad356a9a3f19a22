//! Recipe API client (TheMealDB)
//!
//! Managers browse external meals and import them into the catalog. Only
//! the lookup surface is covered here; retry and pagination behavior stay
//! with the remote API.

use serde::Deserialize;
use tracing::warn;

use crate::utils::error::AppResult;

pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com";

/// Description length cap for imported meals
const DESCRIPTION_MAX_CHARS: usize = 200;

/// A meal as offered by the external API, reduced to what the catalog
/// import needs
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalMeal {
    pub external_id: String,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MealsResponse {
    meals: Option<Vec<MealDto>>,
}

/// Raw TheMealDB meal record (subset)
#[derive(Debug, Deserialize)]
struct MealDto {
    #[serde(rename = "idMeal")]
    id_meal: Option<String>,
    #[serde(rename = "strMeal")]
    str_meal: Option<String>,
    #[serde(rename = "strCategory")]
    str_category: Option<String>,
    #[serde(rename = "strInstructions")]
    str_instructions: Option<String>,
    #[serde(rename = "strMealThumb")]
    str_meal_thumb: Option<String>,
}

/// TheMealDB client
#[derive(Debug, Clone)]
pub struct RecipeClient {
    http: reqwest::Client,
    base_url: String,
}

impl RecipeClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Random meal suggestions (the API returns one meal per call)
    pub async fn random_meals(&self, count: usize) -> AppResult<Vec<ExternalMeal>> {
        let mut result = Vec::with_capacity(count);
        for _ in 0..count {
            match self.fetch_meals("/api/json/v1/1/random.php", &[]).await {
                Ok(mut meals) => result.append(&mut meals),
                Err(e) => {
                    warn!(error = %e, "Random meal lookup failed, skipping");
                    continue;
                }
            }
        }
        Ok(result)
    }

    /// Search meals by name; a blank query returns nothing
    pub async fn search_meals(&self, query: &str) -> AppResult<Vec<ExternalMeal>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch_meals("/api/json/v1/1/search.php", &[("s", query)])
            .await
    }

    /// Look up a single meal by its external id
    pub async fn meal_by_id(&self, meal_id: &str) -> AppResult<Option<ExternalMeal>> {
        let meal_id = meal_id.trim();
        if meal_id.is_empty() {
            return Ok(None);
        }
        let meals = self
            .fetch_meals("/api/json/v1/1/lookup.php", &[("i", meal_id)])
            .await?;
        Ok(meals.into_iter().next())
    }

    async fn fetch_meals(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<Vec<ExternalMeal>> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).query(query).send().await?;
        if !response.status().is_success() {
            warn!(url = %url, status = %response.status(), "Recipe API returned non-success");
            return Ok(Vec::new());
        }
        let payload: MealsResponse = response.json().await?;
        Ok(map_meals(payload))
    }
}

impl Default for RecipeClient {
    fn default() -> Self {
        Self::new()
    }
}

fn map_meals(payload: MealsResponse) -> Vec<ExternalMeal> {
    payload
        .meals
        .unwrap_or_default()
        .into_iter()
        .filter_map(map_meal)
        .collect()
}

fn map_meal(dto: MealDto) -> Option<ExternalMeal> {
    let external_id = dto.id_meal?.trim().to_string();
    if external_id.is_empty() {
        return None;
    }
    let name = dto.str_meal?.trim().to_string();
    if name.is_empty() {
        return None;
    }
    Some(ExternalMeal {
        external_id,
        name,
        category: dto
            .str_category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty()),
        description: dto.str_instructions.as_deref().map(short_description),
        thumbnail: dto.str_meal_thumb,
    })
}

/// Trim instruction text to a short product description
fn short_description(instructions: &str) -> String {
    let text: String = instructions.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.chars().count() <= DESCRIPTION_MAX_CHARS {
        return text;
    }
    let truncated: String = text.chars().take(DESCRIPTION_MAX_CHARS).collect();
    format!("{}...", truncated.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_PAYLOAD: &str = r#"{
        "meals": [
            {
                "idMeal": "52772",
                "strMeal": "Teriyaki Chicken Casserole",
                "strCategory": "Chicken",
                "strInstructions": "Preheat oven to 350 degrees.\r\nCombine soy sauce and water.",
                "strMealThumb": "https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg"
            },
            {
                "idMeal": "  ",
                "strMeal": "Ghost Meal",
                "strCategory": null,
                "strInstructions": null,
                "strMealThumb": null
            }
        ]
    }"#;

    #[test]
    fn parses_and_maps_search_payload() {
        let payload: MealsResponse = serde_json::from_str(SEARCH_PAYLOAD).unwrap();
        let meals = map_meals(payload);

        // The blank-id record is dropped.
        assert_eq!(meals.len(), 1);
        let meal = &meals[0];
        assert_eq!(meal.external_id, "52772");
        assert_eq!(meal.name, "Teriyaki Chicken Casserole");
        assert_eq!(meal.category.as_deref(), Some("Chicken"));
        // Line breaks collapse into one line.
        assert_eq!(
            meal.description.as_deref(),
            Some("Preheat oven to 350 degrees. Combine soy sauce and water.")
        );
    }

    #[test]
    fn null_meals_is_empty() {
        let payload: MealsResponse = serde_json::from_str(r#"{"meals": null}"#).unwrap();
        assert!(map_meals(payload).is_empty());
    }

    #[test]
    fn long_instructions_are_truncated() {
        let long = "word ".repeat(100);
        let description = short_description(&long);
        assert!(description.chars().count() <= DESCRIPTION_MAX_CHARS + 3);
        assert!(description.ends_with("..."));
    }

    #[tokio::test]
    #[ignore = "talks to the live TheMealDB API"]
    async fn live_search_returns_meals() {
        let client = RecipeClient::new();
        let meals = client.search_meals("chicken").await.unwrap();
        assert!(!meals.is_empty());
    }
}
