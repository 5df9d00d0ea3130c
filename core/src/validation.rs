//! Form validation for the add/edit meal dialogs.
//!
//! # Design
//! Every field is checked independently and all failures are reported at
//! once, keyed by a stable per-field error key. A form is valid exactly when
//! the error set is empty.
//!
//! `FormState` clears a field's error when that field is edited and leaves
//! the others flagged until the next submit revalidates everything.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;
use url::Url;

use crate::types::{Meal, MealDraft, Restaurant, RestaurantStatus, DEFAULT_PRICE};

/// One input of the meal form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FoodName,
    FoodRating,
    FoodImageUrl,
    FoodPrice,
    RestaurantName,
    RestaurantLogoUrl,
    RestaurantStatus,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::FoodName,
        Field::FoodRating,
        Field::FoodImageUrl,
        Field::FoodPrice,
        Field::RestaurantName,
        Field::RestaurantLogoUrl,
        Field::RestaurantStatus,
    ];

    /// Stable key the UI uses to attach a message to its input.
    pub const fn error_key(self) -> &'static str {
        match self {
            Field::FoodName => "food-name-error",
            Field::FoodRating => "food-rating-error",
            Field::FoodImageUrl => "food-image-error",
            Field::FoodPrice => "food-price-error",
            Field::RestaurantName => "restaurant-name-error",
            Field::RestaurantLogoUrl => "restaurant-logo-error",
            Field::RestaurantStatus => "restaurant-status-error",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Field::FoodName => "Food Name",
            Field::FoodRating => "Food Rating",
            Field::FoodImageUrl => "Food Image URL",
            Field::FoodPrice => "Price",
            Field::RestaurantName => "Restaurant Name",
            Field::RestaurantLogoUrl => "Restaurant Logo URL",
            Field::RestaurantStatus => "Restaurant Status",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.error_key())
    }
}

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MealForm {
    pub food_name: String,
    pub food_rating: String,
    pub food_image_url: String,
    pub food_price: String,
    pub restaurant_name: String,
    pub restaurant_logo_url: String,
    pub restaurant_status: String,
}

impl MealForm {
    /// Empty form for the add dialog. Status starts at `Open Now`.
    pub fn blank() -> Self {
        Self {
            restaurant_status: RestaurantStatus::OpenNow.as_str().to_string(),
            ..Self::default()
        }
    }

    pub fn from_meal(meal: &Meal) -> Self {
        Self {
            food_name: meal.name.clone(),
            food_rating: meal.rating.to_string(),
            food_image_url: meal.image_url.clone(),
            food_price: meal.price.to_string(),
            restaurant_name: meal.restaurant.name.clone(),
            restaurant_logo_url: meal.restaurant.logo_url.clone(),
            restaurant_status: meal.restaurant.status.as_str().to_string(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FoodName => &self.food_name,
            Field::FoodRating => &self.food_rating,
            Field::FoodImageUrl => &self.food_image_url,
            Field::FoodPrice => &self.food_price,
            Field::RestaurantName => &self.restaurant_name,
            Field::RestaurantLogoUrl => &self.restaurant_logo_url,
            Field::RestaurantStatus => &self.restaurant_status,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FoodName => &mut self.food_name,
            Field::FoodRating => &mut self.food_rating,
            Field::FoodImageUrl => &mut self.food_image_url,
            Field::FoodPrice => &mut self.food_price,
            Field::RestaurantName => &mut self.restaurant_name,
            Field::RestaurantLogoUrl => &mut self.restaurant_logo_url,
            Field::RestaurantStatus => &mut self.restaurant_status,
        };
        *slot = value.into();
    }
}

/// Bounds and strictness applied by `validate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationRules {
    pub rating_min: f64,
    pub rating_max: f64,
    /// Minimum trimmed length of the food and restaurant names.
    pub min_name_len: usize,
    /// Parse image and logo URLs instead of only requiring them.
    pub check_urls: bool,
    /// Reject an empty price instead of falling back.
    pub price_required: bool,
}

impl ValidationRules {
    /// Rating in `[0, 5]`, non-empty text, price optional.
    pub const fn standard() -> Self {
        Self {
            rating_min: 0.0,
            rating_max: 5.0,
            min_name_len: 1,
            check_urls: false,
            price_required: false,
        }
    }

    /// Rating in `[1, 5]`, names of two characters or more, well-formed URLs,
    /// price required.
    pub const fn strict() -> Self {
        Self {
            rating_min: 1.0,
            rating_max: 5.0,
            min_name_len: 2,
            check_urls: true,
            price_required: true,
        }
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self::standard()
    }
}

/// Field-level failures, one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn clear(&mut self, field: Field) -> Option<String> {
        self.0.remove(&field)
    }

    /// Messages keyed by their stable error key.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.0.iter().map(|(field, message)| (field.error_key(), message.as_str()))
    }

    fn insert(&mut self, field: Field, message: String) {
        self.0.insert(field, message);
    }
}

/// Check every field of `form` and normalize it into a draft.
///
/// `editing` is the meal being edited, if any. It supplies the restaurant id
/// and the fallback price; a new meal gets a timestamp id and `DEFAULT_PRICE`.
pub fn validate(form: &MealForm, rules: &ValidationRules, editing: Option<&Meal>) -> Result<MealDraft, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = check_name(Field::FoodName, &form.food_name, rules, &mut errors);
    let rating = check_rating(&form.food_rating, rules, &mut errors);
    let image_url = check_url(Field::FoodImageUrl, &form.food_image_url, rules, &mut errors);
    let fallback = editing.map_or(DEFAULT_PRICE, |meal| meal.price);
    let price = check_price(&form.food_price, rules, fallback, &mut errors);
    let restaurant_name = check_name(Field::RestaurantName, &form.restaurant_name, rules, &mut errors);
    let logo_url = check_url(Field::RestaurantLogoUrl, &form.restaurant_logo_url, rules, &mut errors);
    let status = form.restaurant_status.parse::<RestaurantStatus>().ok();
    if status.is_none() {
        errors.insert(
            Field::RestaurantStatus,
            "Restaurant Status must be 'Open Now' or 'Closed'".to_string(),
        );
    }

    match (name, rating, image_url, price, restaurant_name, logo_url, status) {
        (Some(name), Some(rating), Some(image_url), Some(price), Some(restaurant_name), Some(logo_url), Some(status))
            if errors.is_empty() =>
        {
            Ok(MealDraft {
                name,
                price: Some(price),
                rating,
                image_url,
                restaurant: Restaurant {
                    id: editing.map_or_else(MealDraft::local_id, |meal| meal.restaurant.id.clone()),
                    name: restaurant_name,
                    logo_url,
                    status,
                },
            })
        }
        _ => Err(errors),
    }
}

fn check_name(field: Field, raw: &str, rules: &ValidationRules, errors: &mut ValidationErrors) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        errors.insert(field, format!("{} is required", field.label()));
        return None;
    }
    if value.chars().count() < rules.min_name_len {
        errors.insert(
            field,
            format!("{} must be at least {} characters", field.label(), rules.min_name_len),
        );
        return None;
    }
    Some(value.to_string())
}

fn check_rating(raw: &str, rules: &ValidationRules, errors: &mut ValidationErrors) -> Option<f64> {
    let value = raw.trim();
    if value.is_empty() {
        errors.insert(Field::FoodRating, "Food Rating must be a number".to_string());
        return None;
    }
    match value.parse::<f64>() {
        Ok(rating) if rating.is_finite() && rating >= rules.rating_min && rating <= rules.rating_max => Some(rating),
        _ => {
            errors.insert(
                Field::FoodRating,
                format!(
                    "Food Rating must be a number between {} and {}",
                    rules.rating_min, rules.rating_max
                ),
            );
            None
        }
    }
}

fn check_url(field: Field, raw: &str, rules: &ValidationRules, errors: &mut ValidationErrors) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        errors.insert(field, format!("{} is required", field.label()));
        return None;
    }
    if rules.check_urls && Url::parse(value).is_err() {
        errors.insert(field, format!("{} must be a valid URL", field.label()));
        return None;
    }
    Some(value.to_string())
}

fn check_price(raw: &str, rules: &ValidationRules, fallback: f64, errors: &mut ValidationErrors) -> Option<f64> {
    let value = raw.trim();
    if value.is_empty() {
        if rules.price_required {
            errors.insert(Field::FoodPrice, "Price is required".to_string());
            return None;
        }
        return Some(fallback);
    }
    match value.parse::<f64>() {
        Ok(price) if price.is_finite() && price > 0.0 => Some(price),
        _ => {
            errors.insert(Field::FoodPrice, "Price must be a positive number".to_string());
            None
        }
    }
}

/// An open add/edit form together with its visible errors.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    form: MealForm,
    errors: ValidationErrors,
    editing: Option<Meal>,
}

impl FormState {
    pub fn for_add() -> Self {
        Self {
            form: MealForm::blank(),
            errors: ValidationErrors::default(),
            editing: None,
        }
    }

    pub fn for_edit(meal: Meal) -> Self {
        Self {
            form: MealForm::from_meal(&meal),
            errors: ValidationErrors::default(),
            editing: Some(meal),
        }
    }

    pub fn form(&self) -> &MealForm {
        &self.form
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn editing(&self) -> Option<&Meal> {
        self.editing.as_ref()
    }

    /// Update one input and drop only that input's error.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
        self.errors.clear(field);
    }

    /// Revalidate every field and replace the visible error set.
    pub fn submit(&mut self, rules: &ValidationRules) -> Result<MealDraft, ValidationErrors> {
        match validate(&self.form, rules, self.editing.as_ref()) {
            Ok(draft) => {
                self.errors = ValidationErrors::default();
                Ok(draft)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }
}
