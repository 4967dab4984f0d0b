use crate::models::plant::{Category, Plant};

fn plant(id: &str, name: &str, spacing: f64, row_spacing: Option<f64>, category: Category) -> Plant {
    Plant {
        id: id.into(),
        name: name.into(),
        spacing_inches: spacing,
        row_spacing_inches: row_spacing,
        category,
    }
}

/// Reference catalog, spacing in inches.
pub fn get_all_plants() -> Vec<Plant> {
    vec![
        plant("tomato", "Tomato", 24.0, Some(36.0), Category::Fruit),
        plant("pepper", "Pepper", 18.0, Some(24.0), Category::Fruit),
        plant("eggplant", "Eggplant", 18.0, Some(30.0), Category::Fruit),
        plant("cucumber", "Cucumber", 12.0, Some(36.0), Category::Fruit),
        plant("zucchini", "Zucchini", 24.0, Some(36.0), Category::Fruit),
        plant("melon", "Melon", 24.0, Some(48.0), Category::Fruit),
        plant("watermelon", "Watermelon", 36.0, Some(60.0), Category::Fruit),
        plant("winter-squash", "Winter squash", 36.0, Some(60.0), Category::Fruit),
        plant("pumpkin", "Pumpkin", 48.0, Some(72.0), Category::Fruit),
        plant("strawberry", "Strawberry", 12.0, Some(24.0), Category::Fruit),
        plant("broccoli", "Broccoli", 18.0, Some(24.0), Category::Produce),
        plant("cabbage", "Cabbage", 18.0, Some(24.0), Category::Produce),
        plant("cauliflower", "Cauliflower", 18.0, Some(24.0), Category::Produce),
        plant("corn", "Corn", 12.0, Some(30.0), Category::Produce),
        plant("lettuce", "Lettuce", 12.0, None, Category::Leafy),
        plant("spinach", "Spinach", 6.0, None, Category::Leafy),
        plant("chard", "Swiss chard", 12.0, None, Category::Leafy),
        plant("kale", "Kale", 18.0, Some(24.0), Category::Leafy),
        plant("celery", "Celery", 12.0, Some(24.0), Category::Leafy),
        plant("carrot", "Carrot", 3.0, Some(12.0), Category::Root),
        plant("radish", "Radish", 2.0, None, Category::Root),
        plant("beet", "Beet", 4.0, Some(12.0), Category::Root),
        plant("turnip", "Turnip", 4.0, Some(12.0), Category::Root),
        plant("potato", "Potato", 12.0, Some(30.0), Category::Root),
        plant("onion", "Onion", 4.0, None, Category::Bulb),
        plant("garlic", "Garlic", 6.0, None, Category::Bulb),
        plant("leek", "Leek", 6.0, Some(12.0), Category::Bulb),
        plant("green-bean", "Green bean", 6.0, Some(18.0), Category::Pod),
        plant("pea", "Pea", 3.0, Some(24.0), Category::Pod),
        plant("basil", "Basil", 12.0, None, Category::Herb),
        plant("parsley", "Parsley", 6.0, None, Category::Herb),
        plant("chive", "Chive", 6.0, None, Category::Herb),
    ]
}

pub fn get_plant_by_id(id: &str) -> Option<Plant> {
    get_all_plants().into_iter().find(|p| p.id == id)
}
