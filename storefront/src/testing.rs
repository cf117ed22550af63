//! Test fixtures shared by unit tests

use rust_decimal::Decimal;
use shared::models::{
    AddressInput, AttributeCategory, AttributeKey, ChoiceId, CustomizationAttribute,
    CustomizationChoice, OptionCatalog, WatchProduct,
};

pub fn choice(id: &str, name: &str, modifier: i64, is_default: bool) -> CustomizationChoice {
    CustomizationChoice {
        id: ChoiceId::new(id),
        display_name: name.to_string(),
        price_modifier: Decimal::from(modifier),
        is_default,
        is_available: true,
        stock_quantity: None,
    }
}

pub fn attribute(
    key: AttributeKey,
    name: &str,
    category: AttributeCategory,
    required: bool,
    sort_order: i32,
    values: Vec<CustomizationChoice>,
) -> CustomizationAttribute {
    CustomizationAttribute {
        id: key,
        display_name: name.to_string(),
        required,
        values,
        category,
        sort_order,
        is_active: true,
    }
}

/// Full six-attribute watch catalog
pub fn watch_catalog() -> OptionCatalog {
    let mut rose_gold = choice("rose_gold", "18K Rose Gold", 3200, false);
    rose_gold.is_available = false;
    rose_gold.stock_quantity = Some(0);

    OptionCatalog::new(vec![
        attribute(
            AttributeKey::CaseMaterial,
            "Case Material",
            AttributeCategory::Case,
            true,
            1,
            vec![
                choice("steel", "Stainless Steel", 0, true),
                choice("titanium", "Grade 5 Titanium", 1500, false),
                rose_gold,
            ],
        ),
        attribute(
            AttributeKey::DialStyle,
            "Dial",
            AttributeCategory::Dial,
            true,
            2,
            vec![
                choice("white_classic", "Classic White", 0, true),
                choice("black_glossy", "Glossy Black", 200, false),
                choice("blue_sunburst", "Blue Sunburst", 350, false),
            ],
        ),
        attribute(
            AttributeKey::Hands,
            "Hands",
            AttributeCategory::Hands,
            true,
            3,
            vec![
                choice("baton", "Baton", 0, true),
                choice("dauphine", "Dauphine", 120, false),
            ],
        ),
        attribute(
            AttributeKey::SecondHand,
            "Second Hand",
            AttributeCategory::Hands,
            false,
            4,
            vec![
                choice("standard", "Standard", 0, true),
                choice("red_tip", "Red Tip", 80, false),
            ],
        ),
        attribute(
            AttributeKey::Strap,
            "Strap",
            AttributeCategory::Strap,
            false,
            5,
            vec![
                choice("leather_brown", "Brown Leather", 0, true),
                choice("nato_grey", "Grey NATO", 0, false),
                choice("steel_bracelet", "Steel Bracelet", 600, false),
            ],
        ),
        attribute(
            AttributeKey::Movement,
            "Movement",
            AttributeCategory::Movement,
            true,
            6,
            vec![
                choice("quartz", "Swiss Quartz", 0, true),
                choice("automatic", "Automatic", 1800, false),
            ],
        ),
    ])
}

pub fn classic_watch() -> WatchProduct {
    WatchProduct {
        id: "heritage-classic".to_string(),
        name: "Heritage Classic".to_string(),
        description: Some("40mm dress watch".to_string()),
        base_price: Decimal::from(2800),
        image: None,
        sort_order: 1,
        is_active: true,
        options: watch_catalog(),
    }
}

pub fn address_input() -> AddressInput {
    AddressInput {
        recipient: "Li Wei".to_string(),
        phone: "13800138000".to_string(),
        province: "Zhejiang".to_string(),
        city: "Hangzhou".to_string(),
        district: "Xihu".to_string(),
        street: "1 Wensan Road".to_string(),
        postal_code: Some("310000".to_string()),
    }
}
