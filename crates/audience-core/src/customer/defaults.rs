//! Fixed customer archetypes used when the persisted corpus cannot be loaded
//! and when a query ranks no customers.

use super::CustomerRecord;

/// The three default archetypes: executive, student, creative professional.
pub fn default_customers() -> Vec<CustomerRecord> {
    vec![
        CustomerRecord {
            id: "F001".to_string(),
            name: "Tech Executive".to_string(),
            age: 42,
            income: 150_000,
            demographics: "executive, high income, luxury buyer, business traveler".to_string(),
            interests: vec![
                "Technology".to_string(),
                "Business".to_string(),
                "Travel".to_string(),
            ],
            preferences: "Premium quality, professional appearance".to_string(),
            location: String::new(),
        },
        CustomerRecord {
            id: "F002".to_string(),
            name: "College Student".to_string(),
            age: 21,
            income: 25_000,
            demographics: "student, budget-conscious, social media active, Gen Z".to_string(),
            interests: vec![
                "Social Media".to_string(),
                "Music".to_string(),
                "Gaming".to_string(),
            ],
            preferences: "Value for money, trendy designs".to_string(),
            location: String::new(),
        },
        CustomerRecord {
            id: "F003".to_string(),
            name: "Graphic Designer".to_string(),
            age: 28,
            income: 65_000,
            demographics: "creative professional, designer, freelancer".to_string(),
            interests: vec![
                "Design".to_string(),
                "Art".to_string(),
                "Photography".to_string(),
            ],
            preferences: "Aesthetic appeal, creative tools".to_string(),
            location: String::new(),
        },
    ]
}
