// Emergency contacts + living tips for the Qatar guide

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub service: String,
    pub number: String,
    pub description: String,
    pub available: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipGroup {
    pub category: String,
    pub tips: Vec<String>,
}

pub fn emergency_contacts() -> Vec<ContactRecord> {
    [
        ("Emergency Services", "999", "Fire, Police, Ambulance - All emergencies", "24/7"),
        ("Police (Non-Emergency)", "4433 4444", "Traffic violations, general inquiries", "24/7"),
        ("Ambulance", "999", "Medical emergencies and hospital transport", "24/7"),
        ("Fire Department", "999", "Fire emergencies and rescue operations", "24/7"),
        ("Traffic Police", "4433 3333", "Road accidents and traffic issues", "24/7"),
        ("Qatar Red Crescent", "4402 7777", "Humanitarian assistance and first aid", "Office hours"),
    ]
    .iter()
    .map(|(service, number, description, available)| ContactRecord {
        service: service.to_string(),
        number: number.to_string(),
        description: description.to_string(),
        available: available.to_string(),
    })
    .collect()
}

pub fn living_tips() -> Vec<TipGroup> {
    let groups: [(&str, [&str; 5]); 6] = [
        (
            "Housing & Accommodation",
            [
                "Popular areas for expats include West Bay, The Pearl, and Al Sadd",
                "Rent is typically paid annually or quarterly in advance",
                "Include utilities (electricity, water, internet) in your budget considerations",
                "Furnished apartments are common and often preferred by short-term residents",
                "Consider proximity to Metro stations for easier commuting",
            ],
        ),
        (
            "Transportation",
            [
                "Doha Metro is the most convenient way to travel around the city",
                "Karwa taxis are the official taxi service - use the app for easy booking",
                "Uber and Careem are popular ride-sharing alternatives",
                "Consider getting a driving license if planning to buy a car",
                "Traffic can be heavy during peak hours (7-9 AM, 5-7 PM)",
            ],
        ),
        (
            "Banking & Finance",
            [
                "Major banks include QNB, CBQ, and ADIB",
                "Salary certificates from employers are required for bank accounts",
                "Credit cards are widely accepted, but keep cash for smaller vendors",
                "ATMs are readily available throughout the city",
                "Online banking is well-developed and commonly used",
            ],
        ),
        (
            "Healthcare",
            [
                "Health insurance is mandatory for all residents",
                "Hamad Medical Corporation runs public healthcare",
                "Private hospitals offer shorter wait times",
                "Keep your health card and insurance details accessible",
                "Pharmacies are widely available and well-stocked",
            ],
        ),
        (
            "Cultural & Social",
            [
                "Dress modestly, especially in public areas and government buildings",
                "Friday is the holy day - many businesses close or have reduced hours",
                "Ramadan affects business hours and social customs",
                "Tipping is customary in restaurants (10-15%)",
                "Arabic and English are widely spoken in business settings",
            ],
        ),
        (
            "Shopping & Dining",
            [
                "Major malls include City Center, Villaggio, and Mall of Qatar",
                "Traditional souqs offer authentic local products and experiences",
                "International cuisine is readily available alongside local dishes",
                "Alcohol is available only in licensed hotels and clubs",
                "Groceries can be expensive - compare prices between stores",
            ],
        ),
    ];

    groups
        .iter()
        .map(|(category, tips)| TipGroup {
            category: category.to_string(),
            tips: tips.iter().map(|t| t.to_string()).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emergency_number_is_999() {
        let contacts = emergency_contacts();
        assert_eq!(contacts.len(), 6);
        assert_eq!(contacts[0].number, "999");
        assert_eq!(contacts.iter().filter(|c| c.number == "999").count(), 3);
    }

    #[test]
    fn test_tip_groups() {
        let tips = living_tips();
        assert_eq!(tips.len(), 6);
        assert!(tips.iter().all(|g| g.tips.len() == 5));
        assert_eq!(tips[2].category, "Banking & Finance");
    }
}
