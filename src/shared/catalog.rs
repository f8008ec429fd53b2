/**
 * Service Catalog
 *
 * The fixed list of services customers can book. The document store may
 * hold its own `services` collection; when it cannot be read, or is empty,
 * this built-in list is served instead.
 */

use serde::{Deserialize, Serialize};

/// One bookable service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub id: u32,
    pub name: String,
    pub description: String,
}

impl ServiceEntry {
    pub fn new(id: u32, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }
}

const BUILTIN_SERVICES: &[(u32, &str, &str)] = &[
    (1, "House Cleaning", "Deep cleaning, kitchen, bathroom, and sofa cleaning."),
    (2, "Appliance Repair", "AC, Washing Machine, Fridge, and Geyser repair."),
    (3, "Salon at Home", "Facials, Haircuts, Waxing, Manicure/Pedicure services."),
    (4, "Handyman & Repair", "Plumbing, electrical fixes, and carpentry work."),
    (5, "Mechanical Services", "Vehicle repair and mechanical maintenance."),
    (6, "Emergency Services", "24/7 emergency response and priority handling."),
    (7, "Property Dealing", "Buy, sell, and rent properties with expert agents."),
    (8, "Transportation", "Household moving, parcel delivery, insured services."),
    (9, "Laundry Services", "Clothes, dry cleaning, ironing, pickup/delivery."),
    (10, "Carpenter Services", "Furniture making, repairs, and installation."),
    (11, "Freelancer Services", "Virtual assistance, writing, and design."),
    (12, "Fresh Food Delivery", "Daily fresh produce and meal delivery."),
    (13, "Library Services", "Book lending, consulting and reading programs."),
    (14, "Other Services", "Custom service requests and solutions."),
];

/// The built-in catalog, in display order
pub fn builtin_catalog() -> Vec<ServiceEntry> {
    BUILTIN_SERVICES
        .iter()
        .map(|(id, name, description)| ServiceEntry::new(*id, *name, *description))
        .collect()
}
