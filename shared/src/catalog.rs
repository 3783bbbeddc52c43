//! The studio's fixed service catalog.
//!
//! The catalog feeds the booking form's service picker. The submission
//! endpoint does not enforce membership: the service id is carried through
//! to the calendar event and emails as-is.

use serde::Serialize;

/// A bookable offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceType {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<&'static str>,
}

const SERVICE_TYPES: &[ServiceType] = &[
    ServiceType {
        id: "portrait",
        name: "Portrait Photography",
        description: "Professional portrait session",
        duration: "1-2 hours",
        price_range: Some("R350 - R900"),
    },
    ServiceType {
        id: "event",
        name: "Event Photography & Videography",
        description: "Full event coverage",
        duration: "4-8 hours",
        price_range: None,
    },
    ServiceType {
        id: "commercial",
        name: "Commercial Photography & Videography",
        description: "Business and product content",
        duration: "2-4 hours",
        price_range: None,
    },
    ServiceType {
        id: "content",
        name: "Content Creation",
        description: "Social media and digital content",
        duration: "1-3 hours",
        price_range: None,
    },
];

/// The full catalog, in display order.
pub fn service_types() -> &'static [ServiceType] {
    SERVICE_TYPES
}

/// Look up a service by id.
pub fn find(id: &str) -> Option<&'static ServiceType> {
    SERVICE_TYPES.iter().find(|service| service.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_four_offerings() {
        let ids: Vec<_> = service_types().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["portrait", "event", "commercial", "content"]);
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(find("portrait").unwrap().name, "Portrait Photography");
        assert!(find("wedding").is_none());
    }
}
