#[cfg(test)]
#[path = "property_test.rs"]
mod tests;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use crate::domain::services::formatters;

/// Listings use spreadsheet column names, and numeric columns may arrive as
/// either JSON numbers or strings.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let res = match value {
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Number(num)) => Some(num.to_string()),
        Some(serde_json::Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    };

    return Ok(res);
}

fn is_present(value: &Option<String>) -> Option<&str> {
    return value
        .as_deref()
        .map(|e| return e.trim())
        .filter(|e| return !e.is_empty() && *e != formatters::NOT_AVAILABLE);
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "Property Name", default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(rename = "Description", default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(rename = "Location", default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(rename = "Bed rooms", default, deserialize_with = "lenient_string")]
    pub bedrooms: Option<String>,
    #[serde(rename = "Baths", default, deserialize_with = "lenient_string")]
    pub baths: Option<String>,
    #[serde(rename = "Home Type", default, deserialize_with = "lenient_string")]
    pub home_type: Option<String>,
    #[serde(rename = "Price", default, deserialize_with = "lenient_string")]
    pub price: Option<String>,
    #[serde(rename = "Currency", default, deserialize_with = "lenient_string")]
    pub currency: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(
        rename = "InfinitiView Virtual tour URLs",
        default,
        deserialize_with = "lenient_string"
    )]
    pub virtual_tour: Option<String>,
    #[serde(rename = "Website URL", default, deserialize_with = "lenient_string")]
    pub website: Option<String>,
    #[serde(rename = "Developer Name", default, deserialize_with = "lenient_string")]
    pub developer: Option<String>,
}

impl Property {
    /// Renders the listing as a short card. Missing and "N/A" columns are
    /// left out entirely.
    pub fn card_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = vec![];

        let name = is_present(&self.name).unwrap_or("Property Name Not Available");
        if let Some(status) = is_present(&self.status) {
            lines.push(format!("{name} ({status})"));
        } else {
            lines.push(name.to_string());
        }

        if let Some(developer) = is_present(&self.developer) {
            lines.push(format!("by {developer}"));
        }

        if let Some(location) = is_present(&self.location) {
            lines.push(format!("Location: {location}"));
        }

        let mut details: Vec<String> = vec![];
        if let Some(bedrooms) = is_present(&self.bedrooms) {
            details.push(format!("{bedrooms} beds"));
        }
        if let Some(baths) = is_present(&self.baths) {
            details.push(format!("{baths} baths"));
        }
        if let Some(home_type) = is_present(&self.home_type) {
            details.push(formatters::format_property_type(home_type));
        }
        if !details.is_empty() {
            lines.push(details.join(", "));
        }

        if let Some(price) = is_present(&self.price) {
            let currency = is_present(&self.currency).unwrap_or(formatters::DEFAULT_CURRENCY);
            lines.push(format!(
                "Price: {}",
                formatters::format_currency(price, currency)
            ));
        }

        if let Some(description) = is_present(&self.description) {
            lines.push(formatters::truncate_text(description, 120));
        }

        if let Some(virtual_tour) = is_present(&self.virtual_tour) {
            lines.push(format!("Virtual Tour: {virtual_tour}"));
        }

        if let Some(website) = is_present(&self.website) {
            lines.push(format!("Website: {website}"));
        }

        return lines;
    }
}
