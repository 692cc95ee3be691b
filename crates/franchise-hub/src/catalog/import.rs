use std::io::Read;

use serde::{Deserialize, Deserializer};

use super::domain::NewFranchise;

/// Failure while reading a listings CSV export.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("row {row}: investment amount '{value}' is not a whole number")]
    InvalidAmount { row: usize, value: String },
}

/// Parse catalog listings from a CSV export with the columns
/// `Name, Description, Investment Amount, Format, Conditions, Contact Info,
/// Template Path`. Seeded rows carry no creator reference.
pub fn parse_listings<R: Read>(reader: R) -> Result<Vec<NewFranchise>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut listings = Vec::new();

    for (index, record) in csv_reader.deserialize::<ListingRow>().enumerate() {
        let row = record?;
        let investment_amount = match row.investment_amount.as_deref() {
            Some(raw) => raw
                .replace([' ', ','], "")
                .parse::<i64>()
                .map_err(|_| ImportError::InvalidAmount {
                    row: index + 1,
                    value: raw.to_string(),
                })?,
            None => 0,
        };

        listings.push(NewFranchise {
            name: row.name,
            description: row.description.unwrap_or_default(),
            investment_amount,
            format: row.format.unwrap_or_default(),
            conditions: row.conditions.unwrap_or_default(),
            contact_info: row.contact_info.unwrap_or_default(),
            template_path: row.template_path,
            created_by: None,
        });
    }

    Ok(listings)
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Description", default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
    #[serde(
        rename = "Investment Amount",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    investment_amount: Option<String>,
    #[serde(rename = "Format", default, deserialize_with = "empty_string_as_none")]
    format: Option<String>,
    #[serde(rename = "Conditions", default, deserialize_with = "empty_string_as_none")]
    conditions: Option<String>,
    #[serde(
        rename = "Contact Info",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    contact_info: Option<String>,
    #[serde(
        rename = "Template Path",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    template_path: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
