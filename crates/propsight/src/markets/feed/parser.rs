use crate::markets::listing::{ListingRecord, PropertyType, RecordSource};
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<ListingRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<ListingRow>() {
        let row = row?;
        if let Some(record) = row.into_record() {
            records.push(record);
        }
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    #[serde(rename = "Address", default, deserialize_with = "empty_string_as_none")]
    address: Option<String>,
    #[serde(rename = "City", default, deserialize_with = "empty_string_as_none")]
    city: Option<String>,
    #[serde(rename = "State", default, deserialize_with = "empty_string_as_none")]
    state: Option<String>,
    #[serde(rename = "Latitude", default, deserialize_with = "empty_string_as_none")]
    latitude: Option<String>,
    #[serde(rename = "Longitude", default, deserialize_with = "empty_string_as_none")]
    longitude: Option<String>,
    #[serde(rename = "Price", default, deserialize_with = "empty_string_as_none")]
    price: Option<String>,
    #[serde(
        rename = "Square Feet",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    square_feet: Option<String>,
    #[serde(rename = "Bedrooms", default, deserialize_with = "empty_string_as_none")]
    bedrooms: Option<String>,
    #[serde(rename = "Bathrooms", default, deserialize_with = "empty_string_as_none")]
    bathrooms: Option<String>,
    #[serde(
        rename = "Year Built",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    year_built: Option<String>,
    #[serde(
        rename = "Property Type",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    property_type: Option<String>,
}

impl ListingRow {
    /// Rows without an address or a positive price are unusable.
    fn into_record(self) -> Option<ListingRecord> {
        let address = self.address?;
        let price = parse_number(self.price.as_deref()).filter(|price| *price > 0.0)?;

        Some(ListingRecord {
            address,
            city: self.city.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            latitude: parse_number(self.latitude.as_deref()).unwrap_or(0.0),
            longitude: parse_number(self.longitude.as_deref()).unwrap_or(0.0),
            price,
            square_feet: parse_number(self.square_feet.as_deref()).unwrap_or(0.0) as u32,
            bedrooms: parse_number(self.bedrooms.as_deref()).unwrap_or(0.0) as u8,
            bathrooms: parse_number(self.bathrooms.as_deref()).unwrap_or(0.0) as f32,
            year_built: parse_number(self.year_built.as_deref()).unwrap_or(0.0) as u16,
            property_type: parse_property_type(self.property_type.as_deref()),
            source: RecordSource::Live,
        })
    }
}

fn parse_number(value: Option<&str>) -> Option<f64> {
    let raw = value?.trim().replace(['$', ','], "");
    raw.parse::<f64>().ok().filter(|parsed| parsed.is_finite())
}

fn parse_property_type(value: Option<&str>) -> PropertyType {
    match value
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
        .replace([' ', '-'], "_")
        .as_str()
    {
        "condo" | "condominium" => PropertyType::Condo,
        "townhouse" | "townhome" => PropertyType::Townhouse,
        "multi_family" | "multifamily" | "duplex" => PropertyType::MultiFamily,
        _ => PropertyType::SingleFamily,
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
