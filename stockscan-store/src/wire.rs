//! JSON bodies exchanged with the Notion database API.
//!
//! Only the properties this service reads or writes are modelled; anything
//! else on a page is ignored when decoding and never sent when patching.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use stockscan_shared::{ProductRecord, RecordUpdate};

pub const TITLE_PROPERTY: &str = "Name";

// ============================================================================
// Query
// ============================================================================

#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    pub filter: QueryFilter<'a>,
}

#[derive(Debug, Serialize)]
pub struct QueryFilter<'a> {
    pub property: &'a str,
    pub title: TitleFilter<'a>,
}

#[derive(Debug, Serialize)]
pub struct TitleFilter<'a> {
    pub equals: &'a str,
}

impl<'a> QueryRequest<'a> {
    pub fn title_equals(name: &'a str) -> Self {
        Self {
            filter: QueryFilter {
                property: TITLE_PROPERTY,
                title: TitleFilter { equals: name },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub results: Vec<PageObject>,
}

#[derive(Debug, Deserialize)]
pub struct PageObject {
    pub id: String,
    #[serde(default)]
    pub properties: PageProperties,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageProperties {
    #[serde(rename = "Name", default)]
    pub name: Option<TitleProperty>,
    #[serde(rename = "Quantity", default)]
    pub quantity: Option<NumberProperty>,
    #[serde(rename = "Price", default)]
    pub price: Option<NumberProperty>,
    #[serde(rename = "Total Consumed", default)]
    pub total_consumed: Option<NumberProperty>,
    #[serde(rename = "Consumed This Month", default)]
    pub monthly_consumed: Option<NumberProperty>,
    #[serde(rename = "Last Consumed", default)]
    pub last_consumed: Option<DateProperty>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NumberProperty {
    #[serde(default)]
    pub number: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TitleProperty {
    #[serde(default)]
    pub title: Vec<RichText>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DateProperty {
    #[serde(default)]
    pub date: Option<DateValue>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DateValue {
    pub start: String,
}

fn number_or_zero(prop: &Option<NumberProperty>) -> f64 {
    prop.as_ref().and_then(|p| p.number).unwrap_or(0.0)
}

fn count_or_zero(prop: &Option<NumberProperty>) -> i64 {
    // Fractional counts truncate toward zero
    number_or_zero(prop) as i64
}

impl PageObject {
    /// Decode into a record. Missing or null numbers read as zero; the
    /// queried name stands in when the page carries no title text.
    pub fn into_record(self, queried_name: &str) -> ProductRecord {
        let props = &self.properties;
        let title: String = props
            .name
            .as_ref()
            .map(|t| t.title.iter().map(|rt| rt.plain_text.as_str()).collect())
            .unwrap_or_default();

        let last_consumed_at = props
            .last_consumed
            .as_ref()
            .and_then(|p| p.date.as_ref())
            .and_then(|d| DateTime::parse_from_rfc3339(&d.start).ok())
            .map(|dt| dt.with_timezone(&Utc));

        ProductRecord {
            name: if title.is_empty() { queried_name.to_string() } else { title },
            quantity: count_or_zero(&props.quantity),
            unit_price: number_or_zero(&props.price),
            total_consumed: count_or_zero(&props.total_consumed),
            monthly_consumed: count_or_zero(&props.monthly_consumed),
            last_consumed_at,
            id: self.id,
        }
    }
}

// ============================================================================
// Update
// ============================================================================

#[derive(Debug, Serialize)]
pub struct UpdateRequest {
    pub properties: UpdateProperties,
}

#[derive(Debug, Serialize)]
pub struct UpdateProperties {
    #[serde(rename = "Quantity")]
    pub quantity: NumberValue,
    #[serde(rename = "Total Consumed")]
    pub total_consumed: NumberValue,
    #[serde(rename = "Consumed This Month")]
    pub monthly_consumed: NumberValue,
    #[serde(rename = "Last Consumed")]
    pub last_consumed: DateWrite,
}

#[derive(Debug, Serialize)]
pub struct NumberValue {
    pub number: i64,
}

#[derive(Debug, Serialize)]
pub struct DateWrite {
    pub date: DateValue,
}

impl From<&RecordUpdate> for UpdateRequest {
    fn from(update: &RecordUpdate) -> Self {
        Self {
            properties: UpdateProperties {
                quantity: NumberValue { number: update.quantity },
                total_consumed: NumberValue { number: update.total_consumed },
                monthly_consumed: NumberValue { number: update.monthly_consumed },
                last_consumed: DateWrite {
                    date: DateValue {
                        start: update.last_consumed_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                    },
                },
            },
        }
    }
}
