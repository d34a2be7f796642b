use chrono::{DateTime, Utc};

/// Grouping key for records whose health-care district is absent in the
/// source data. Such records are kept and bucketed rather than dropped.
pub const UNKNOWN_DISTRICT: &str = "Unknown";

/// One reported case, death or recovery entry from the open dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct CaseRecord {
    pub id: Option<String>,
    pub date: DateTime<Utc>,
    pub health_care_district: Option<String>,
    /// Only present in the v1 dataset.
    pub infection_source_country: Option<String>,
}

impl CaseRecord {
    /// Returns the district grouping key, with absent districts reading as
    /// [`UNKNOWN_DISTRICT`].
    pub fn district(&self) -> &str {
        self.health_care_district
            .as_deref()
            .unwrap_or(UNKNOWN_DISTRICT)
    }
}

/// Number of records sharing one district key. Derived per render, never
/// stored.
#[derive(Clone, Debug, PartialEq)]
pub struct DistrictCount {
    pub health_care_district: String,
    pub count: usize,
}

/// Column the case table can be sorted by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortColumn {
    Date,
    District,
    Source,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Immutable snapshot of one record collection, replaced wholesale on each
/// fetch.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Cases {
    data: Vec<CaseRecord>,
}

impl Cases {
    pub fn new(data: Vec<CaseRecord>) -> Self {
        Self { data }
    }

    pub fn total(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn records(&self) -> &[CaseRecord] {
        &self.data
    }

    /// Groups records by district and counts membership per group.
    ///
    /// The output preserves the first-occurrence order of district keys in
    /// the input; the chart assigns slice colors by position, so this order
    /// must stay stable between renders of the same snapshot.
    pub fn by_district(&self) -> Vec<DistrictCount> {
        let mut counts: Vec<DistrictCount> = Vec::new();

        for record in &self.data {
            let key = record.district();
            // District cardinality is small (~21), a linear scan is fine
            match counts.iter_mut().find(|c| c.health_care_district == key) {
                Some(entry) => entry.count += 1,
                None => counts.push(DistrictCount {
                    health_care_district: key.to_string(),
                    count: 1,
                }),
            }
        }

        counts
    }

    /// Returns a copy of the records sorted by the given column. The sort is
    /// stable, so equal keys keep their fetch order.
    pub fn sorted(&self, column: SortColumn, order: SortOrder) -> Vec<CaseRecord> {
        let mut records = self.data.clone();

        records.sort_by(|a, b| {
            let ordering = match column {
                SortColumn::Date => a.date.cmp(&b.date),
                SortColumn::District => a.district().cmp(b.district()),
                SortColumn::Source => a
                    .infection_source_country
                    .as_deref()
                    .unwrap_or("")
                    .cmp(b.infection_source_country.as_deref().unwrap_or("")),
            };

            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });

        records
    }
}

/// Parsed response body: the three record collections the endpoint serves.
/// A collection missing from the response reads as empty.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct CoronaReport {
    pub confirmed: Cases,
    pub deaths: Cases,
    pub recovered: Cases,
}
