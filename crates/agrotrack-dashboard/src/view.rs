//! View models derived from the current record list
//!
//! Nothing here holds state: the dashboard recomputes a [`DashboardView`]
//! whenever the records or the load error change.

use chrono::{DateTime, TimeZone, Utc};

use crate::types::TelemetryRecord;

/// Map centre used when there is no record to centre on.
pub const FALLBACK_MAP_CENTER: (f64, f64) = (41.878113, -87.629799);

pub const DEFAULT_MAP_ZOOM: u8 = 13;

pub const RPM_SERIES_LABEL: &str = "Engine RPM";

/// What the dashboard shows.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    /// No load has finished yet.
    Loading,
    /// No records were ever loaded and the last load failed.
    Error { message: String },
    /// The backend has no records. `notice` is set when a later refresh failed.
    Empty { notice: Option<String> },
    Populated {
        table: Vec<TableRow>,
        chart: ChartSeries,
        map: MapView,
        notice: Option<String>,
    },
}

impl DashboardView {
    /// Derive the view for the given load outcome.
    ///
    /// `records` is `None` until a load succeeds. A load error with records on
    /// screen keeps them and becomes a notice.
    pub fn derive<Tz: TimeZone>(
        records: Option<&[TelemetryRecord]>,
        load_error: Option<&str>,
        tz: &Tz,
    ) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let notice = load_error.map(str::to_string);
        match records {
            None => match notice {
                Some(message) => DashboardView::Error { message },
                None => DashboardView::Loading,
            },
            Some([]) => DashboardView::Empty { notice },
            Some(records) => DashboardView::Populated {
                table: table_rows(records, tz),
                chart: ChartSeries::engine_rpm(records, tz),
                map: MapView::from_records(records),
                notice,
            },
        }
    }

    pub fn table_row_count(&self) -> usize {
        match self {
            DashboardView::Populated { table, .. } => table.len(),
            _ => 0,
        }
    }

    /// Whether a load has succeeded, so the submission form belongs on screen.
    pub fn has_loaded(&self) -> bool {
        matches!(self, DashboardView::Empty { .. } | DashboardView::Populated { .. })
    }

    /// Failed-refresh notice shown above loaded data.
    pub fn notice(&self) -> Option<&str> {
        match self {
            DashboardView::Empty { notice } | DashboardView::Populated { notice, .. } => notice.as_deref(),
            _ => None,
        }
    }
}

// =============================================================================
// Table
// =============================================================================

/// One table row, already formatted for display. Missing readings stay blank.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub id: String,
    pub equipment_id: Option<String>,
    pub timestamp: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub engine_rpm: Option<i64>,
}

pub fn table_rows<Tz: TimeZone>(records: &[TelemetryRecord], tz: &Tz) -> Vec<TableRow>
where
    Tz::Offset: std::fmt::Display,
{
    records
        .iter()
        .map(|r| TableRow {
            id: r.id.to_string(),
            equipment_id: r.equipment_id.clone(),
            timestamp: r.timestamp.map(|ts| format_local_datetime(&ts, tz)),
            latitude: r.latitude,
            longitude: r.longitude,
            engine_rpm: r.engine_rpm,
        })
        .collect()
}

// =============================================================================
// Chart
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: i64,
}

/// A single line series in fetch order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    /// Engine RPM over time, x labelled with the local time of day.
    ///
    /// Records without an RPM reading are left out; a missing timestamp gives
    /// a blank label.
    pub fn engine_rpm<Tz: TimeZone>(records: &[TelemetryRecord], tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            label: RPM_SERIES_LABEL.to_string(),
            points: records
                .iter()
                .filter_map(|r| {
                    r.engine_rpm.map(|value| ChartPoint {
                        label: r
                            .timestamp
                            .map(|ts| format_local_time(&ts, tz))
                            .unwrap_or_default(),
                        value,
                    })
                })
                .collect(),
        }
    }

    pub fn max_value(&self) -> i64 {
        self.points.iter().map(|p| p.value).max().unwrap_or(0)
    }

    fn min_value(&self) -> i64 {
        self.points.iter().map(|p| p.value).min().unwrap_or(0)
    }

    /// Point coordinates inside a `width` x `height` box, y growing downwards.
    ///
    /// The y axis spans min(0, lowest)..=max; a single point sits in the
    /// horizontal middle.
    pub fn plot(&self, width: f64, height: f64) -> Vec<(f64, f64)> {
        let n = self.points.len();
        let low = self.min_value().min(0);
        let high = self.max_value().max(low + 1);
        let span = (high - low) as f64;
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let x = if n > 1 {
                    width * i as f64 / (n - 1) as f64
                } else {
                    width / 2.0
                };
                let y = height - (p.value - low) as f64 / span * height;
                (x, y)
            })
            .collect()
    }

    /// SVG `points` attribute for a polyline.
    pub fn svg_points(&self, width: f64, height: f64) -> String {
        self.plot(width, height)
            .iter()
            .map(|(x, y)| format!("{:.1},{:.1}", x, y))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// =============================================================================
// Map
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

/// Initial map view plus one marker per record with a usable position.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: (f64, f64),
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
}

impl MapView {
    /// Records with a missing or out-of-range coordinate get no marker. The
    /// map centres on the first marker, or on the fallback without one.
    pub fn from_records(records: &[TelemetryRecord]) -> Self {
        let markers: Vec<MapMarker> = records
            .iter()
            .filter_map(|r| {
                let (latitude, longitude) = valid_position(r.latitude?, r.longitude?)?;
                Some(MapMarker {
                    latitude,
                    longitude,
                    label: r.equipment_id.clone().unwrap_or_default(),
                })
            })
            .collect();

        let center = markers
            .first()
            .map(|m| (m.latitude, m.longitude))
            .unwrap_or(FALLBACK_MAP_CENTER);

        Self {
            center,
            zoom: DEFAULT_MAP_ZOOM,
            markers,
        }
    }
}

fn valid_position(latitude: f64, longitude: f64) -> Option<(f64, f64)> {
    let on_globe = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
    on_globe.then_some((latitude, longitude))
}

// =============================================================================
// Formatting
// =============================================================================

/// Date and time in `tz`, for table cells.
pub fn format_local_datetime<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp
        .with_timezone(tz)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Time of day in `tz`, for chart labels.
pub fn format_local_time<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.with_timezone(tz).format("%H:%M:%S").to_string()
}
