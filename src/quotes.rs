// quotes.rs - historical quote rows and the columns a chart can show
use crate::error::LoadError;
use crate::scale::Series;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const COLUMNS: usize = 6; // date, open, high, low, close, volume

#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    /// Numeric columns as received, open through volume.
    pub raw: [String; 5],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Close,
    Open,
    High,
    Low,
    Volume,
}

impl Field {
    /// Tab order of the chart window.
    pub const TABS: [Field; 5] = [
        Field::Close,
        Field::Open,
        Field::High,
        Field::Low,
        Field::Volume,
    ];
    pub const PRICES: [Field; 4] = [Field::Close, Field::Open, Field::High, Field::Low];

    pub fn title(self) -> &'static str {
        match self {
            Field::Close => "Close",
            Field::Open => "Open",
            Field::High => "High",
            Field::Low => "Low",
            Field::Volume => "Volume",
        }
    }

    pub fn value(self, quote: &Quote) -> f64 {
        match self {
            Field::Close => quote.close,
            Field::Open => quote.open,
            Field::High => quote.high,
            Field::Low => quote.low,
            Field::Volume => quote.volume,
        }
    }

    /// The value exactly as the feed spelled it, e.g. "143.10".
    pub fn text(self, quote: &Quote) -> &str {
        let idx = match self {
            Field::Open => 0,
            Field::High => 1,
            Field::Low => 2,
            Field::Close => 3,
            Field::Volume => 4,
        };
        &quote.raw[idx]
    }

    pub fn is_price(self) -> bool {
        self != Field::Volume
    }
}

pub fn series(quotes: &[Quote], field: Field) -> Series {
    let mut series = Series::new();
    for q in quotes {
        series.push_with_text(q.date.as_str(), field.value(q), field.text(q));
    }
    series
}

/// Parses `[date, open, high, low, close, volume]` rows after one header row.
/// Any malformed row rejects the whole feed.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Quote>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut quotes = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() != COLUMNS {
            return Err(LoadError::MalformedRow {
                line,
                reason: format!("expected {} columns, found {}", COLUMNS, record.len()),
            });
        }
        let number = |idx: usize| -> Result<f64, LoadError> {
            let text = &record[idx];
            match text.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(LoadError::MalformedRow {
                    line,
                    reason: format!("column {} is not a number: {:?}", idx + 1, text),
                }),
            }
        };
        quotes.push(Quote {
            date: record[0].to_string(),
            open: number(1)?,
            high: number(2)?,
            low: number(3)?,
            close: number(4)?,
            volume: number(5)?,
            raw: [1, 2, 3, 4, 5].map(|idx| record[idx].to_string()),
        });
    }
    Ok(quotes)
}

pub fn read_csv_file(path: &Path) -> Result<Vec<Quote>, LoadError> {
    let quotes = parse_csv(File::open(path)?)?;
    tracing::debug!(path = %path.display(), rows = quotes.len(), "parsed quote file");
    Ok(quotes)
}
