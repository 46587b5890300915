// picker.rs - ticker table and the year/month/day selection behind the form
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::ops::RangeInclusive;

pub const YEARS: RangeInclusive<i32> = 2008..=2019;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticker {
    pub symbol: &'static str,
    pub name: &'static str,
}

pub const TICKERS: [Ticker; 16] = [
    Ticker {
        symbol: "A",
        name: "Agilent Technologies",
    },
    Ticker {
        symbol: "AAPL",
        name: "Apple Inc.",
    },
    Ticker {
        symbol: "BRK.A",
        name: "Berkshire Hathaway",
    },
    Ticker {
        symbol: "C",
        name: "Citigroup",
    },
    Ticker {
        symbol: "GOOG",
        name: "Alphabet Inc.",
    },
    Ticker {
        symbol: "HOG",
        name: "Harley-Davidson Inc.",
    },
    Ticker {
        symbol: "HPQ",
        name: "Hewlett-Packard",
    },
    Ticker {
        symbol: "INTC",
        name: "Intel",
    },
    Ticker {
        symbol: "KO",
        name: "The Coca-Cola Company",
    },
    Ticker {
        symbol: "LUV",
        name: "Southwest Airlines",
    },
    Ticker {
        symbol: "MMM",
        name: "3M",
    },
    Ticker {
        symbol: "MSFT",
        name: "Microsoft",
    },
    Ticker {
        symbol: "T",
        name: "AT&T",
    },
    Ticker {
        symbol: "TGT",
        name: "Target Corporation",
    },
    Ticker {
        symbol: "TXN",
        name: "Texas Instruments",
    },
    Ticker {
        symbol: "WMT",
        name: "Walmart",
    },
];

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map_or(31, |d| d.day())
}

/// A calendar date picked from three drop-downs. Changing the year or month
/// clamps the day into the new month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSelection {
    year: i32,
    month: u32,
    day: u32,
}

impl Default for DateSelection {
    fn default() -> Self {
        Self {
            year: *YEARS.end(),
            month: 1,
            day: 1,
        }
    }
}

impl DateSelection {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(|_| Self { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    pub fn set_year(&mut self, year: i32) {
        self.year = year;
        self.clamp_day();
    }

    pub fn set_month(&mut self, month: u32) {
        self.month = month.clamp(1, 12);
        self.clamp_day();
    }

    pub fn set_day(&mut self, day: u32) {
        self.day = day.clamp(1, self.days_in_month());
    }

    fn clamp_day(&mut self) {
        self.day = self.day.min(self.days_in_month());
    }
}

/// `M/D/YYYY`, the form the quote endpoint expects.
impl fmt::Display for DateSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.month, self.day, self.year)
    }
}
