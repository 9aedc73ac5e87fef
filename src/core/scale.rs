use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{DashError, DashResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> DashResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(DashError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64, viewport: Viewport) -> DashResult<f64> {
        if !viewport.is_valid() {
            return Err(DashError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        if !value.is_finite() {
            return Err(DashError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(normalized * f64::from(viewport.width))
    }

    pub fn pixel_to_domain(self, pixel: f64, viewport: Viewport) -> DashResult<f64> {
        if !viewport.is_valid() {
            return Err(DashError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        if !pixel.is_finite() {
            return Err(DashError::InvalidData("pixel must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = pixel / f64::from(viewport.width);
        Ok(self.domain_start + normalized * span)
    }
}

/// Chart x-axis model: a linear scale over days-since-CE.
///
/// Rebuilt from the filtered dataset extent on every series rebuild; the
/// domain is never a constant. Pointer inversion rounds to the nearest whole
/// day because observation dates are day-resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    linear: LinearScale,
}

impl TimeScale {
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> DashResult<Self> {
        if start > end {
            return Err(DashError::InvalidData(
                "time domain start must not follow its end".to_owned(),
            ));
        }
        // A single-date extent still needs a non-degenerate pixel mapping.
        let end = if start == end {
            end.succ_opt().ok_or_else(|| {
                DashError::InvalidData("time domain end is out of range".to_owned())
            })?
        } else {
            end
        };

        Ok(Self {
            linear: LinearScale::new(day_number(start), day_number(end))?,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    pub fn date_to_pixel(self, date: NaiveDate, viewport: Viewport) -> DashResult<f64> {
        self.linear.domain_to_pixel(day_number(date), viewport)
    }

    pub fn pixel_to_date(self, pixel: f64, viewport: Viewport) -> DashResult<NaiveDate> {
        let day = self.linear.pixel_to_domain(pixel, viewport)?;
        let rounded = day.round();
        if rounded < f64::from(i32::MIN) || rounded > f64::from(i32::MAX) {
            return Err(DashError::InvalidData(
                "pixel inverts outside the representable date range".to_owned(),
            ));
        }
        NaiveDate::from_num_days_from_ce_opt(rounded as i32).ok_or_else(|| {
            DashError::InvalidData("pixel inverts outside the representable date range".to_owned())
        })
    }
}

fn day_number(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}
